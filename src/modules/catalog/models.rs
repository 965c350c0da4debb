use sqlx::FromRow;

/// Database model for a catalog game
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail_url: String,
    pub game_url: String,
    pub category_id: Option<i64>,
}

/// Database model for a category
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Column values for a game insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub name: String,
    pub description: String,
    pub thumbnail_url: String,
    pub game_url: String,
    pub category_id: Option<i64>,
}
