use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::modules::catalog::Game;

/// A catalog game as sent to the front end.
///
/// URL fields are site-relative; the client prefixes its API origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GameResponseDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Path of the thumbnail image, or empty
    #[serde(rename = "thumbnailUrl")]
    #[schema(example = "/uploads/images/1700000000000.png")]
    pub thumbnail_url: String,
    /// Path of the extracted bundle directory, or empty
    #[serde(rename = "gameUrl")]
    #[schema(example = "/uploads/games/1700000000001")]
    pub game_url: String,
    pub category_id: Option<i64>,
}

impl From<Game> for GameResponseDto {
    fn from(g: Game) -> Self {
        Self {
            id: g.id,
            name: g.name,
            description: g.description,
            thumbnail_url: g.thumbnail_url,
            game_url: g.game_url,
            category_id: g.category_id,
        }
    }
}

/// Envelope for game listings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameListResponseDto {
    pub games: Vec<GameResponseDto>,
}
