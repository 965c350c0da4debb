use async_trait::async_trait;

use crate::core::error::Result;
use crate::modules::catalog::{Category, Game, NewGame};

/// Row-level access to the `games` and `categories` tables
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert one game row and return its generated id
    async fn insert_game(&self, game: NewGame) -> Result<i64>;

    /// Insert one category row and return its generated id
    async fn insert_category(&self, name: &str) -> Result<i64>;

    /// Every game, in storage order
    async fn list_games(&self) -> Result<Vec<Game>>;

    /// Games whose category is exactly `category_id`. Unknown ids yield an empty list.
    async fn list_games_by_category(&self, category_id: i64) -> Result<Vec<Game>>;

    /// Every category, in storage order
    async fn list_categories(&self) -> Result<Vec<Category>>;
}
