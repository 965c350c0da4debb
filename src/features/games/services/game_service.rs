use std::sync::Arc;

use crate::core::error::Result;
use crate::features::games::dtos::GameResponseDto;
use crate::modules::catalog::CatalogStore;

/// Read side of the catalog
pub struct GameService {
    store: Arc<dyn CatalogStore>,
}

impl GameService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// List every game
    pub async fn list(&self) -> Result<Vec<GameResponseDto>> {
        let games = self.store.list_games().await?;
        Ok(games.into_iter().map(|g| g.into()).collect())
    }

    /// List the games of one category. An unknown category yields an empty list.
    pub async fn list_by_category(&self, category_id: i64) -> Result<Vec<GameResponseDto>> {
        let games = self.store.list_games_by_category(category_id).await?;
        Ok(games.into_iter().map(|g| g.into()).collect())
    }
}
