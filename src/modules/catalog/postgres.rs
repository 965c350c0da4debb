use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::modules::catalog::{CatalogStore, Category, Game, NewGame};

/// PostgreSQL-backed catalog
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn insert_game(&self, game: NewGame) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO games (name, description, thumbnail_url, game_url, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&game.name)
        .bind(&game.description)
        .bind(&game.thumbnail_url)
        .bind(&game.game_url)
        .bind(game.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert game '{}': {:?}", game.name, e);
            AppError::Database(e)
        })?;

        Ok(id)
    }

    async fn insert_category(&self, name: &str) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert category '{}': {:?}", name, e);
            AppError::Database(e)
        })?;

        Ok(id)
    }

    async fn list_games(&self) -> Result<Vec<Game>> {
        sqlx::query_as::<_, Game>(
            r#"
            SELECT id, name, description, thumbnail_url, game_url, category_id
            FROM games
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list games: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_games_by_category(&self, category_id: i64) -> Result<Vec<Game>> {
        sqlx::query_as::<_, Game>(
            r#"
            SELECT id, name, description, thumbnail_url, game_url, category_id
            FROM games
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list games for category {}: {:?}", category_id, e);
            AppError::Database(e)
        })
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }
}
