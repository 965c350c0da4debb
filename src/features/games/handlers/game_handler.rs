use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppPath;
use crate::features::games::dtos::GameListResponseDto;
use crate::features::games::services::GameService;
use crate::shared::types::ErrorResponse;

/// List all games
#[utoipa::path(
    get,
    path = "/api/games",
    responses(
        (status = 200, description = "Every game in the catalog", body = GameListResponseDto),
        (status = 500, description = "Database error", body = ErrorResponse),
    ),
    tag = "games"
)]
pub async fn list_games(
    State(service): State<Arc<GameService>>,
) -> Result<Json<GameListResponseDto>> {
    let games = service.list().await?;
    Ok(Json(GameListResponseDto { games }))
}

/// List the games of one category
#[utoipa::path(
    get,
    path = "/api/games/category/{categoryId}",
    params(
        ("categoryId" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Games in the category (empty when none match)", body = GameListResponseDto),
        (status = 400, description = "Category id is not an integer", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
    ),
    tag = "games"
)]
pub async fn list_games_by_category(
    State(service): State<Arc<GameService>>,
    AppPath(category_id): AppPath<i64>,
) -> Result<Json<GameListResponseDto>> {
    let games = service.list_by_category(category_id).await?;
    Ok(Json(GameListResponseDto { games }))
}
