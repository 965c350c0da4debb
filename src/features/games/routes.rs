use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::games::handlers;
use crate::features::games::services::{GameService, UploadService};

/// Create routes for the games feature
pub fn routes(
    game_service: Arc<GameService>,
    upload_service: Arc<UploadService>,
    max_upload_size: usize,
) -> Router {
    let listing = Router::new()
        .route("/api/games", get(handlers::list_games))
        .route(
            "/api/games/category/{category_id}",
            get(handlers::list_games_by_category),
        )
        .with_state(game_service);

    let upload = Router::new()
        .route(
            "/api/upload-game",
            post(handlers::upload_game).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .with_state(upload_service);

    listing.merge(upload)
}
