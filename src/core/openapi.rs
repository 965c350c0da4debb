use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::games::{dtos as games_dtos, handlers as games_handlers};
use crate::shared::types::{ErrorResponse, FieldError};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Games
        games_handlers::upload_game,
        games_handlers::list_games,
        games_handlers::list_games_by_category,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::add_category,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            // Games
            games_dtos::GameResponseDto,
            games_dtos::GameListResponseDto,
            games_dtos::UploadGameDto,
            games_dtos::UploadGameResponseDto,
            games_dtos::StoredFileDto,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryListResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::CreateCategoryResponseDto,
        )
    ),
    tags(
        (name = "games", description = "Game uploads and catalog listings"),
        (name = "categories", description = "Game categories")
    )
)]
pub struct ApiDoc;

/// Overrides the document info with values from configuration
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/api/upload-game",
            "/api/games",
            "/api/games/category/{categoryId}",
            "/api/categories",
            "/api/add-category",
        ] {
            assert!(paths.contains(&path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Catalog".to_string(),
            version: "9.9.9".to_string(),
            description: "Games".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Catalog");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("Games"));
    }
}
