use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    CategoryListResponseDto, CreateCategoryDto, CreateCategoryResponseDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::ErrorResponse;
use crate::shared::validation::field_errors;

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = CategoryListResponseDto),
        (status = 500, description = "Database error", body = ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<CategoryListResponseDto>> {
    let categories = service.list().await?;
    Ok(Json(CategoryListResponseDto { categories }))
}

/// Add a category
#[utoipa::path(
    post,
    path = "/api/add-category",
    request_body = CreateCategoryDto,
    responses(
        (status = 200, description = "Category added", body = CreateCategoryResponseDto),
        (status = 400, description = "Missing or empty category name", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn add_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<Json<CreateCategoryResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::FieldValidation(field_errors(&e)))?;

    let name = dto.category_name.unwrap_or_default();
    let response = service.create(&name).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::features::categories::routes;
    use crate::shared::test_helpers::{body_json, InMemoryCatalogStore};

    fn app() -> axum::Router {
        routes::routes(Arc::new(CategoryService::new(Arc::new(
            InMemoryCatalogStore::new(),
        ))))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/add-category")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_category_returns_id() {
        let response = app()
            .oneshot(post_json(r#"{"categoryName":"Puzzle"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Category added successfully");
        assert_eq!(json["categoryId"], 1);
    }

    #[tokio::test]
    async fn test_add_category_rejects_missing_and_empty_names() {
        for body in [r#"{}"#, r#"{"categoryName":""}"#] {
            let response = app().oneshot(post_json(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json = body_json(response).await;
            assert_eq!(json["errors"][0]["message"], "Category name is required");
        }
    }

    #[tokio::test]
    async fn test_add_category_rejects_malformed_json() {
        let response = app().oneshot(post_json("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON syntax"));
    }

    #[tokio::test]
    async fn test_list_categories_envelope() {
        let app = app();
        app.clone()
            .oneshot(post_json(r#"{"categoryName":"Arcade"}"#))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/categories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({ "categories": [{ "id": 1, "name": "Arcade" }] })
        );
    }
}
