use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::catalog::Category;

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

/// Envelope for `GET /api/categories`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponseDto {
    pub categories: Vec<CategoryResponseDto>,
}

/// Request DTO for adding a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(
        required(message = "Category name is required"),
        length(min = 1, message = "Category name is required")
    )]
    #[schema(example = "Arcade")]
    pub category_name: Option<String>,
}

/// Response DTO for an added category
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryResponseDto {
    pub message: String,
    pub category_id: i64,
}
