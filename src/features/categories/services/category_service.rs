use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::dtos::{CategoryResponseDto, CreateCategoryResponseDto};
use crate::modules::catalog::CatalogStore;

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CatalogStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// List all categories in storage order
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.store.list_categories().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Add a category. Names are not checked for uniqueness.
    pub async fn create(&self, name: &str) -> Result<CreateCategoryResponseDto> {
        let category_id = self.store.insert_category(name).await?;

        tracing::info!("Category added: id={}, name={}", category_id, name);

        Ok(CreateCategoryResponseDto {
            message: "Category added successfully".to_string(),
            category_id,
        })
    }
}
