//! Error types for catalog lookups

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Recipe '{0}' not found in the catalog")]
    NotFound(String),

    #[error("Recipe '{recipe}' is inconsistent with the catalog: {reason}")]
    DataIntegrity { recipe: String, reason: String },
}

impl CatalogError {
    pub(crate) fn integrity(recipe: &str, reason: impl Into<String>) -> Self {
        CatalogError::DataIntegrity {
            recipe: recipe.to_string(),
            reason: reason.into(),
        }
    }
}
