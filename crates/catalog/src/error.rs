use thiserror::Error;

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog backend rejected the query.
    #[error("Catalog backend error: {0}")]
    Backend(String),
}
