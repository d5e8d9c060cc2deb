use std::sync::Arc;

use crate::catalog::Catalog;
use crate::services::providers::MetadataProvider;

/// Shared application state
///
/// The catalog is loaded before the server starts and never mutated, so
/// handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub provider: Arc<dyn MetadataProvider>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self { catalog, provider }
    }
}
