use std::sync::Arc;

use cineshelf_core::{
    CatalogStore, Config, MetadataProvider, MovieCatalog, SanitizedConfig, ShowCatalog,
};

/// Shared application state
pub struct AppState {
    config: Config,
    movies: MovieCatalog,
    shows: ShowCatalog,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn CatalogStore>,
        provider: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self {
            movies: MovieCatalog::new(Arc::clone(&store), Arc::clone(&provider)),
            shows: ShowCatalog::new(store, provider),
            config,
        }
    }

    pub fn movies(&self) -> &MovieCatalog {
        &self.movies
    }

    pub fn shows(&self) -> &ShowCatalog {
        &self.shows
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }
}
