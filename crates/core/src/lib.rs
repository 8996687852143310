pub mod catalog;
pub mod config;
pub mod metrics;
pub mod provider;
pub mod store;
pub mod testing;

pub use catalog::{
    needs_refresh, CatalogError, MovieCatalog, MovieDetail, MovieEntry, MovieListPage, ShowCatalog,
    ShowDetail, ShowEntry, ShowListPage, STALENESS_WINDOW_HOURS,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    SanitizedConfig, ServerConfig,
};
pub use provider::{
    MetadataProvider, MovieCategory, ProviderError, ShowCategory, TmdbClient, TmdbConfig,
};
pub use store::{
    CatalogStore, Genre, MovieFilter, MovieOrder, MovieUpsert, ShowUpsert, SqliteStore, StoreError,
    StoredMovie, StoredShow,
};
