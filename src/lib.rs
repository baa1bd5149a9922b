pub mod config;
pub mod model;
pub mod seed;
pub mod store;

// Export all model types
pub use model::*;

// Export seed engine types
pub use seed::{default_dataset, ImageMaterializer, MaterializedImage, SeedReport, Seeder};

// Export store types
pub use store::{
    CollectionStore, Document, FileRecord, FileStore, HttpStore, MemoryStore, NewFile, Store,
};

/// Run a full seeding cycle against the configured remote store. Used by the
/// binary and by integration tooling.
pub async fn run_seed() -> anyhow::Result<SeedReport> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with INFO level only (suppress DEBUG logs)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = crate::config::AppConfig::load()?;

    let store = HttpStore::new(
        &config.store.endpoint,
        &config.store.project,
        &config.store.key,
    )?;

    let data = match &config.catalog.dataset {
        Some(path) => SeedData::from_json_file(std::path::Path::new(path))?,
        None => default_dataset(),
    };

    let seeder = Seeder::new(&store, &config.catalog);
    seeder.seed(&data).await
}
