use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub catalog: CatalogConfig,
}

/// Connection settings for the remote document/file store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub endpoint: String,
    pub project: String,
    pub key: String,
}

/// Opaque identifiers for the database, bucket, and one collection per
/// logical table. Supplied at process start, never computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub database: String,
    pub bucket: String,
    pub categories: String,
    pub customizations: String,
    pub menu: String,
    pub menucustomizations: String,
    /// Optional path to a JSON dataset; the built-in one is used when unset.
    pub dataset: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project: String::new(),
            key: String::new(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database: String::new(),
            bucket: String::new(),
            categories: "categories".to_string(),
            customizations: "customizations".to_string(),
            menu: "menu".to_string(),
            menucustomizations: "menu_customizations".to_string(),
            dataset: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Add environment variables with prefix "CATALOG_"
        config = config.add_source(
            config::Environment::with_prefix("CATALOG")
                .separator("_")
                .prefix_separator("_"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_conventional_collection_ids() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.categories, "categories");
        assert_eq!(config.catalog.menucustomizations, "menu_customizations");
        assert!(config.catalog.dataset.is_none());
        assert!(config.store.endpoint.starts_with("https://"));
    }
}
