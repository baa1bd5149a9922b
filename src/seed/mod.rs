pub mod data;
pub mod images;

pub use data::default_dataset;
pub use images::{ImageMaterializer, MaterializedImage};

use crate::config::CatalogConfig;
use crate::model::{
    Category, CategoryRecord, Customization, CustomizationRecord, Id, MenuCustomizationRecord,
    MenuItem, MenuItemRecord, SeedData,
};
use crate::store::Store;
use anyhow::{Context, Result};
use futures_util::future::try_join_all;
use std::collections::HashMap;

/// Counters from one seeding run, for operator output and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    pub categories: usize,
    pub customizations: usize,
    pub menu_items: usize,
    pub links: usize,
    pub skipped_items: usize,
    pub failed_items: usize,
    pub placeholder_images: usize,
}

/// Outcome of processing a single menu item.
enum ItemOutcome {
    Created { links: usize, placeholder: bool },
    SkippedMissingCategory,
}

/// Orchestrates the full reset-then-repopulate cycle: wipes the four target
/// collections and the bucket, then recreates categories, customizations,
/// menu items, and menu↔customization links from the source dataset,
/// translating natural-key references through per-run name→id maps.
pub struct Seeder<'a, S: Store> {
    store: &'a S,
    catalog: &'a CatalogConfig,
}

impl<'a, S: Store> Seeder<'a, S> {
    pub fn new(store: &'a S, catalog: &'a CatalogConfig) -> Self {
        Self { store, catalog }
    }

    /// Empty one collection: list everything, delete concurrently, join. An
    /// empty listing is a no-op; one failed delete fails the whole clear.
    pub async fn clear_collection(&self, collection_id: &Id) -> Result<()> {
        let docs = self
            .store
            .list_documents(&self.catalog.database, collection_id)
            .await?;

        try_join_all(docs.iter().map(|doc| {
            self.store
                .delete_document(&self.catalog.database, collection_id, &doc.id)
        }))
        .await?;

        Ok(())
    }

    /// Empty the blob store, same all-or-nothing semantics as
    /// [`clear_collection`](Self::clear_collection).
    pub async fn clear_storage(&self) -> Result<()> {
        let files = self.store.list_files(&self.catalog.bucket).await?;

        try_join_all(
            files
                .iter()
                .map(|file| self.store.delete_file(&self.catalog.bucket, &file.id)),
        )
        .await?;

        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        self.clear_collection(&self.catalog.categories)
            .await
            .context("Failed to clear categories collection")?;
        self.clear_collection(&self.catalog.customizations)
            .await
            .context("Failed to clear customizations collection")?;
        self.clear_collection(&self.catalog.menu)
            .await
            .context("Failed to clear menu collection")?;
        self.clear_collection(&self.catalog.menucustomizations)
            .await
            .context("Failed to clear menu customizations collection")?;
        self.clear_storage().await.context("Failed to clear storage")?;
        Ok(())
    }

    /// Create one document per source category, in dataset order, recording
    /// `name -> generated id`. Duplicate names overwrite the map entry (last
    /// write wins) but still create a duplicate document. Create failures are
    /// fatal for the run.
    async fn seed_categories(&self, categories: &[Category]) -> Result<HashMap<String, Id>> {
        let mut category_map = HashMap::new();

        for cat in categories {
            let payload = CategoryRecord::from_source(cat)?.to_payload()?;
            let doc = self
                .store
                .create_document(&self.catalog.database, &self.catalog.categories, payload)
                .await
                .with_context(|| format!("Failed to create category '{}'", cat.name))?;
            category_map.insert(cat.name.clone(), doc.id);
            log::info!("Created category: {}", cat.name);
        }

        Ok(category_map)
    }

    async fn seed_customizations(
        &self,
        customizations: &[Customization],
    ) -> Result<HashMap<String, Id>> {
        let mut customization_map = HashMap::new();

        for cus in customizations {
            let payload = CustomizationRecord::from_source(cus)?.to_payload()?;
            let doc = self
                .store
                .create_document(
                    &self.catalog.database,
                    &self.catalog.customizations,
                    payload,
                )
                .await
                .with_context(|| format!("Failed to create customization '{}'", cus.name))?;
            customization_map.insert(cus.name.clone(), doc.id);
            log::info!("Created customization: {}", cus.name);
        }

        Ok(customization_map)
    }

    /// Process one menu item: resolve its category, materialize its image,
    /// create the menu document, then one link document per resolvable
    /// customization name. Unresolved references are warned about and
    /// skipped; errors propagate to the caller's item boundary.
    async fn seed_item(
        &self,
        item: &MenuItem,
        category_map: &HashMap<String, Id>,
        customization_map: &HashMap<String, Id>,
        menu_map: &mut HashMap<String, Id>,
    ) -> Result<ItemOutcome> {
        let Some(category_id) = category_map.get(&item.category_name) else {
            log::warn!("Category not found: {}", item.category_name);
            return Ok(ItemOutcome::SkippedMissingCategory);
        };

        let image = ImageMaterializer::new(self.store, &self.catalog.bucket)
            .materialize(&item.image_url)
            .await;

        let record =
            MenuItemRecord::from_source(item, category_id.clone(), image.url().to_string())?;
        let doc = self
            .store
            .create_document(
                &self.catalog.database,
                &self.catalog.menu,
                record.to_payload()?,
            )
            .await
            .context("Failed to create menu document")?;
        menu_map.insert(item.name.clone(), doc.id.clone());

        let mut links = 0;
        for cus_name in &item.customizations {
            let Some(customization_id) = customization_map.get(cus_name) else {
                log::warn!("Customization not found: {}", cus_name);
                continue;
            };

            let link = MenuCustomizationRecord::new(doc.id.clone(), customization_id.clone())?;
            self.store
                .create_document(
                    &self.catalog.database,
                    &self.catalog.menucustomizations,
                    link.to_payload()?,
                )
                .await
                .with_context(|| format!("Failed to link customization '{}'", cus_name))?;
            log::info!("Added customization: {}", cus_name);
            links += 1;
        }

        Ok(ItemOutcome::Created {
            links,
            placeholder: image.is_placeholder(),
        })
    }

    /// Run the full seeding cycle. Fails only on reset-phase errors or on
    /// category/customization create failures; each menu item is processed
    /// independently and a failing item is logged and skipped.
    pub async fn seed(&self, data: &SeedData) -> Result<SeedReport> {
        log::info!("Starting seed process");

        log::info!("Clearing old data");
        self.reset().await?;
        log::info!("Data cleared successfully");

        log::info!("Seeding categories");
        let category_map = self.seed_categories(&data.categories).await?;
        log::info!("{} categories seeded", data.categories.len());

        log::info!("Seeding customizations");
        let customization_map = self.seed_customizations(&data.customizations).await?;
        log::info!("{} customizations seeded", data.customizations.len());

        log::info!("Seeding menu items");
        let mut menu_map = HashMap::new();
        let mut report = SeedReport {
            categories: data.categories.len(),
            customizations: data.customizations.len(),
            ..SeedReport::default()
        };

        for item in &data.menu {
            log::info!("Processing: {}", item.name);
            match self
                .seed_item(item, &category_map, &customization_map, &mut menu_map)
                .await
            {
                Ok(ItemOutcome::Created { links, placeholder }) => {
                    report.menu_items += 1;
                    report.links += links;
                    if placeholder {
                        report.placeholder_images += 1;
                    }
                }
                Ok(ItemOutcome::SkippedMissingCategory) => {
                    report.skipped_items += 1;
                }
                Err(e) => {
                    log::error!("Failed to process {}: {:#}", item.name, e);
                    report.failed_items += 1;
                }
            }
        }

        log::info!("Seeding complete");
        Ok(report)
    }
}
