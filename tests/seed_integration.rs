use catalog_seed::config::CatalogConfig;
use catalog_seed::{
    Category, Customization, CustomizationKind, MemoryStore, MenuItem, SeedData, Seeder,
};

fn test_catalog() -> CatalogConfig {
    CatalogConfig {
        database: "test-db".to_string(),
        bucket: "test-bucket".to_string(),
        categories: "categories".to_string(),
        customizations: "customizations".to_string(),
        menu: "menu".to_string(),
        menucustomizations: "menu_customizations".to_string(),
        dataset: None,
    }
}

fn margherita(category_name: &str, customizations: &[&str]) -> MenuItem {
    MenuItem {
        name: "Margherita".to_string(),
        description: "Tomato, mozzarella, basil".to_string(),
        image_url: "https://cdn.example.com/img/margherita.png".to_string(),
        price: 9.5,
        rating: 4.6,
        calories: 850,
        protein: 32,
        category_name: category_name.to_string(),
        customizations: customizations.iter().map(|s| s.to_string()).collect(),
    }
}

fn small_dataset() -> SeedData {
    SeedData {
        categories: vec![Category::new("Pizza", "Stone-baked pies")],
        customizations: vec![Customization::new(
            "Extra Cheese",
            1.5,
            CustomizationKind::Topping,
        )],
        menu: vec![margherita("Pizza", &["Extra Cheese"])],
    }
}

#[tokio::test]
async fn end_to_end_seed_resolves_all_references() {
    let store = MemoryStore::new();
    let catalog = test_catalog();
    let seeder = Seeder::new(&store, &catalog);

    let report = seeder.seed(&small_dataset()).await.unwrap();
    assert_eq!(report.categories, 1);
    assert_eq!(report.customizations, 1);
    assert_eq!(report.menu_items, 1);
    assert_eq!(report.links, 1);
    assert_eq!(report.skipped_items, 0);
    assert_eq!(report.failed_items, 0);

    // 1 category doc, 1 customization doc, 1 menu doc, 1 link doc
    let categories = store.documents_in(&catalog.database, &catalog.categories);
    let customizations = store.documents_in(&catalog.database, &catalog.customizations);
    let menu = store.documents_in(&catalog.database, &catalog.menu);
    let links = store.documents_in(&catalog.database, &catalog.menucustomizations);
    assert_eq!(categories.len(), 1);
    assert_eq!(customizations.len(), 1);
    assert_eq!(menu.len(), 1);
    assert_eq!(links.len(), 1);

    // Referential integrity: the menu doc points at the generated category id,
    // and the link row joins the generated menu and customization ids.
    assert_eq!(categories[0].data["name"], "Pizza");
    assert_eq!(menu[0].data["categories"], categories[0].id.as_str());
    assert_eq!(links[0].data["menu"], menu[0].id.as_str());
    assert_eq!(links[0].data["customizations"], customizations[0].id.as_str());

    // The menu doc carries the materialized (uploaded) image URL.
    let image_url = menu[0].data["image_url"].as_str().unwrap();
    let files = store.files_in(&catalog.bucket);
    assert_eq!(files.len(), 1);
    assert!(image_url.contains(&files[0].id));
}

#[tokio::test]
async fn unknown_category_skips_item_without_failing_run() {
    let store = MemoryStore::new();
    let catalog = test_catalog();
    let seeder = Seeder::new(&store, &catalog);

    let mut data = small_dataset();
    data.menu = vec![margherita("Sushi", &["Extra Cheese"])];

    let report = seeder.seed(&data).await.unwrap();
    assert_eq!(report.menu_items, 0);
    assert_eq!(report.links, 0);
    assert_eq!(report.skipped_items, 1);
    assert_eq!(report.failed_items, 0);

    assert!(store.documents_in(&catalog.database, &catalog.menu).is_empty());
    assert!(store
        .documents_in(&catalog.database, &catalog.menucustomizations)
        .is_empty());
    // The skip happens before image materialization; nothing was uploaded.
    assert!(store.files_in(&catalog.bucket).is_empty());
}

#[tokio::test]
async fn unknown_customization_skips_only_that_pairing() {
    let store = MemoryStore::new();
    let catalog = test_catalog();
    let seeder = Seeder::new(&store, &catalog);

    let mut data = small_dataset();
    data.menu = vec![margherita("Pizza", &["Extra Cheese", "Pineapple"])];

    let report = seeder.seed(&data).await.unwrap();
    assert_eq!(report.menu_items, 1);
    assert_eq!(report.links, 1);
    assert_eq!(report.failed_items, 0);

    let links = store.documents_in(&catalog.database, &catalog.menucustomizations);
    assert_eq!(links.len(), 1);
    let customizations = store.documents_in(&catalog.database, &catalog.customizations);
    assert_eq!(links[0].data["customizations"], customizations[0].id.as_str());
}

#[tokio::test]
async fn one_failing_item_does_not_stop_the_rest() {
    let store = MemoryStore::new();
    let catalog = test_catalog();
    let seeder = Seeder::new(&store, &catalog);

    let mut data = small_dataset();
    let mut pepperoni = margherita("Pizza", &["Extra Cheese"]);
    pepperoni.name = "Pepperoni".to_string();
    data.menu = vec![margherita("Pizza", &["Extra Cheese"]), pepperoni];

    store.fail_creates_named("Margherita");

    let report = seeder.seed(&data).await.unwrap();
    assert_eq!(report.menu_items, 1);
    assert_eq!(report.failed_items, 1);
    assert_eq!(report.links, 1);

    let menu = store.documents_in(&catalog.database, &catalog.menu);
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].data["name"], "Pepperoni");
}

#[tokio::test]
async fn upload_failure_falls_back_to_placeholder_url() {
    let store = MemoryStore::new();
    let catalog = test_catalog();
    let seeder = Seeder::new(&store, &catalog);

    store.fail_file_uploads(true);

    let report = seeder.seed(&small_dataset()).await.unwrap();
    assert_eq!(report.menu_items, 1);
    assert_eq!(report.failed_items, 0);
    assert_eq!(report.placeholder_images, 1);

    let menu = store.documents_in(&catalog.database, &catalog.menu);
    assert_eq!(
        menu[0].data["image_url"],
        "https://via.placeholder.com/300x200.png?text=margherita"
    );
    assert!(store.files_in(&catalog.bucket).is_empty());
}

#[tokio::test]
async fn reset_is_idempotent_and_tolerates_empty_collections() {
    let store = MemoryStore::new();
    let catalog = test_catalog();
    let seeder = Seeder::new(&store, &catalog);

    // Clearing collections that were never written is a no-op.
    seeder.clear_collection(&catalog.categories).await.unwrap();
    seeder.clear_storage().await.unwrap();

    // Populate, then clear twice in a row.
    seeder.seed(&small_dataset()).await.unwrap();
    for _ in 0..2 {
        seeder.clear_collection(&catalog.categories).await.unwrap();
        seeder.clear_collection(&catalog.customizations).await.unwrap();
        seeder.clear_collection(&catalog.menu).await.unwrap();
        seeder.clear_collection(&catalog.menucustomizations).await.unwrap();
        seeder.clear_storage().await.unwrap();
    }

    assert!(store.documents_in(&catalog.database, &catalog.categories).is_empty());
    assert!(store.documents_in(&catalog.database, &catalog.customizations).is_empty());
    assert!(store.documents_in(&catalog.database, &catalog.menu).is_empty());
    assert!(store
        .documents_in(&catalog.database, &catalog.menucustomizations)
        .is_empty());
    assert!(store.files_in(&catalog.bucket).is_empty());
}

#[tokio::test]
async fn reseeding_leaves_no_orphans_from_prior_runs() {
    let store = MemoryStore::new();
    let catalog = test_catalog();
    let seeder = Seeder::new(&store, &catalog);

    seeder.seed(&small_dataset()).await.unwrap();
    let first_category_id = store.documents_in(&catalog.database, &catalog.categories)[0]
        .id
        .clone();

    seeder.seed(&small_dataset()).await.unwrap();

    let categories = store.documents_in(&catalog.database, &catalog.categories);
    assert_eq!(categories.len(), 1);
    assert_ne!(categories[0].id, first_category_id);
    assert_eq!(store.documents_in(&catalog.database, &catalog.menu).len(), 1);
    assert_eq!(store.files_in(&catalog.bucket).len(), 1);
}

#[tokio::test]
async fn reset_phase_failure_aborts_the_run() {
    let store = MemoryStore::new();
    let catalog = test_catalog();
    let seeder = Seeder::new(&store, &catalog);

    // Leave documents from a prior run in place, then make deletes fail.
    seeder.seed(&small_dataset()).await.unwrap();
    store.fail_deletes(true);

    let err = seeder.seed(&small_dataset()).await.unwrap_err();
    assert!(err.to_string().contains("clear categories"));
}

#[tokio::test]
async fn duplicate_names_create_duplicate_documents_last_write_wins() {
    let store = MemoryStore::new();
    let catalog = test_catalog();
    let seeder = Seeder::new(&store, &catalog);

    let mut data = small_dataset();
    data.categories = vec![
        Category::new("Pizza", "First definition"),
        Category::new("Pizza", "Second definition"),
    ];

    seeder.seed(&data).await.unwrap();

    // Both documents exist; the menu item references the later one.
    let categories = store.documents_in(&catalog.database, &catalog.categories);
    assert_eq!(categories.len(), 2);
    let menu = store.documents_in(&catalog.database, &catalog.menu);
    assert_eq!(menu[0].data["categories"], categories[1].id.as_str());
}
