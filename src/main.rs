use catalog_seed::run_seed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with explicit filter to suppress HTTP client debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("reqwest", LevelFilter::Warn)
        .init();

    println!("Catalog Seed: relational catalog synchronizer");

    let report = run_seed().await?;

    println!(
        "Seed complete: {} categories, {} customizations, {} menu items, {} links",
        report.categories, report.customizations, report.menu_items, report.links
    );
    if report.skipped_items > 0 || report.failed_items > 0 {
        println!(
            "Warnings: {} items skipped (unresolved category), {} items failed",
            report.skipped_items, report.failed_items
        );
    }
    if report.placeholder_images > 0 {
        println!(
            "{} images fell back to direct placeholder URLs",
            report.placeholder_images
        );
    }

    Ok(())
}
