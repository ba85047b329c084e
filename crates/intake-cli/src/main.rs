//! Command-line demo for intake-rs
//!
//! Runs one intake session end to end: qualify the request, match it against
//! the catalog, and book a slot for one of the matches.
//!
//! ```bash
//! intake-cli --category sedan --condition new --budget 25000 \
//!     --date 2025-06-01 --time "10:00 AM" --requester alex
//! ```

mod inventory;

use clap::Parser;
use comfy_table::Table;
use intake_catalog::{CatalogItem, InMemoryCatalog};
use intake_core::Error;
use intake_criteria::fields;
use intake_pipeline::IntakePipeline;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "intake-cli")]
#[command(about = "Qualify, match, and book against a showroom catalog", long_about = None)]
struct Args {
    /// Requested item category (e.g. sedan, SUV, truck)
    #[arg(long)]
    category: String,

    /// Requested condition (new or used)
    #[arg(long)]
    condition: String,

    /// Maximum budget
    #[arg(long)]
    budget: String,

    /// Date to book (e.g. 2025-06-01); omit to only list matches
    #[arg(long)]
    date: Option<String>,

    /// Time to book (e.g. "10:00 AM")
    #[arg(long, requires = "date")]
    time: Option<String>,

    /// Who is booking
    #[arg(long, default_value = "walk-in")]
    requester: String,

    /// Item id to book; defaults to the first match
    #[arg(long)]
    item: Option<String>,

    /// Path to a JSON catalog file; the built-in showroom is used when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn render_matches(items: &[CatalogItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "Category", "Condition", "Price"]);
    for item in items {
        table.add_row(vec![
            item.id.clone(),
            item.display_name(),
            item.category.to_string(),
            item.condition.to_string(),
            format!("${}", item.price),
        ]);
    }
    table
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    intake_utils::init_tracing_with("warn,intake_pipeline=info,intake_cli=info");

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => InMemoryCatalog::load_json(path).await?,
        None => InMemoryCatalog::with_items(inventory::demo_inventory()),
    };
    info!(items = catalog.len().await, "Catalog ready");

    let pipeline = IntakePipeline::builder()
        .catalog(Arc::new(catalog))
        .build()?;

    let mut session = pipeline.session();
    session.collect(fields::CATEGORY, &args.category)?;
    session.collect(fields::CONDITION, &args.condition)?;
    session.collect(fields::BUDGET, &args.budget)?;

    let matches = session.search().await?;
    if matches.is_empty() {
        println!(
            "No items match {} / {} within ${}. Try relaxing the criteria.",
            args.category, args.condition, args.budget
        );
        return Ok(());
    }

    println!("Matching items:\n{}", render_matches(matches.items()));

    let Some(date) = args.date else {
        return Ok(());
    };
    let time = args.time.unwrap_or_else(|| "10:00 AM".to_string());
    let item_id = args
        .item
        .unwrap_or_else(|| matches.items()[0].id.clone());

    match session.reserve(&item_id, date, time, &args.requester).await {
        Ok(reservation) => {
            println!("{}", reservation.confirmation);
            Ok(())
        }
        Err(Error::SlotConflict { item_id, date, time }) => {
            println!("{item_id} is already booked for {date} at {time}; pick another slot.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
