use clap::Parser;
use middleman::application::engine::TransactionEngine;
use middleman::application::service::TraderService;
use middleman::config::EngineConfig;
use middleman::domain::order::Order;
use middleman::domain::ports::{ProductCatalogBox, TraderStoreBox};
use middleman::domain::product::Product;
use middleman::infrastructure::in_memory::{InMemoryProductCatalog, InMemoryTraderStore};
use middleman::interfaces::csv::TraderSeed;
use middleman::interfaces::csv::record_reader::RecordReader;
use middleman::interfaces::csv::trader_writer::TraderWriter;
use middleman::telemetry;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product catalog CSV file
    products: PathBuf,

    /// Traders CSV file (name, company, balance)
    traders: PathBuf,

    /// Order script CSV file
    orders: PathBuf,

    /// JSON file overriding the engine's economic constants
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => EngineConfig::from_path(path).into_diagnostic()?,
        None => EngineConfig::default(),
    };

    let traders: TraderStoreBox = Box::new(InMemoryTraderStore::new());
    let catalog: ProductCatalogBox = Box::new(InMemoryProductCatalog::new());
    let engine = TransactionEngine::new(config).into_diagnostic()?;
    let service = TraderService::new(engine, traders, catalog);

    let file = File::open(cli.products).into_diagnostic()?;
    for product in RecordReader::new(file).records::<Product>() {
        match product {
            Ok(product) => service.add_product(product).await.into_diagnostic()?,
            Err(e) => tracing::warn!("Error reading product: {}", e),
        }
    }

    let file = File::open(cli.traders).into_diagnostic()?;
    for seed in RecordReader::new(file).records::<TraderSeed>() {
        match seed {
            Ok(seed) => {
                if let Err(e) = service
                    .create_and_store_trader(&seed.name, &seed.company, seed.balance)
                    .await
                {
                    tracing::warn!("Error registering trader: {}", e);
                }
            }
            Err(e) => tracing::warn!("Error reading trader: {}", e),
        }
    }

    let file = File::open(cli.orders).into_diagnostic()?;
    for order in RecordReader::new(file).records::<Order>() {
        match order {
            Ok(order) => {
                if let Err(e) = service.process_order(order).await {
                    tracing::warn!("Error processing order: {}", e);
                }
            }
            Err(e) => tracing::warn!("Error reading order: {}", e),
        }
    }

    let active = service.retrieve_traders().await.into_diagnostic()?;
    let bankrupt = service.retrieve_bankrupt_traders().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = TraderWriter::new(stdout.lock());
    writer.write_traders(&active, &bankrupt).into_diagnostic()?;

    Ok(())
}
