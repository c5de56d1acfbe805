use anyhow::Context;
use clap::{Parser, Subcommand};

use ecolens_off::{normalize_product, select_best_candidate, OffClient};
use ecolens_rank::rank_top_categories;

#[derive(Debug, Parser)]
#[command(name = "ecolens-cli")]
#[command(about = "EcoLens command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a product by name and print its normalized record as JSON.
    Product {
        /// Free-text product name to search for.
        name: String,
    },
    /// Rank products across categories by eco-score and print them as JSON.
    Recommend {
        /// Categories to aggregate over.
        #[arg(required = true)]
        categories: Vec<String>,
        /// Number of ranked candidates to print.
        #[arg(long, default_value_t = 3)]
        top_n: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = ecolens_core::load_app_config()?;
    let tables = match &config.rank_tables_path {
        Some(path) => ecolens_core::load_rank_tables(path)?,
        None => ecolens_core::RankTables::default(),
    };
    let client = OffClient::from_app_config(&config)?;
    match cli.command {
        Commands::Product { name } => {
            let raws = client
                .search_products(&name)
                .await
                .context("product search failed")?;
            match select_best_candidate(&raws).and_then(normalize_product) {
                Some(product) => println!("{}", serde_json::to_string_pretty(&product)?),
                None => {
                    tracing::warn!(%name, "no usable product found");
                    std::process::exit(1);
                }
            }
        }
        Commands::Recommend { categories, top_n } => {
            let ranked = rank_top_categories(
                &client,
                &tables,
                &categories,
                top_n,
                config.category_page_size,
            )
            .await;
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
    }

    Ok(())
}
