//! fee-engine - marketplace final value fee calculator
//!
//! Run without arguments to print the illustrative calculations, one JSON
//! result per line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fee_engine::calculation::calculate_fee;
use fee_engine::config::{ConfigLoader, RuleTable};
use fee_engine::models::FeeRequest;
use rust_decimal::Decimal;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fee-engine",
    version,
    about = "Marketplace final value fee calculator"
)]
struct Cli {
    /// Directory containing a fee_rules.yaml to use instead of the built-in table
    #[arg(long, global = true, env = "FEE_ENGINE_RULES")]
    rules: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the fees for one sale
    #[command(alias = "c")]
    Calc {
        /// Marketplace category (unknown categories use "most")
        #[arg(long, default_value = "most")]
        category: String,

        /// Item price
        #[arg(long)]
        price: Decimal,

        /// Shipping charged to the buyer
        #[arg(long, default_value = "0")]
        shipping: Decimal,

        /// Seller has a store subscription
        #[arg(long)]
        store: bool,

        /// Buyer is international
        #[arg(long)]
        international: bool,

        /// Print the breakdown and audit trail as well
        #[arg(long)]
        explain: bool,
    },

    /// List the categories in the fee table
    Categories,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(cli.verbose, directives.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let loaded;
    let table = match &cli.rules {
        Some(dir) => {
            loaded = ConfigLoader::load(dir)
                .with_context(|| format!("loading fee rules from {}", dir.display()))?
                .into_table();
            &loaded
        }
        None => RuleTable::builtin(),
    };

    match cli.command {
        None => {
            for request in demo_requests() {
                let result = calculate_fee(&request, table);
                println!("{}", serde_json::to_string(&result.summary())?);
            }
        }

        Some(Commands::Calc {
            category,
            price,
            shipping,
            store,
            international,
            explain,
        }) => {
            let request = FeeRequest::new(store, category, price)
                .with_shipping(shipping)
                .with_international(international);
            request.validate()?;

            let result = calculate_fee(&request, table);
            if explain {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", serde_json::to_string(&result.summary())?);
            }
        }

        Some(Commands::Categories) => {
            let metadata = table.metadata();
            println!("{} fee table (effective {})\n", metadata.marketplace, metadata.version);
            println!("{:<24} {:<10}", "Category", "Mode");
            println!("{:-<24} {:-<10}", "", "");

            for schedule in table.schedules() {
                println!("{:<24} {:<10}", schedule.category, schedule.mode().to_string());
            }
        }
    }

    Ok(())
}

/// `--verbose` wins; otherwise `RUST_LOG` directives apply, defaulting to `warn`.
fn log_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new(Level::DEBUG.to_string());
    }

    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(Level::WARN.to_string()))
}

fn demo_requests() -> Vec<FeeRequest> {
    vec![
        FeeRequest::new(true, "electronics", Decimal::from(200)).with_shipping(Decimal::from(10)),
        FeeRequest::new(false, "athletic_shoes", Decimal::from(180)).with_international(true),
        FeeRequest::new(true, "watches", Decimal::from(6000)).with_shipping(Decimal::from(20)),
    ]
}
