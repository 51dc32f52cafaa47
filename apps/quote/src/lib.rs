//! # locadora-quote
//!
//! Computes a lease invoice from JSON exports of the rental backend.
//!
//! ## Usage
//! ```bash
//! locadora-quote --lease lease.json
//! locadora-quote --lease lease.json --products products.json --rules rules.json --json
//! ```
//!
//! ## Module Organization
//! ```text
//! locadora_quote/
//! ├── lib.rs      ◄─── Argument parsing, run loop
//! ├── config.rs   ◄─── LOCADORA_* environment configuration
//! ├── render.rs   ◄─── Table output
//! └── error.rs    ◄─── QuoteError
//! ```

pub mod config;
pub mod error;
pub mod render;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use locadora_core::pricing::{build_invoice, reprice_item};
use locadora_core::validation::find_overlaps;
use locadora_core::{Lease, PricingRule, Product};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::{OutputFormat, QuoteConfig};
use error::{QuoteError, QuoteResult};

/// Locadora invoice calculator.
///
/// Computes the invoice of a lease record exported from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "locadora-quote", version, about, long_about = None)]
pub struct Args {
    /// Lease record exported from the backend
    #[arg(long, short = 'l', value_name = "PATH")]
    pub lease: PathBuf,

    /// Product list, used to price items without rates
    #[arg(long, short = 'p', value_name = "PATH")]
    pub products: Option<PathBuf>,

    /// Pricing rule list, used with --products
    #[arg(long, short = 'r', value_name = "PATH", requires = "products")]
    pub rules: Option<PathBuf>,

    /// Print the invoice as JSON
    #[arg(long)]
    pub json: bool,
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show rule selection for every item
/// - Default: INFO level
///
/// Logs go to stderr so JSON output on stdout stays parseable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the CLI with parsed arguments.
pub fn run(args: &Args) -> QuoteResult<()> {
    let mut config = QuoteConfig::from_env()?;
    if args.json {
        config.output = OutputFormat::Json;
    }

    let mut lease: Lease = load_json(&args.lease)?;
    info!(path = %args.lease.display(), items = lease.items.len(), "lease loaded");

    if let Some(products_path) = &args.products {
        let products: Vec<Product> = load_json(products_path)?;
        let rules: Vec<PricingRule> = match &args.rules {
            Some(path) => load_json(path)?,
            None => Vec::new(),
        };
        for overlap in find_overlaps(&rules) {
            warn!(first = %overlap.first, second = %overlap.second, "pricing rules overlap");
        }
        let priced = fill_missing_rates(&mut lease, &products, &rules);
        info!(priced, "items priced from catalog");
    }

    let invoice = build_invoice(&lease);
    match config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&invoice)?),
        OutputFormat::Table => print!("{}", render::render_table(&invoice, &config)),
    }
    Ok(())
}

/// Prices items that arrived without any negotiated rate, using the
/// catalog product with the same name and brand. Returns how many items
/// were priced.
pub fn fill_missing_rates(lease: &mut Lease, products: &[Product], rules: &[PricingRule]) -> usize {
    let mut priced = 0;
    for item in lease.items.iter_mut() {
        if !item.negotiated_rates().is_empty() {
            continue;
        }
        let Some(snapshot) = &item.product else {
            continue;
        };
        let product = products
            .iter()
            .find(|p| p.name == snapshot.name && p.marca == snapshot.marca);
        match product {
            Some(product) => {
                reprice_item(item, product, rules);
                priced += 1;
            }
            None => debug!(name = %snapshot.name, marca = %snapshot.marca, "no catalog product for item"),
        }
    }
    priced
}

fn load_json<T: DeserializeOwned>(path: &Path) -> QuoteResult<T> {
    let text = fs::read_to_string(path).map_err(|source| QuoteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| QuoteError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use locadora_core::{BillingPeriod, LeaseItem, Money, ProductSnapshot, RuleOperator};
    use rust_decimal::Decimal;

    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("locadora-quote").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_args() {
        let args = parse(&["-l", "lease.json", "-p", "p.json", "--rules", "r.json", "--json"]).unwrap();
        assert_eq!(args.lease, PathBuf::from("lease.json"));
        assert_eq!(args.products, Some(PathBuf::from("p.json")));
        assert_eq!(args.rules, Some(PathBuf::from("r.json")));
        assert!(args.json);

        let minimal = parse(&["--lease", "lease.json"]).unwrap();
        assert_eq!(minimal.products, None);
        assert!(!minimal.json);
    }

    #[test]
    fn test_parse_args_errors() {
        let kind = |args: &[&str]| parse(args).unwrap_err().kind();

        assert_eq!(kind(&[]), ErrorKind::MissingRequiredArgument);
        assert_eq!(kind(&["--lease"]), ErrorKind::InvalidValue);
        assert_eq!(kind(&["--lease", "a.json", "--pdf"]), ErrorKind::UnknownArgument);
        assert_eq!(kind(&["--lease", "a.json", "--rules", "r.json"]), ErrorKind::MissingRequiredArgument);
        assert_eq!(kind(&["--help"]), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_args_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_fill_missing_rates() {
        let products = vec![Product {
            id: "p1".to_string(),
            name: "Betoneira".to_string(),
            marca: "Menegotti".to_string(),
            daily_value: Some(Money::from_major(50)),
            ..Default::default()
        }];
        let rules = vec![PricingRule {
            id: "r1".to_string(),
            day_ini: 1,
            day_fin: 7,
            campo: BillingPeriod::Diario,
            operador: RuleOperator::Add,
            valor: Decimal::from(10),
            active: true,
        }];
        let snapshot = ProductSnapshot {
            name: "Betoneira".to_string(),
            marca: "Menegotti".to_string(),
        };
        let mut lease = Lease {
            items: vec![
                LeaseItem {
                    product: Some(snapshot.clone()),
                    billing_period: Some(BillingPeriod::Diario),
                    days: Some(5),
                    ..Default::default()
                },
                LeaseItem {
                    product: Some(snapshot),
                    billing_period: Some(BillingPeriod::Diario),
                    days: Some(5),
                    negotiated_diario: Some(Money::from_major(45)),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(fill_missing_rates(&mut lease, &products, &rules), 1);
        assert_eq!(lease.items[0].negotiated_diario, Some(Money::from_major(60)));
        assert_eq!(lease.items[1].negotiated_diario, Some(Money::from_major(45)));
        assert_eq!(build_invoice(&lease).subtotal, Money::from_major(300 + 225));
    }
}
