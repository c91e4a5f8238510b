use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::product::ProductId;

#[derive(Parser)]
#[command(name = "shopping-cart")]
#[command(about = "Browse a product catalog and build a shopping cart in the terminal")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON catalog file (overrides CATALOG_PATH)
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the products available for purchase
    Catalog,
    /// Build a cart from the command line and print its totals
    Quote {
        /// Add one unit of a product; repeat to add more
        #[arg(short, long = "add", value_name = "ID")]
        add: Vec<ProductId>,
        /// Set an absolute quantity after all adds (ID=QTY, QTY <= 0 removes)
        #[arg(short, long = "set", value_name = "ID=QTY", value_parser = parse_quantity_spec)]
        set: Vec<QuantitySpec>,
        /// Print the cart as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Start an interactive shopping session
    Shop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySpec {
    pub product_id: ProductId,
    pub quantity: i64,
}

pub fn parse_quantity_spec(raw: &str) -> Result<QuantitySpec, String> {
    let (id, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{}'", raw))?;

    let product_id = id
        .trim()
        .parse::<ProductId>()
        .map_err(|_| format!("invalid product id '{}'", id.trim()))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid quantity '{}'", quantity.trim()))?;

    Ok(QuantitySpec {
        product_id,
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_spec() {
        assert_eq!(
            parse_quantity_spec("2=5"),
            Ok(QuantitySpec { product_id: 2, quantity: 5 })
        );
        assert_eq!(
            parse_quantity_spec(" 1 = -3 "),
            Ok(QuantitySpec { product_id: 1, quantity: -3 })
        );
    }

    #[test]
    fn test_parse_quantity_spec_rejects_garbage() {
        assert!(parse_quantity_spec("5").is_err());
        assert!(parse_quantity_spec("x=1").is_err());
        assert!(parse_quantity_spec("1=1.5").is_err());
    }

    #[test]
    fn test_quote_args() {
        let args = Args::try_parse_from([
            "shopping-cart", "quote", "--add", "1", "-a", "2", "--set", "1=3", "--json",
        ])
        .unwrap();
        match args.command {
            Commands::Quote { add, set, json } => {
                assert_eq!(add, vec![1, 2]);
                assert_eq!(set, vec![QuantitySpec { product_id: 1, quantity: 3 }]);
                assert!(json);
            }
            _ => panic!("expected quote command"),
        }
    }
}
