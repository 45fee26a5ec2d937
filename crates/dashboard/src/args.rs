use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use storefront_catalog::{FilterCriteria, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
use storefront_core::{DomainResult, ProductId};

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Product catalog dashboard for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog API base URL (overrides STOREFRONT_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Read products from a JSON file in the catalog API shape instead of the API
    #[arg(long, global = true, value_name = "PATH")]
    pub products_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Stat cards followed by the first page of products
    Dashboard,

    /// Catalog statistics
    Stats,

    /// List product categories
    Categories,

    /// Filter and page through products
    #[command(alias = "ls")]
    Products(FilterArgs),

    /// Product detail page
    Show {
        /// Product id
        id: ProductId,
    },

    /// Interactive browsing (reads events from stdin)
    Browse,
}

#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct FilterArgs {
    /// Match title or description (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact category name
    #[arg(short, long)]
    pub category: Option<String>,

    /// Lowest price to include [default: 0]
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price to include [default: 1000]
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Drop the upper price bound
    #[arg(long, conflicts_with = "max_price")]
    pub no_max_price: bool,

    /// Minimum star rating
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

impl FilterArgs {
    /// Merge the flags onto the default criteria.
    pub fn criteria(&self) -> DomainResult<FilterCriteria> {
        let criteria = FilterCriteria {
            search: self.search.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            min_price: Some(self.min_price.unwrap_or(DEFAULT_MIN_PRICE)),
            max_price: if self.no_max_price {
                None
            } else {
                Some(self.max_price.unwrap_or(DEFAULT_MAX_PRICE))
            },
            rating: self.rating,
        };
        criteria.validate()?;
        Ok(criteria)
    }
}
