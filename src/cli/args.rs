//! CLI argument definitions using clap derive

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Ostriv - storefront catalog client
///
/// Reads categories and products from the Ostriv CMS through a cache that
/// keeps serving the last known data while the CMS is unreachable.
#[derive(Parser, Debug)]
#[command(name = "ostriv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "OSTRIV_CONFIG")]
    pub config: Option<PathBuf>,

    /// CMS base URL (overrides config and environment)
    #[arg(long, global = true)]
    pub cms_url: Option<String>,

    /// Public storefront URL
    #[arg(long, global = true, env = "OSTRIV_SITE_URL")]
    pub site_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog categories in menu order
    Categories(CategoriesArgs),

    /// List products
    Products(ProductsArgs),

    /// Show one product
    Product(ProductArgs),

    /// Search products the way the storefront search box does
    Search(SearchArgs),

    /// Print the storefront sitemap
    Sitemap(SitemapArgs),

    /// Send a contact request to the CMS
    Contact(ContactArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the categories command
#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Which products to list
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct ProductFilter {
    /// Only bestsellers
    #[arg(long)]
    pub hit: bool,

    /// Only new arrivals
    #[arg(long)]
    pub new: bool,

    /// Only products in this category (slug)
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the products command
#[derive(Parser, Debug)]
pub struct ProductsArgs {
    #[command(flatten)]
    pub filter: ProductFilter,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the product command
#[derive(Parser, Debug)]
pub struct ProductArgs {
    /// Product slug
    pub slug: String,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search text (omit with --stdin)
    #[arg(required_unless_present = "stdin")]
    pub query: Option<String>,

    /// Read successive search box contents from stdin, one per line
    #[arg(long, conflicts_with = "query")]
    pub stdin: bool,

    /// Submit the search and print where it leads
    #[arg(long)]
    pub submit: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the sitemap command
#[derive(Parser, Debug)]
pub struct SitemapArgs {
    /// Output format
    #[arg(short, long, default_value = "xml")]
    pub format: SitemapFormat,
}

/// Arguments for the contact command
#[derive(Parser, Debug)]
pub struct ContactArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Phone number to call back
    #[arg(long)]
    pub phone: String,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Message text
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.ttl_secs)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Output format for the sitemap
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SitemapFormat {
    /// Sitemap protocol XML
    Xml,
    /// JSON array of entries
    Json,
}
