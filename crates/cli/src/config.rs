//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use crumb::pickup::PickupDetails;
use rust_decimal::Decimal;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "CRUMB_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Crumb bakery cart
#[derive(Debug, Parser)]
#[command(name = "crumb", about = "Bakery order cart", long_about = None)]
pub(crate) struct Cli {
    /// JSON file the cart is persisted in
    #[arg(
        long,
        env = "CRUMB_STORAGE_PATH",
        default_value = "crumb-cart.json",
        global = true
    )]
    pub storage_path: PathBuf,

    /// Optional cart settings file (YAML)
    #[arg(long, env = "CRUMB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Optional menu file (YAML); the built-in bakery menu is used otherwise
    #[arg(long, env = "CRUMB_MENU", global = true)]
    pub menu: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List the menu
    Menu,

    /// Add an item to the cart
    Add(AddArgs),

    /// Remove an item from the cart
    Remove(RemoveArgs),

    /// Show the short cart preview
    Preview,

    /// Show the checkout table and totals
    Show,

    /// Place the order
    Checkout(CheckoutArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Item key or favourite name
    pub key: String,

    /// Quantity to add
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub qty: i64,

    /// Display name for items not on the menu
    #[arg(long)]
    pub name: Option<String>,

    /// Unit price for items not on the menu
    #[arg(long)]
    pub price: Option<Decimal>,
}

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Item key
    pub key: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Default, Args)]
pub(crate) struct CheckoutArgs {
    /// Customer name
    #[arg(long)]
    pub name: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Pickup time
    #[arg(long)]
    pub pickup: Option<String>,

    /// Order notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<&CheckoutArgs> for PickupDetails {
    fn from(args: &CheckoutArgs) -> Self {
        let value = |field: &Option<String>| field.clone().unwrap_or_default();

        Self {
            name: value(&args.name),
            email: value(&args.email),
            phone: value(&args.phone),
            pickup: value(&args.pickup),
            notes: value(&args.notes),
        }
    }
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
