//! CLI interface for Shopfront

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(version)]
#[command(about = "Storefront and delivery backend client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a shopfront.toml configuration file
    Init,

    /// Sign in and persist the session
    Login {
        /// Email or username
        identifier: String,

        /// Use the admin login endpoint
        #[arg(long)]
        admin: bool,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "SHOPFRONT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Clear the persisted session
    Logout,

    /// Show the current session
    Whoami {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List application routes and whether the current session may open them
    Routes,

    /// Check whether the current session may open a route
    Access {
        /// Route path, e.g. /admin/orders
        path: String,
    },

    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },

    /// Place, inspect and track orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },

    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },

    /// Courier workflow
    Delivery {
        #[command(subcommand)]
        action: DeliveryAction,
    },

    /// Admin reports
    Reports {
        #[command(subcommand)]
        action: ReportsAction,
    },
}

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List all products
    List {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one product
    Show { id: i64 },

    /// Upload a product image
    Upload {
        /// Image file to upload
        file: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
pub enum OrdersAction {
    /// Orders of the logged-in customer
    Mine {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Every order (admin)
    All {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one order
    Show { id: i64 },

    /// Look up an order by order number or tracking id
    Track {
        reference: String,

        /// Treat the reference as a tracking id
        #[arg(long)]
        tracking_id: bool,
    },

    /// Change an order's status (admin)
    Status {
        id: i64,
        status: String,

        /// Reason, for cancellations
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart
    Show,

    /// Add a product
    Add {
        product_id: i64,

        #[arg(short, long)]
        quantity: Option<u32>,
    },

    /// Change an item's quantity
    Update { item_id: i64, quantity: u32 },

    /// Remove an item
    Remove { item_id: i64 },

    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
pub enum DeliveryAction {
    /// Orders assigned to me
    Mine {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Orders waiting for a courier
    Available {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Accept an available order
    Accept { order_id: i64 },

    /// Update the status of an assigned order
    Status { order_id: i64, status: String },
}

#[derive(Subcommand)]
pub enum ReportsAction {
    /// Dashboard summary
    Summary,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
