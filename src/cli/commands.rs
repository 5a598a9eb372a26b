//! CLI command implementations

use anyhow::{Context as _, Result};
use serde_json::Value;
use std::fs;
use std::sync::Arc;

use crate::api::{ApiClient, AuthResponse, LoginRequest};
use crate::auth::{FileStorage, Role, SessionStore};
use crate::cli::{
    info, print_decision, print_routes, print_session, print_value, report_error, success, warn,
    CartAction, DeliveryAction, OrdersAction, OutputFormat, ProductsAction, ReportsAction,
};
use crate::config::{self, Config};
use crate::error::Error;
use crate::routes;

const PRODUCT_COLUMNS: &[&str] = &["id", "name", "price", "stockQuantity", "expiryDate"];
const ORDER_COLUMNS: &[&str] = &["id", "orderNumber", "status", "totalAmount", "createdAt"];

/// Configuration, session and client for one command
struct Context {
    store: SessionStore,
    client: ApiClient,
}

fn open() -> Result<Context> {
    let config = load_config()?;
    let storage = Arc::new(FileStorage::new(&config.storage.dir));
    let store = SessionStore::open(storage.clone());
    let client = ApiClient::new(config.api.clone().into(), storage)?;
    Ok(Context { store, client })
}

fn load_config() -> Result<Config> {
    config::load_config_or_default().map_err(|e| anyhow::anyhow!("{}", e))
}

/// Run an API call, reporting failures the same way for every command
async fn call<F>(context: &str, fut: F) -> Result<Value>
where
    F: std::future::Future<Output = crate::error::Result<Value>>,
{
    match fut.await {
        Ok(value) => Ok(value),
        Err(e) => {
            report_error(context, &e);
            Err(e.into())
        }
    }
}

/// Create a shopfront.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("shopfront.toml already exists");
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success("Created shopfront.toml");
    info("Set api.base_url (or SHOPFRONT_API_URL) and run 'shopfront login <email-or-username>'");

    Ok(())
}

/// Sign in against the customer or admin endpoint and persist the session
pub async fn login(identifier: &str, admin: bool, password: Option<String>) -> Result<()> {
    let mut ctx = open()?;

    let password = match password {
        Some(p) => p,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password")?,
    };

    let request = LoginRequest::new(identifier, password);
    let response = if admin {
        call("Admin login failed", ctx.client.admin_login(&request)).await?
    } else {
        call("Login failed", ctx.client.customer_login(&request)).await?
    };

    let auth = AuthResponse::from_value(response)?;
    ctx.store.login(auth.token, auth.user)?;

    if admin && !ctx.store.is_admin() {
        warn("Logged in, but the account is not an administrator");
    }

    let role = ctx
        .store
        .resolve_role()
        .unwrap_or(Role::Customer);
    success(&format!(
        "Logged in as {} ({})",
        ctx.store.user().map(|u| u.display_name()).unwrap_or(identifier),
        role
    ));
    Ok(())
}

/// Clear the persisted session
pub async fn logout() -> Result<()> {
    let mut ctx = open()?;
    if !ctx.store.is_authenticated() {
        info("Not logged in");
    }
    ctx.store.logout()?;
    success("Logged out");
    Ok(())
}

/// Show the current session
pub async fn whoami(format: OutputFormat) -> Result<()> {
    let ctx = open()?;
    match format {
        OutputFormat::Table => print_session(&ctx.store),
        _ => {
            let session = ctx.store.session();
            let value = serde_json::json!({
                "authenticated": ctx.store.is_authenticated(),
                "user": session.user,
                "role": ctx.store.resolve_role(),
                "admin": ctx.store.is_admin(),
                "deliveryMan": ctx.store.is_delivery_man(),
                "customer": ctx.store.is_customer(),
            });
            print_value(&value, format, &[])?;
        }
    }
    Ok(())
}

/// List every route with the current session's access
pub async fn list_routes() -> Result<()> {
    let ctx = open()?;
    let rows = routes::route_table()
        .into_iter()
        .map(|route| {
            let decision = routes::check_path(&ctx.store, route.path)
                .unwrap_or(crate::auth::AccessDecision::Allow);
            (route, decision)
        })
        .collect::<Vec<_>>();
    print_routes(&rows);
    Ok(())
}

/// Check a single route
pub async fn access(path: &str) -> Result<()> {
    let ctx = open()?;
    let decision = routes::check_path(&ctx.store, path)
        .ok_or_else(|| Error::RouteNotFound(path.to_string()))?;
    print_decision(path, &decision);
    Ok(())
}

pub async fn products(action: ProductsAction) -> Result<()> {
    let ctx = open()?;
    match action {
        ProductsAction::List { format } => {
            let products = call("Failed to list products", ctx.client.get_products()).await?;
            print_value(&products, format, PRODUCT_COLUMNS)?;
        }
        ProductsAction::Show { id } => {
            let product = call("Failed to fetch product", ctx.client.get_product(id)).await?;
            print_value(&product, OutputFormat::Json, &[])?;
        }
        ProductsAction::Upload { file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let result = call(
                "Failed to upload image",
                ctx.client.upload_product_image(file_name, bytes),
            )
            .await?;
            success("Image uploaded");
            print_value(&result, OutputFormat::Json, &[])?;
        }
    }
    Ok(())
}

pub async fn orders(action: OrdersAction) -> Result<()> {
    let ctx = open()?;
    match action {
        OrdersAction::Mine { format } => {
            let orders = call("Failed to list orders", ctx.client.get_my_orders()).await?;
            print_value(&orders, format, ORDER_COLUMNS)?;
        }
        OrdersAction::All { format } => {
            let orders = call("Failed to list orders", ctx.client.get_all_orders()).await?;
            print_value(&orders, format, ORDER_COLUMNS)?;
        }
        OrdersAction::Show { id } => {
            let order = call("Failed to fetch order", ctx.client.get_order(id)).await?;
            print_value(&order, OutputFormat::Json, &[])?;
        }
        OrdersAction::Track {
            reference,
            tracking_id,
        } => {
            let order = if tracking_id {
                call(
                    "Failed to track order",
                    ctx.client.get_order_by_tracking_id(&reference),
                )
                .await?
            } else {
                call(
                    "Failed to track order",
                    ctx.client.get_order_by_order_number(&reference),
                )
                .await?
            };
            print_value(&order, OutputFormat::Json, &[])?;
        }
        OrdersAction::Status { id, status, reason } => {
            call(
                "Failed to update order",
                ctx.client.update_order_status(id, status.as_str(), reason),
            )
            .await?;
            success(&format!("Order {} set to {}", id, status));
        }
    }
    Ok(())
}

pub async fn cart(action: CartAction) -> Result<()> {
    let ctx = open()?;
    match action {
        CartAction::Show => {
            let cart = call("Failed to fetch cart", ctx.client.get_cart()).await?;
            print_value(&cart, OutputFormat::Json, &[])?;
        }
        CartAction::Add {
            product_id,
            quantity,
        } => {
            call(
                "Failed to add to cart",
                ctx.client.add_to_cart(product_id, quantity),
            )
            .await?;
            success(&format!("Added product {} to cart", product_id));
        }
        CartAction::Update { item_id, quantity } => {
            call(
                "Failed to update cart item",
                ctx.client.update_cart_item(item_id, quantity),
            )
            .await?;
            success(&format!("Item {} quantity set to {}", item_id, quantity));
        }
        CartAction::Remove { item_id } => {
            call("Failed to remove cart item", ctx.client.remove_cart_item(item_id)).await?;
            success(&format!("Removed item {}", item_id));
        }
        CartAction::Clear => {
            call("Failed to clear cart", ctx.client.clear_cart()).await?;
            success("Cart cleared");
        }
    }
    Ok(())
}

pub async fn delivery(action: DeliveryAction) -> Result<()> {
    let ctx = open()?;
    match action {
        DeliveryAction::Mine { format } => {
            let orders = call(
                "Failed to list deliveries",
                ctx.client.get_my_delivery_orders(),
            )
            .await?;
            print_value(&orders, format, ORDER_COLUMNS)?;
        }
        DeliveryAction::Available { format } => {
            let orders = call(
                "Failed to list available orders",
                ctx.client.get_available_orders(),
            )
            .await?;
            print_value(&orders, format, ORDER_COLUMNS)?;
        }
        DeliveryAction::Accept { order_id } => {
            call("Failed to accept order", ctx.client.accept_order(order_id)).await?;
            success(&format!("Accepted order {}", order_id));
        }
        DeliveryAction::Status { order_id, status } => {
            call(
                "Failed to update delivery",
                ctx.client
                    .update_delivery_order_status(order_id, status.as_str()),
            )
            .await?;
            success(&format!("Order {} set to {}", order_id, status));
        }
    }
    Ok(())
}

pub async fn reports(action: ReportsAction) -> Result<()> {
    let ctx = open()?;
    match action {
        ReportsAction::Summary => {
            let summary = call("Failed to fetch summary", ctx.client.get_summary()).await?;
            print_value(&summary, OutputFormat::Json, &[])?;
        }
    }
    Ok(())
}
