//! CLI argument parsing tests
//!
//! Run with: cargo test --test cli_tests

use clap::Parser;
use shopfront::cli::{CartAction, Cli, Commands, OrdersAction, OutputFormat, ProductsAction};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("shopfront").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn test_login_defaults_to_customer_endpoint() {
    match parse(&["login", "alice@example.com", "--password", "pw"]).command {
        Commands::Login {
            identifier,
            admin,
            password,
        } => {
            assert_eq!(identifier, "alice@example.com");
            assert!(!admin);
            assert_eq!(password.as_deref(), Some("pw"));
        }
        _ => panic!("expected login"),
    }
}

#[test]
fn test_admin_login_flag() {
    match parse(&["login", "admin", "--admin", "-p", "secret"]).command {
        Commands::Login { admin, .. } => assert!(admin),
        _ => panic!("expected login"),
    }
}

#[test]
fn test_access_takes_a_path() {
    match parse(&["access", "/admin/orders"]).command {
        Commands::Access { path } => assert_eq!(path, "/admin/orders"),
        _ => panic!("expected access"),
    }
}

#[test]
fn test_list_format_values() {
    match parse(&["products", "list", "--format", "yaml"]).command {
        Commands::Products {
            action: ProductsAction::List { format },
        } => assert!(matches!(format, OutputFormat::Yaml)),
        _ => panic!("expected products list"),
    }

    match parse(&["orders", "mine"]).command {
        Commands::Orders {
            action: OrdersAction::Mine { format },
        } => assert!(matches!(format, OutputFormat::Table)),
        _ => panic!("expected orders mine"),
    }
}

#[test]
fn test_order_status_with_reason() {
    match parse(&["orders", "status", "7", "CANCELLED", "--reason", "duplicate"]).command {
        Commands::Orders {
            action: OrdersAction::Status { id, status, reason },
        } => {
            assert_eq!(id, 7);
            assert_eq!(status, "CANCELLED");
            assert_eq!(reason.as_deref(), Some("duplicate"));
        }
        _ => panic!("expected orders status"),
    }
}

#[test]
fn test_cart_add_quantity_optional() {
    match parse(&["cart", "add", "12"]).command {
        Commands::Cart {
            action: CartAction::Add {
                product_id,
                quantity,
            },
        } => {
            assert_eq!(product_id, 12);
            assert_eq!(quantity, None);
        }
        _ => panic!("expected cart add"),
    }
}

#[test]
fn test_invalid_arguments_rejected() {
    let bin = std::iter::once("shopfront");
    assert!(Cli::try_parse_from(bin.clone().chain(["cart", "add", "not-a-number"])).is_err());
    assert!(Cli::try_parse_from(bin.clone().chain(["whoami", "--format", "xml"])).is_err());
    assert!(Cli::try_parse_from(bin.chain(["frobnicate"])).is_err());
}
