//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde_json::Value;

use super::OutputFormat;
use crate::api::FailureKind;
use crate::auth::{AccessDecision, SessionStore};
use crate::error::Error;
use crate::routes::Route;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Report a failed command, with a hint for classified API failures
pub fn report_error(context: &str, err: &Error) {
    error(&format!("{}: {}", context, err));
    match err.failure_kind() {
        Some(FailureKind::Authentication) => {
            info("The backend rejected the credential. Run 'shopfront login' to sign in again.")
        }
        Some(FailureKind::Authorization) => {
            info("Your role is not permitted to do this.")
        }
        Some(FailureKind::Server) => info("The backend failed; try again later."),
        None => {}
    }
}

/// Render a JSON value as a plain cell
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Print a JSON value in the requested format.
///
/// Tables show `columns` of each object in an array; anything else falls
/// back to pretty JSON.
pub fn print_value(value: &Value, format: OutputFormat, columns: &[&str]) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Table => match value.as_array() {
            Some(rows) if rows.is_empty() => info("Nothing to show"),
            Some(rows) if !columns.is_empty() => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(
                        columns
                            .iter()
                            .map(|c| Cell::new(c).fg(Color::Cyan))
                            .collect::<Vec<_>>(),
                    );
                for row in rows {
                    table.add_row(
                        columns
                            .iter()
                            .map(|c| Cell::new(cell_text(row.get(*c))))
                            .collect::<Vec<_>>(),
                    );
                }
                println!("{table}");
            }
            _ => println!("{}", serde_json::to_string_pretty(value)?),
        },
    }
    Ok(())
}

/// Print the current session
pub fn print_session(store: &SessionStore) {
    if !store.is_authenticated() {
        info("Not logged in. Run 'shopfront login <email-or-username>'");
        return;
    }

    let role = store
        .resolve_role()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());

    println!("{}", "Session".bold().underline());
    println!();
    if let Some(user) = store.user() {
        println!("  {} {}", "User:".bold(), user.display_name());
        if let Some(email) = &user.email {
            println!("  {} {}", "Email:".bold(), email);
        }
    }
    println!("  {} {}", "Role:".bold(), role.cyan());
    println!("  {} {}", "Token:".bold(), "present".green());
    println!();
    println!("  {} {}", "Admin:".bold(), yes_no(store.is_admin()));
    println!("  {} {}", "Delivery:".bold(), yes_no(store.is_delivery_man()));
    println!("  {} {}", "Customer:".bold(), yes_no(store.is_customer()));
}

fn yes_no(flag: bool) -> colored::ColoredString {
    if flag {
        "yes".green()
    } else {
        "no".dimmed()
    }
}

/// Print the route table with each route's requirement and the current decision
pub fn print_routes(routes: &[(Route, AccessDecision)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Path").fg(Color::Cyan),
            Cell::new("Requires").fg(Color::Cyan),
            Cell::new("Access").fg(Color::Cyan),
        ]);

    for (route, decision) in routes {
        let requires = match &route.requirement {
            None => "public".to_string(),
            Some(req) => match (&req.required_role, req.admin_only) {
                (Some(role), _) => role.to_string(),
                (None, true) => "ADMIN".to_string(),
                (None, false) if !req.allowed_roles.is_empty() => req
                    .allowed_roles
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(" | "),
                (None, false) => "login".to_string(),
            },
        };

        let (access, color) = decision_text(decision);
        table.add_row(vec![
            Cell::new(route.path),
            Cell::new(requires),
            Cell::new(access).fg(color),
        ]);
    }

    println!("{table}");
}

fn decision_text(decision: &AccessDecision) -> (String, Color) {
    match decision {
        AccessDecision::Allow => ("allow".to_string(), Color::Green),
        AccessDecision::Pending => ("pending".to_string(), Color::Yellow),
        AccessDecision::Deny { redirect } => (format!("deny → {}", redirect), Color::Red),
    }
}

/// Print a single guard decision
pub fn print_decision(path: &str, decision: &AccessDecision) {
    match decision {
        AccessDecision::Allow => success(&format!("Access to {} granted", path)),
        AccessDecision::Pending => warn(&format!("Session still loading; no decision for {}", path)),
        AccessDecision::Deny { redirect } => {
            error(&format!("Access to {} denied, redirect to {}", path, redirect))
        }
    }
}
