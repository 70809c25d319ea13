//! CLI administration tool for bearer-gate.
//!
//! Provides commands for creating and inspecting bearer tickets and for
//! checking the service configuration without starting the server.
//!
//! # Usage
//!
//! ```bash
//! # Create a signed ticket for local testing
//! cargo run --bin admin -- ticket create --subject alice --audience http://www.example.com
//!
//! # Decode and verify a ticket
//! cargo run --bin admin -- ticket inspect "<token>"
//!
//! # Validate and print the configuration
//! cargo run --bin admin -- config check
//! ```
//!
//! # Environment Variables
//!
//! - `TICKET_SIGNING_SECRET` (required): HMAC key shared with the server
//!
//! # Features
//!
//! - **Ticket Tools**: Create and inspect HMAC signed tickets
//! - **Configuration Check**: Same validation the server runs at startup
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use bearer_gate::config;
use bearer_gate::domain::entities::{AuthenticationProperties, Identity, Ticket};
use bearer_gate::domain::ports::TicketUnprotector;
use bearer_gate::infrastructure::format::HmacTicketFormat;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing bearer-gate.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create and inspect bearer tickets
    Ticket {
        #[command(subcommand)]
        action: TicketAction,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Ticket subcommands.
#[derive(Subcommand)]
enum TicketAction {
    /// Create a signed ticket
    Create {
        /// Subject claim (`sub`)
        #[arg(short, long)]
        subject: String,

        /// Audience the ticket is issued for (repeatable)
        #[arg(short, long)]
        audience: Vec<String>,

        /// Granted scope (repeatable)
        #[arg(long)]
        scope: Vec<String>,

        /// Lifetime in minutes
        #[arg(short, long, default_value_t = 60)]
        ttl: i64,
    },

    /// Decode and verify a ticket
    Inspect {
        /// Raw bearer token
        token: String,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Validate configuration from the environment
    Check,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ticket { action } => handle_ticket_action(action)?,
        Commands::Config { action } => handle_config_action(action)?,
    }

    Ok(())
}

/// Dispatches ticket commands.
fn handle_ticket_action(action: TicketAction) -> Result<()> {
    let secret =
        std::env::var("TICKET_SIGNING_SECRET").context("TICKET_SIGNING_SECRET must be set")?;
    let format = HmacTicketFormat::new(secret);

    match action {
        TicketAction::Create {
            subject,
            audience,
            scope,
            ttl,
        } => create_ticket(&format, subject, audience, scope, ttl),
        TicketAction::Inspect { token } => inspect_ticket(&format, &token),
    }
}

fn create_ticket(
    format: &HmacTicketFormat,
    subject: String,
    audiences: Vec<String>,
    scopes: Vec<String>,
    ttl_minutes: i64,
) -> Result<()> {
    if ttl_minutes <= 0 {
        anyhow::bail!("--ttl must be positive, got {}", ttl_minutes);
    }

    let now = Utc::now();
    let mut properties = AuthenticationProperties::new();
    properties.set_issued_at(now);
    properties.set_expires_at(now + Duration::minutes(ttl_minutes));
    if !audiences.is_empty() {
        properties.set_audiences(audiences);
    }
    if !scopes.is_empty() {
        properties.set_scopes(scopes);
    }

    let ticket = Ticket::new(Identity::new().with_claim("sub", subject), properties);
    let token = format
        .protect(&ticket)
        .context("Failed to protect ticket")?;

    println!("{}", "✅ Ticket created successfully!".green().bold());
    println!();
    print_ticket(&ticket);
    println!();
    println!("{}", "Token:".bold());
    println!("  {}", token.yellow());
    println!();
    println!(
        "{}",
        "Use it as: Authorization: Bearer <token>".bright_black()
    );

    Ok(())
}

fn inspect_ticket(format: &HmacTicketFormat, token: &str) -> Result<()> {
    let ticket = format
        .unprotect(token.trim())
        .context("Failed to unprotect ticket")?;

    match ticket {
        Some(ticket) => {
            println!("{}", "✅ Signature valid".green().bold());
            println!();
            print_ticket(&ticket);

            if let Some(expires_at) = ticket.properties.expires_at()
                && expires_at < Utc::now()
            {
                println!();
                println!("{}", "⚠️  Ticket has expired".yellow().bold());
            }
        }
        None => {
            println!(
                "{}",
                "❌ Token is malformed or was signed with another secret".red()
            );
        }
    }

    Ok(())
}

fn print_ticket(ticket: &Ticket) {
    println!("{}", "Claims:".bold());
    for claim in ticket.identity.claims() {
        println!("  {} = {}", claim.claim_type.cyan(), claim.value);
    }

    println!("{}", "Properties:".bold());
    if ticket.properties.is_empty() {
        println!("  {}", "(none)".bright_black());
    }
    for (key, value) in ticket.properties.iter() {
        println!("  {} = {}", key.cyan(), value);
    }
}

/// Dispatches configuration commands.
fn handle_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check => {
            let config = config::load_from_env()?;

            println!("{}", "✅ Configuration OK".green().bold());
            println!();
            println!("{:<24} {}", "Listen address:".bold(), config.listen_addr);
            println!("{:<24} {}", "Log format:".bold(), config.log_format);
            println!(
                "{:<24} {}",
                "Signing secret:".bold(),
                config::mask_secret(&config.ticket_signing_secret)
            );
            println!(
                "{:<24} {}",
                "Scheme:".bold(),
                config.authentication_scheme
            );
            println!(
                "{:<24} {}",
                "Audiences:".bold(),
                if config.audiences.is_empty() {
                    "any".to_string()
                } else {
                    config.audiences.join(", ")
                }
            );
            println!(
                "{:<24} {}",
                "Realm:".bold(),
                config.realm.as_deref().unwrap_or("none")
            );
            println!(
                "{:<24} {}",
                "Include error details:".bold(),
                config.include_error_details
            );
            println!("{:<24} {}", "Save token:".bold(), config.save_token);
        }
    }

    Ok(())
}
