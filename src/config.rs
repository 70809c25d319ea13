//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! The library itself never reads the environment; the binary turns this
//! configuration into [`AuthenticationOptions`].
//!
//! ## Example
//!
//! ```bash
//! export TICKET_SIGNING_SECRET="change-me"
//! export AUTH_AUDIENCES="http://www.example.com,urn:orders"
//! export AUTH_REALM="orders"
//! ```
//!
//! ## Required Variables
//!
//! - `TICKET_SIGNING_SECRET` - HMAC key used to verify bearer tickets
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `AUTH_AUDIENCES` - Comma-separated acceptable audiences (default: accept any)
//! - `AUTH_REALM` - Realm advertised in challenges (default: none)
//! - `AUTH_INCLUDE_ERROR_DETAILS` - Emit `error_description` in challenges (default: `true`)
//! - `AUTH_SAVE_TOKEN` - Keep the raw token in ticket properties (default: `false`)
//! - `AUTH_SCHEME` - Authentication scheme name (default: `Bearer`)

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;

use crate::domain::options::{AuthenticationOptions, DEFAULT_SCHEME};
use crate::domain::ports::TicketUnprotector;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// HMAC signing secret used to verify bearer tickets.
    /// Loaded from `TICKET_SIGNING_SECRET`. Must be non-empty.
    pub ticket_signing_secret: String,

    // ── Authentication options ──────────────────────────────────────────────
    /// Acceptable audiences; empty accepts tickets for any audience.
    pub audiences: Vec<String>,
    pub realm: Option<String>,
    pub include_error_details: bool,
    pub save_token: bool,
    pub authentication_scheme: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TICKET_SIGNING_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let ticket_signing_secret =
            env::var("TICKET_SIGNING_SECRET").context("TICKET_SIGNING_SECRET must be set")?;

        let audiences = env::var("AUTH_AUDIENCES")
            .map(|v| parse_list(&v))
            .unwrap_or_default();

        let realm = env::var("AUTH_REALM").ok().filter(|r| !r.is_empty());

        let include_error_details = env::var("AUTH_INCLUDE_ERROR_DETAILS")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let save_token = env::var("AUTH_SAVE_TOKEN")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let authentication_scheme =
            env::var("AUTH_SCHEME").unwrap_or_else(|_| DEFAULT_SCHEME.to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            ticket_signing_secret,
            audiences,
            realm,
            include_error_details,
            save_token,
            authentication_scheme,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `ticket_signing_secret` is empty
    /// - `authentication_scheme` is empty or contains whitespace
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.ticket_signing_secret.is_empty() {
            anyhow::bail!("TICKET_SIGNING_SECRET must not be empty");
        }

        if self.authentication_scheme.is_empty()
            || self.authentication_scheme.contains(char::is_whitespace)
        {
            anyhow::bail!(
                "AUTH_SCHEME must be a single non-empty token, got '{}'",
                self.authentication_scheme
            );
        }

        Ok(())
    }

    /// Builds frozen authentication options backed by `unprotector`.
    pub fn authentication_options(
        &self,
        unprotector: Arc<dyn TicketUnprotector>,
    ) -> AuthenticationOptions {
        let mut builder = AuthenticationOptions::builder(unprotector)
            .audiences(self.audiences.iter().cloned())
            .include_error_details(self.include_error_details)
            .save_token(self.save_token)
            .authentication_scheme(self.authentication_scheme.clone());

        if let Some(ref realm) = self.realm {
            builder = builder.realm(realm.clone());
        }

        builder.build()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Ticket signing secret: {}",
            mask_secret(&self.ticket_signing_secret)
        );
        tracing::info!("  Authentication scheme: {}", self.authentication_scheme);

        if self.audiences.is_empty() {
            tracing::info!("  Audiences: any");
        } else {
            tracing::info!("  Audiences: {}", self.audiences.join(", "));
        }

        tracing::info!("  Realm: {}", self.realm.as_deref().unwrap_or("none"));
        tracing::info!("  Include error details: {}", self.include_error_details);
        tracing::info!("  Save token: {}", self.save_token);
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Masks a secret for logging, keeping only its length visible.
///
/// - `""` → `<empty>`
/// - `"s3cr3t"` → `*** (6 chars)`
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        "<empty>".to_string()
    } else {
        format!("*** ({} chars)", secret.chars().count())
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
