//! Server configuration loaded from environment variables.

use serde::Deserialize;
use std::net::SocketAddr;

use crate::error::{ApiError, ApiResult};

const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the sheetbridge server.
///
/// Read once at startup from the environment:
/// - `SHEETBRIDGE_BIND`: bind address (default `0.0.0.0`)
/// - `PORT` or `SHEETBRIDGE_PORT`: listen port (default `8080`)
/// - `SHEETBRIDGE_CREDENTIALS`: path to the service-account key file (required)
/// - `SHEETBRIDGE_NOTIFY_EMAILS`: comma-separated share recipients
/// - `SHEETBRIDGE_EMAILS_FILE`: JSON file with `{"emails": [...]}`, used when
///   the inline list is absent
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    pub port: u16,
    pub credentials_path: String,
    pub notify_emails: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmailsFile {
    emails: Vec<String>,
}

impl ApiConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> ApiResult<Self> {
        let bind = std::env::var("SHEETBRIDGE_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

        let port = match std::env::var("PORT").or_else(|_| std::env::var("SHEETBRIDGE_PORT")) {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        let credentials_path = std::env::var("SHEETBRIDGE_CREDENTIALS").map_err(|_| {
            ApiError::invalid_input("SHEETBRIDGE_CREDENTIALS must point to a service-account key file")
        })?;

        let notify_emails = match std::env::var("SHEETBRIDGE_NOTIFY_EMAILS") {
            Ok(raw) => parse_email_list(&raw),
            Err(_) => match std::env::var("SHEETBRIDGE_EMAILS_FILE") {
                Ok(path) => load_emails_file(&path)?,
                Err(_) => Vec::new(),
            },
        };

        Ok(Self {
            bind,
            port,
            credentials_path,
            notify_emails,
        })
    }

    /// The socket address the server should listen on.
    pub fn socket_addr(&self) -> ApiResult<SocketAddr> {
        format!("{}:{}", self.bind, self.port).parse().map_err(|_| {
            ApiError::invalid_input(format!("invalid bind address '{}:{}'", self.bind, self.port))
        })
    }
}

fn parse_port(raw: &str) -> ApiResult<u16> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::invalid_input(format!("invalid port '{}'", raw)))
}

/// Split a comma-separated list, trimming entries and dropping empties.
fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn load_emails_file(path: &str) -> ApiResult<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ApiError::invalid_input(format!("reading emails file '{}': {}", path, e))
    })?;
    let parsed: EmailsFile = serde_json::from_str(&raw).map_err(|e| {
        ApiError::invalid_input(format!("parsing emails file '{}': {}", path, e))
    })?;
    Ok(parsed.emails)
}
