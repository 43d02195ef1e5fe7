//! Google Sheets/Drive backend for sheetbridge.
//!
//! Implements the remote-service traits from `sheetbridge-core` against the
//! Sheets v4 and Drive v3 REST APIs, authenticating with a service-account
//! key via the OAuth2 JWT bearer grant.

pub mod auth;
pub mod client;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use client::GoogleSheetsClient;
