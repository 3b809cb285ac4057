//! # wialink
//!
//! Integration core between an application and the Wialon fleet-telematics
//! service.
//!
//! ## Features
//!
//! - Wialon-compliant password generation (rejection sampling over a CSPRNG)
//! - Unit lookup by tracker IMEI and user access grants
//! - User creation with locked settings and password refresh
//! - One-call account provisioning
//! - SQLite session wrapper and JSON configuration
//!
//! The Wialon transport is not part of this crate: anything implementing
//! [`WialonApi`] can carry the calls.
//!
//! ## Example
//!
//! ```no_run
//! use wialink::{IntegrationConfig, WialonApi, WialonSession, provision_unit_account};
//! use std::path::Path;
//!
//! fn run(api: impl WialonApi) -> wialink::Result<()> {
//!     let config = IntegrationConfig::load(Path::new("wialink.json"))?;
//!     let mut session = WialonSession::open(api, config.token()?)?;
//!
//!     let account = provision_unit_account(
//!         &mut session,
//!         &config.wialon,
//!         "356938035643809",
//!         None,
//!         "owner@example.com",
//!     )?;
//!     println!("user {} can now see unit {}", account.user_id, account.unit_id);
//!     Ok(())
//! }
//! ```

pub mod crypto;
pub mod database;
pub mod business;
pub mod wialon;
pub mod config;
pub mod utils;
pub mod error;

// Re-export main types
pub use error::{IntegrationError, Result};
pub use config::{IntegrationConfig, DatabaseConfig, WialonConfig};
pub use crypto::{
    generate_wialon_password, generate_wialon_password_with, is_valid_wialon_password, is_wialon_alphabet,
    WialonPassword,
};
pub use database::DatabaseSession;
pub use wialon::{WialonApi, WialonSession, WialonUnit, WialonUser};
pub use business::{provision_unit_account, ProvisionedAccount};

/// Requested length for generated passwords (the result is one longer)
pub const DEFAULT_PASSWORD_LENGTH: usize = 8;

/// Wialon account that owns provisioned users
pub const DEFAULT_CREATOR_ID: i64 = 27881459;

/// Database file used when none is configured
pub const DEFAULT_DATABASE_PATH: &str = "wialink.db";
