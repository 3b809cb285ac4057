//! Common utility functions

use chrono::{DateTime, Utc};

/// Placeholder printed instead of a secret
pub const SECRET_MASK: &str = "***";

/// Get current UTC datetime
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Masked form of a secret for `Debug` output.
///
/// Only tells whether the secret is set, not its length.
pub fn mask_secret(s: &str) -> &'static str {
    if s.is_empty() { "" } else { SECRET_MASK }
}
