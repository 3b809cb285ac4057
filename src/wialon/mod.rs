//! Wialon remote API layer
//!
//! Domain objects over the Wialon call surface:
//! - `WialonSession`: login/logout lifecycle and typed service calls
//! - `WialonUnit`: unit lookup by IMEI and access grants
//! - `WialonUser`: user lookup, creation and password refresh

pub mod flags;
pub mod session;
pub mod unit;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use session::{WialonApi, WialonSession, SearchSpec};
pub use unit::WialonUnit;
pub use user::WialonUser;
