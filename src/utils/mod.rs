//! Small helpers shared across modules

pub mod common;

pub use common::{mask_secret, now};
