//! Business logic layer
//!
//! Workflows that combine several Wialon calls.

pub mod provisioning;

pub use provisioning::{provision_unit_account, ProvisionedAccount};
