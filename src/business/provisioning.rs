//! Account provisioning
//!
//! Gives the owner of a tracker a Wialon login that can see their unit:
//! resolve the unit by IMEI, create a user for the e-mail, grant the user
//! access to the unit.

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use crate::config::WialonConfig;
use crate::crypto::WialonPassword;
use crate::error::Result;
use crate::utils::{mask_secret, now};
use crate::wialon::{WialonApi, WialonSession, WialonUnit, WialonUser};

/// Result of a successful provisioning run
///
/// `password` is the only copy of the credential; Wialon does not return it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionedAccount {
    pub unit_id: i64,
    pub imei: String,
    pub vin: Option<String>,
    pub user_id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub provisioned_at: DateTime<Utc>,
}

impl fmt::Debug for ProvisionedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionedAccount")
            .field("unit_id", &self.unit_id)
            .field("imei", &self.imei)
            .field("vin", &self.vin)
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("password", &mask_secret(&self.password))
            .field("provisioned_at", &self.provisioned_at)
            .finish()
    }
}

/// Provision a user for the unit with `imei`.
///
/// Nothing is undone when a later step fails: a user created before a failed
/// access grant stays in Wialon.
#[instrument(skip(session, config, vin))]
pub fn provision_unit_account<A: WialonApi>(
    session: &mut WialonSession<A>,
    config: &WialonConfig,
    imei: &str,
    vin: Option<&str>,
    email: &str,
) -> Result<ProvisionedAccount> {
    let unit = WialonUnit::find(session, imei, vin)?;
    let user = WialonUser::create(session, email, config)?;
    unit.assign_user(session, &user)?;

    info!(unit = unit.id(), user = user.id(), "provisioned account");

    Ok(ProvisionedAccount {
        unit_id: unit.id(),
        imei: unit.imei().to_string(),
        vin: unit.vin().map(str::to_string),
        user_id: user.id(),
        email: user.email().to_string(),
        password: user.password().map(WialonPassword::raw).unwrap_or_default().to_string(),
        provisioned_at: now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::crypto::is_valid_wialon_password;
    use crate::error::IntegrationError;
    use crate::wialon::testing::{FakeApi, FAKE_UNIT_ID, FAKE_USER_ID};

    #[test]
    fn test_provision_unit_account() {
        let api = FakeApi::new();
        let mut session = WialonSession::open(api.clone(), "token").unwrap();
        let config = WialonConfig::default();

        let account = provision_unit_account(&mut session, &config, "356938035643809", None, "owner@example.com").unwrap();
        assert_eq!(account.unit_id, FAKE_UNIT_ID);
        assert_eq!(account.user_id, FAKE_USER_ID);
        assert_eq!(account.imei, "356938035643809");
        assert_eq!(account.email, "owner@example.com");
        assert!(is_valid_wialon_password(&account.password));

        let services: Vec<String> = api.calls().into_iter().map(|(s, _)| s).collect();
        assert_eq!(services, vec![
            "token/login",
            "core/search_items",
            "core/create_user",
            "user/update_user_flags",
            "user/update_item_access",
        ]);

        let access = api.params_of("user/update_item_access").unwrap();
        assert_eq!(access["userId"], json!(FAKE_USER_ID));
        assert_eq!(access["itemId"], json!(FAKE_UNIT_ID));
    }

    #[test]
    fn test_provision_uses_configured_creator() {
        let api = FakeApi::new();
        let mut session = WialonSession::open(api.clone(), "token").unwrap();
        let config = WialonConfig {
            creator_id: 1001,
            ..Default::default()
        };

        provision_unit_account(&mut session, &config, "1", None, "a@b.c").unwrap();
        assert_eq!(api.params_of("core/create_user").unwrap()["creatorId"], json!(1001));
    }

    #[test]
    fn test_provision_unknown_unit_creates_nothing() {
        let api = FakeApi::new();
        api.respond("core/search_items", json!({ "items": [] }));
        let mut session = WialonSession::open(api.clone(), "token").unwrap();

        let result = provision_unit_account(&mut session, &WialonConfig::default(), "999", None, "a@b.c");
        assert!(matches!(result, Err(IntegrationError::ItemNotFound(_))));
        assert!(api.params_of("core/create_user").is_none());
    }

    #[test]
    fn test_serialized_account_omits_password() {
        let api = FakeApi::new();
        let mut session = WialonSession::open(api.clone(), "token").unwrap();
        let account = provision_unit_account(&mut session, &WialonConfig::default(), "1", Some("VIN1"), "a@b.c").unwrap();

        let value = serde_json::to_value(&account).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["vin"], json!("VIN1"));
        assert_eq!(value["email"], json!("a@b.c"));

        let restored: ProvisionedAccount = serde_json::from_value(value).unwrap();
        assert_eq!(restored.user_id, account.user_id);
        assert!(restored.password.is_empty());
        let printed = format!("{:?}", account);
        assert!(!printed.contains(&account.password));
        assert!(printed.contains("password: \"***\""));
    }
}
