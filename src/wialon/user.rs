//! Wialon user accounts

use serde_json::Value;
use tracing::{info, instrument, warn};
use crate::config::WialonConfig;
use crate::crypto::WialonPassword;
use crate::error::{IntegrationError, Result};
use crate::DEFAULT_PASSWORD_LENGTH;
use super::flags::{ITEM_DATAFLAG_BASE, NEW_USER_FLAGS};
use super::session::{WialonApi, WialonSession};
use super::unit::item_id;

/// A Wialon user together with the password generated for it
///
/// `password` is `None` for users loaded by id until
/// [`WialonUser::refresh_password`] sets one.
#[derive(Debug, Clone)]
pub struct WialonUser {
    id: i64,
    name: String,
    password: Option<WialonPassword>,
}

impl WialonUser {
    /// Load an existing user by id or create a new one by e-mail.
    ///
    /// Exactly one of `email` and `id` must be given.
    pub fn resolve<A: WialonApi>(
        session: &mut WialonSession<A>,
        email: Option<&str>,
        id: Option<i64>,
        config: &WialonConfig,
    ) -> Result<Self> {
        match (email, id) {
            (Some(email), None) => Self::create(session, email, config),
            (None, Some(id)) => Self::from_id(session, id),
            _ => Err(IntegrationError::InvalidArgument(
                "Either email or id must be provided, but not both".to_string(),
            )),
        }
    }

    /// Load an existing user. Its current password is unknown.
    #[instrument(skip(session))]
    pub fn from_id<A: WialonApi>(session: &mut WialonSession<A>, id: i64) -> Result<Self> {
        let reply = session.core_search_item(id, ITEM_DATAFLAG_BASE)?;
        let name = reply
            .pointer("/item/nm")
            .and_then(Value::as_str)
            .ok_or_else(|| IntegrationError::InvalidResponse(format!("user {} has no name", id)))?
            .to_string();

        Ok(Self {
            id,
            name,
            password: None,
        })
    }

    /// Create a user named after `email` under the configured creator account,
    /// then lock its settings and password.
    ///
    /// If the user was created but locking failed, the error is
    /// `UserRestrictionsPending` and carries the new user, so its id and
    /// password are not lost. [`WialonUser::set_new_userflags`] can be retried.
    #[instrument(skip(session, config), fields(creator = config.creator_id))]
    pub fn create<A: WialonApi>(session: &mut WialonSession<A>, email: &str, config: &WialonConfig) -> Result<Self> {
        if email.is_empty() {
            return Err(IntegrationError::InvalidArgument("email must not be empty".to_string()));
        }

        let password = WialonPassword::new(config.password_length)?;
        let reply = session.core_create_user(config.creator_id, email, password.raw(), ITEM_DATAFLAG_BASE)?;
        let item = reply
            .get("item")
            .ok_or_else(|| IntegrationError::InvalidResponse("create reply has no item".to_string()))?;
        let id = item_id(item)?;

        let user = Self {
            id,
            name: email.to_string(),
            password: Some(password),
        };
        if let Err(err) = user.set_new_userflags(session) {
            warn!(id, error = %err, "created user, but could not restrict it");
            return Err(IntegrationError::UserRestrictionsPending {
                user: Box::new(user),
                source: Box::new(err),
            });
        }
        info!(id, "created user");

        Ok(user)
    }

    /// Forbid the user from changing settings and password.
    ///
    /// Sends `flags` and `flagsMask` both set to 0x12 (settings | password).
    /// Older provisioning code sent a mask of 0x0E (`SETTINGS - PASSWORD`),
    /// which left the settings bit unmasked and touched
    /// `CAN_CREATE_ITEMS` and bit 0x8 instead.
    pub fn set_new_userflags<A: WialonApi>(&self, session: &mut WialonSession<A>) -> Result<()> {
        session.user_update_user_flags(self.id, NEW_USER_FLAGS, NEW_USER_FLAGS)?;
        Ok(())
    }

    /// Generate a new password and set it on the Wialon side.
    ///
    /// When the current password is unknown (user loaded by id) the old
    /// password is sent empty, which Wialon accepts from an account with
    /// manage rights over the user. The stored password only changes once
    /// Wialon accepted the new one.
    #[instrument(skip(self, session), fields(id = self.id))]
    pub fn refresh_password<A: WialonApi>(&mut self, session: &mut WialonSession<A>) -> Result<()> {
        let new_password = WialonPassword::new(DEFAULT_PASSWORD_LENGTH)?;
        let old_password = self.password.as_ref().map(WialonPassword::raw).unwrap_or("");
        session.user_update_password(self.id, old_password, new_password.raw())?;
        self.password = Some(new_password);
        info!("password refreshed");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_parts(id: i64, name: &str, password: Option<WialonPassword>) -> Self {
        Self {
            id,
            name: name.to_string(),
            password,
        }
    }

    /// Wialon item id
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Users are created with their e-mail as name
    pub fn email(&self) -> &str {
        &self.name
    }

    /// Current password, if this process generated it
    pub fn password(&self) -> Option<&WialonPassword> {
        self.password.as_ref()
    }
}
