//! Wialon session management
//!
//! [`WialonApi`] is the call surface of the remote service: one method that
//! takes a service name (`core/search_items`, `token/login`, ...) and a JSON
//! parameter object and returns the JSON reply. How the request travels is up
//! to the implementation.
//!
//! [`WialonSession`] owns an API handle for the duration of one login. It
//! logs in on [`WialonSession::open`] and logs out on [`WialonSession::close`]
//! or when dropped.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};
use crate::error::{IntegrationError, Result};

/// Remote call surface of the Wialon service
pub trait WialonApi {
    /// Execute `service` with `params` and return the raw reply
    fn call(&mut self, service: &str, params: Value) -> Result<Value>;
}

impl<T: WialonApi + ?Sized> WialonApi for Box<T> {
    fn call(&mut self, service: &str, params: Value) -> Result<Value> {
        (**self).call(service, params)
    }
}

impl<T: WialonApi + ?Sized> WialonApi for &mut T {
    fn call(&mut self, service: &str, params: Value) -> Result<Value> {
        (**self).call(service, params)
    }
}

/// Search specification for `core/search_items`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSpec {
    pub items_type: String,
    pub prop_name: String,
    pub prop_value_mask: String,
    pub sort_type: String,
}

/// Turn a Wialon `{"error": N}` reply into an error.
///
/// Some services answer `{"error": 0}` on success, so only non-zero codes
/// count as failures.
pub fn check_reply(reply: Value) -> Result<Value> {
    match reply.get("error").and_then(Value::as_i64) {
        Some(code) if code != 0 => Err(IntegrationError::from_wialon_code(code)),
        _ => Ok(reply),
    }
}

/// A logged-in Wialon session
pub struct WialonSession<A: WialonApi> {
    api: A,
    /// Session id, `None` once logged out
    eid: Option<String>,
    /// Name of the account the token belongs to
    user_name: Option<String>,
}

impl<A: WialonApi> WialonSession<A> {
    /// Log in with an API token
    #[instrument(skip_all)]
    pub fn open(mut api: A, token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(IntegrationError::InvalidArgument(
                "Wialon token must not be empty".to_string(),
            ));
        }

        let reply = check_reply(api.call("token/login", json!({ "token": token }))?)?;

        let eid = reply
            .get("eid")
            .and_then(Value::as_str)
            .ok_or_else(|| IntegrationError::InvalidResponse("login reply has no eid".to_string()))?
            .to_string();

        let user_name = reply
            .pointer("/user/nm")
            .and_then(Value::as_str)
            .map(str::to_string);

        info!(user = user_name.as_deref().unwrap_or(""), "logged in to Wialon");

        Ok(Self {
            api,
            eid: Some(eid),
            user_name,
        })
    }

    /// Session id assigned by Wialon
    pub fn eid(&self) -> Option<&str> {
        self.eid.as_deref()
    }

    /// Account the session is logged in as
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Check if the session is still logged in
    pub fn is_open(&self) -> bool {
        self.eid.is_some()
    }

    /// Execute a service call on this session
    pub fn call(&mut self, service: &str, params: Value) -> Result<Value> {
        if self.eid.is_none() {
            return Err(IntegrationError::SessionClosed);
        }
        debug!(service, "calling Wialon");
        check_reply(self.api.call(service, params)?)
    }

    /// Log out. Calling this more than once is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.eid.take().is_none() {
            return Ok(());
        }
        check_reply(self.api.call("core/logout", json!({}))?)?;
        info!("logged out of Wialon");
        Ok(())
    }

    // ========================================================================
    // Service calls
    // ========================================================================

    /// `core/search_items`
    pub fn core_search_items(
        &mut self,
        spec: &SearchSpec,
        force: u8,
        flags: u64,
        from: u32,
        to: u32,
    ) -> Result<Value> {
        let params = json!({
            "spec": spec,
            "force": force,
            "flags": flags,
            "from": from,
            "to": to,
        });
        self.call("core/search_items", params)
    }

    /// `core/search_item`
    pub fn core_search_item(&mut self, id: i64, flags: u64) -> Result<Value> {
        self.call("core/search_item", json!({ "id": id, "flags": flags }))
    }

    /// `core/create_user`
    pub fn core_create_user(
        &mut self,
        creator_id: i64,
        name: &str,
        password: &str,
        data_flags: u64,
    ) -> Result<Value> {
        let params = json!({
            "creatorId": creator_id,
            "name": name,
            "password": password,
            "dataFlags": data_flags,
        });
        self.call("core/create_user", params)
    }

    /// `user/update_user_flags`
    pub fn user_update_user_flags(&mut self, user_id: i64, flags: u64, flags_mask: u64) -> Result<Value> {
        let params = json!({
            "userId": user_id,
            "flags": flags,
            "flagsMask": flags_mask,
        });
        self.call("user/update_user_flags", params)
    }

    /// `user/update_item_access`
    pub fn user_update_item_access(&mut self, user_id: i64, item_id: i64, access_mask: u64) -> Result<Value> {
        let params = json!({
            "userId": user_id,
            "itemId": item_id,
            "accessMask": access_mask,
        });
        self.call("user/update_item_access", params)
    }

    /// `user/update_password`
    pub fn user_update_password(&mut self, user_id: i64, old_password: &str, new_password: &str) -> Result<Value> {
        let params = json!({
            "userId": user_id,
            "oldPassword": old_password,
            "newPassword": new_password,
        });
        self.call("user/update_password", params)
    }
}

impl<A: WialonApi> Drop for WialonSession<A> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!(error = %err, "failed to log out of Wialon");
        }
    }
}
