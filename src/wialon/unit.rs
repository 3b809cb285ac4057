//! Wialon units (tracked vehicles)

use serde_json::Value;
use tracing::{info, instrument};
use crate::error::{IntegrationError, Result};
use super::flags::{ITEM_DATAFLAG_BASE, UNIT_USER_ACCESS_MASK};
use super::session::{SearchSpec, WialonApi, WialonSession};
use super::user::WialonUser;

/// A unit registered in Wialon, identified by the IMEI of its tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WialonUnit {
    imei: String,
    vin: Option<String>,
    id: i64,
}

impl WialonUnit {
    /// Look up the unit whose unique id is `imei`.
    ///
    /// The first match wins; an empty result is `ItemNotFound`.
    #[instrument(skip(session))]
    pub fn find<A: WialonApi>(session: &mut WialonSession<A>, imei: &str, vin: Option<&str>) -> Result<Self> {
        if imei.is_empty() {
            return Err(IntegrationError::InvalidArgument("IMEI must not be empty".to_string()));
        }

        let id = Self::get_wialon_id(session, imei)?;
        info!(id, "resolved unit");

        Ok(Self {
            imei: imei.to_string(),
            vin: vin.map(str::to_string),
            id,
        })
    }

    fn get_wialon_id<A: WialonApi>(session: &mut WialonSession<A>, imei: &str) -> Result<i64> {
        let spec = SearchSpec {
            items_type: "avl_unit".to_string(),
            prop_name: "sys_unique_id".to_string(),
            prop_value_mask: imei.to_string(),
            sort_type: "sys_unique_id".to_string(),
        };
        let reply = session.core_search_items(&spec, 1, ITEM_DATAFLAG_BASE, 0, 0)?;

        let items = reply
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| IntegrationError::InvalidResponse("search reply has no items".to_string()))?;

        let first = items
            .first()
            .ok_or_else(|| IntegrationError::ItemNotFound(format!("unit with IMEI {}", imei)))?;

        item_id(first)
    }

    pub fn imei(&self) -> &str {
        &self.imei
    }

    pub fn vin(&self) -> Option<&str> {
        self.vin.as_deref()
    }

    /// Wialon item id
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Give `user` access to this unit
    #[instrument(skip(self, session, user), fields(unit = self.id, user = user.id()))]
    pub fn assign_user<A: WialonApi>(&self, session: &mut WialonSession<A>, user: &WialonUser) -> Result<()> {
        session.user_update_item_access(user.id(), self.id, UNIT_USER_ACCESS_MASK)?;
        info!("granted unit access");
        Ok(())
    }
}

/// Read the numeric `id` of an item object. Wialon sends ids as numbers, but
/// numeric strings are accepted as well.
pub(crate) fn item_id(item: &Value) -> Result<i64> {
    let id = match item.get("id") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| IntegrationError::InvalidResponse(format!("item has no numeric id: {}", item)))
}
