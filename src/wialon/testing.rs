//! In-memory `WialonApi` used by the unit tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use serde_json::{json, Value};
use crate::error::Result;
use super::session::WialonApi;

pub const FAKE_UNIT_ID: i64 = 734455;
pub const FAKE_USER_ID: i64 = 31000001;

#[derive(Default)]
struct State {
    calls: Vec<(String, Value)>,
    replies: HashMap<String, Value>,
}

/// Records every call and answers with canned replies.
/// Clones share state, so a test can keep one handle after moving another
/// into a session.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Rc<RefCell<State>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the reply for `service`
    pub fn respond(&self, service: &str, reply: Value) {
        self.state.borrow_mut().replies.insert(service.to_string(), reply);
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.state.borrow().calls.clone()
    }

    /// Parameters of the first call to `service`
    pub fn params_of(&self, service: &str) -> Option<Value> {
        self.state
            .borrow()
            .calls
            .iter()
            .find(|(s, _)| s == service)
            .map(|(_, p)| p.clone())
    }

    fn default_reply(service: &str, params: &Value) -> Value {
        match service {
            "token/login" => json!({ "eid": "fake-eid", "user": { "id": 27881459, "nm": "terminus" } }),
            "core/logout" => json!({ "error": 0 }),
            "core/search_items" => json!({
                "totalItemsCount": 1,
                "items": [{ "id": FAKE_UNIT_ID, "nm": "Truck 12" }],
            }),
            "core/search_item" => json!({ "item": { "id": params["id"], "nm": "driver@example.com" } }),
            "core/create_user" => json!({ "item": { "id": FAKE_USER_ID, "nm": params["name"] }, "flags": 1 }),
            _ => json!({}),
        }
    }
}

impl WialonApi for FakeApi {
    fn call(&mut self, service: &str, params: Value) -> Result<Value> {
        let mut state = self.state.borrow_mut();
        let reply = state
            .replies
            .get(service)
            .cloned()
            .unwrap_or_else(|| Self::default_reply(service, &params));
        state.calls.push((service.to_string(), params));
        Ok(reply)
    }
}
