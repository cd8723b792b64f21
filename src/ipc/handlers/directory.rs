use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};

// Served without a session: the login screen needs the school picker.
pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "directory.schools" => Some(ok(&req.id, json!({ "schools": state.data.schools }))),
        _ => None,
    }
}
