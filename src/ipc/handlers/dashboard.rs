use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};

fn handle_dashboard_model(state: &mut AppState, req: &Request) -> serde_json::Value {
    if state.shell.role().is_none() {
        return err(&req.id, "not_signed_in", "sign in first", None);
    }
    ok(&req.id, json!(&state.data.dashboard))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.model" => Some(handle_dashboard_model(state, req)),
        _ => None,
    }
}
