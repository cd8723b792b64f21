use serde_json::{json, Value};
use tracing::debug;

use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, require_role, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::shell::{resolve_content, SelectViewError, ShellState};

fn handle_navigation(state: &mut AppState, req: &Request) -> serde_json::Value {
    let family = state.shell.menu_family();
    ok(
        &req.id,
        json!({
            "family": family.as_str(),
            "sections": family.menu(),
        }),
    )
}

fn select_view(shell: &mut ShellState, params: &Value) -> Result<serde_json::Value, HandlerErr> {
    let raw = get_required_str(params, "view")?;
    match shell.select_view(&raw) {
        Ok(view) => {
            debug!(view = view.as_str(), "view selected");
            Ok(json!({ "activeView": view }))
        }
        Err(SelectViewError::NotSignedIn) => Err(HandlerErr {
            code: "not_signed_in",
            message: "sign in first".to_string(),
            details: None,
        }),
        Err(SelectViewError::UnknownView) => {
            let family = shell.menu_family();
            Err(HandlerErr {
                code: "unknown_view",
                message: format!("view {} is not in the {} menu", raw, family.as_str()),
                details: Some(json!({ "requested": raw, "family": family.as_str() })),
            })
        }
    }
}

fn handle_select_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    match select_view(&mut state.shell, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn resolve(shell: &ShellState, params: &Value) -> Result<serde_json::Value, HandlerErr> {
    let role = require_role(shell)?;
    let raw = get_required_str(params, "view")?;
    let view = resolve_content(role, &raw);
    Ok(json!({
        "view": view,
        "fallback": view.as_str() != raw,
    }))
}

fn handle_resolve(state: &mut AppState, req: &Request) -> serde_json::Value {
    match resolve(&state.shell, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "shell.navigation" => Some(handle_navigation(state, req)),
        "shell.selectView" => Some(handle_select_view(state, req)),
        "shell.resolve" => Some(handle_resolve(state, req)),
        _ => None,
    }
}
