use serde_json::json;
use tracing::info;

use crate::ipc::error::ok;
use crate::ipc::helpers::{require_role, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::FeeStatus;
use crate::seed::SeedData;
use crate::shell::ShellState;

fn fees_model(shell: &ShellState, data: &SeedData) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    Ok(json!({
        "structure": data.fee_structure,
        "records": data.fee_records,
        "summary": data.fee_summary,
    }))
}

fn generate_bills(shell: &ShellState, data: &SeedData) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let count = data.fee_records.len();
    info!(records = count, "generating fee demand bills");
    Ok(json!({ "generated": count, "persisted": false }))
}

/// Reminders go to every account that still owes something.
fn send_reminders(shell: &ShellState, data: &SeedData) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let count = data
        .fee_records
        .iter()
        .filter(|r| r.status != FeeStatus::Paid)
        .count();
    info!(accounts = count, "sending payment reminders");
    Ok(json!({ "queued": count, "delivered": false }))
}

fn handle_fees_model(state: &mut AppState, req: &Request) -> serde_json::Value {
    match fees_model(&state.shell, &state.data) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_generate_bills(state: &mut AppState, req: &Request) -> serde_json::Value {
    match generate_bills(&state.shell, &state.data) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_send_reminders(state: &mut AppState, req: &Request) -> serde_json::Value {
    match send_reminders(&state.shell, &state.data) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "fees.model" => Some(handle_fees_model(state, req)),
        "fees.generateBills" => Some(handle_generate_bills(state, req)),
        "fees.sendReminders" => Some(handle_send_reminders(state, req)),
        _ => None,
    }
}
