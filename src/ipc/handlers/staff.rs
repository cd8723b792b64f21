use serde_json::{json, Value};

use crate::ipc::error::ok;
use crate::ipc::helpers::{get_opt_str, require_role, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::StaffRow;
use crate::seed::{SeedData, DEPARTMENTS};
use crate::shell::ShellState;

fn staff_list(
    shell: &ShellState,
    data: &SeedData,
    params: &Value,
) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let search = get_opt_str(params, "search").unwrap_or_default().to_lowercase();
    let department = get_opt_str(params, "department").filter(|d| !d.is_empty());

    let rows: Vec<&StaffRow> = data
        .staff
        .iter()
        .filter(|m| {
            let matches_search = search.is_empty()
                || m.name.to_lowercase().contains(&search)
                || m.employee_id.to_lowercase().contains(&search)
                || m.designation.to_lowercase().contains(&search);
            let matches_department =
                department.as_deref().map(|d| m.department == d).unwrap_or(true);
            matches_search && matches_department
        })
        .collect();

    Ok(json!({
        "staff": rows,
        "total": rows.len(),
        "departments": DEPARTMENTS,
    }))
}

fn staff_summary(shell: &ShellState, data: &SeedData) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    Ok(json!({
        "overview": data.staff_overview,
        "payroll": data.staff_payroll,
        "attendance": data.staff_attendance,
    }))
}

fn handle_staff_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match staff_list(&state.shell, &state.data, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_staff_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    match staff_summary(&state.shell, &state.data) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "staff.list" => Some(handle_staff_list(state, req)),
        "staff.summary" => Some(handle_staff_summary(state, req)),
        _ => None,
    }
}
