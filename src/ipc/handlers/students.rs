use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::ipc::error::ok;
use crate::ipc::helpers::{get_opt_str, get_required_str, require_role, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::StudentRow;
use crate::seed::{SeedData, CLASSES};
use crate::shell::ShellState;

fn students_list(
    shell: &ShellState,
    data: &SeedData,
    params: &Value,
) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let search = get_opt_str(params, "search").unwrap_or_default().to_lowercase();
    // "all" is the picker's reset value and matches every class.
    let class = get_opt_str(params, "class").filter(|c| c != "all");

    let rows: Vec<&StudentRow> = data
        .students
        .iter()
        .filter(|s| {
            let matches_search = search.is_empty()
                || s.name.to_lowercase().contains(&search)
                || s.roll_number.to_lowercase().contains(&search);
            let matches_class = class.as_deref().map(|c| s.class == c).unwrap_or(true);
            matches_search && matches_class
        })
        .collect();

    Ok(json!({
        "students": rows,
        "total": rows.len(),
        "classes": CLASSES,
    }))
}

fn students_create(
    shell: &ShellState,
    params: &Value,
) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let name = get_required_str(params, "name")?;
    let class = get_required_str(params, "class")?;
    let roll_number = get_required_str(params, "rollNumber")?;
    if name.trim().is_empty() {
        return Err(HandlerErr {
            code: "bad_params",
            message: "name must not be empty".to_string(),
            details: None,
        });
    }
    if !CLASSES.contains(&class.as_str()) {
        return Err(HandlerErr {
            code: "bad_params",
            message: format!("unknown class: {}", class),
            details: None,
        });
    }

    let parent_name = get_opt_str(params, "parentName").unwrap_or_default();
    let parent_phone = get_opt_str(params, "parentPhone").unwrap_or_default();
    let email = get_opt_str(params, "email").unwrap_or_default();

    // The sample roster is immutable; the caller gets the draft row back
    // to show locally, flagged as never persisted.
    let student_id = Uuid::new_v4().to_string();
    info!(
        id = %student_id,
        name = %name,
        class = %class,
        roll = %roll_number,
        "student create requested"
    );

    Ok(json!({
        "studentId": student_id,
        "persisted": false,
        "student": {
            "id": student_id,
            "name": name,
            "class": class,
            "rollNumber": roll_number,
            "parentName": parent_name,
            "parentPhone": parent_phone,
            "email": email,
            "attendance": 0.0,
            "status": "active",
        },
    }))
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_list(&state.shell, &state.data, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_create(&state.shell, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        _ => None,
    }
}
