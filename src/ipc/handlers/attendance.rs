use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::ipc::error::ok;
use crate::ipc::helpers::{get_opt_str, get_required_str, require_role, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::{AttendanceSheet, MarkStatus};
use crate::seed::{SeedData, CLASSES};
use crate::shell::ShellState;

fn parse_date(params: &Value) -> Result<NaiveDate, HandlerErr> {
    match get_opt_str(params, "date") {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| HandlerErr {
            code: "bad_params",
            message: "date must be YYYY-MM-DD".to_string(),
            details: None,
        }),
        None => Ok(Local::now().date_naive()),
    }
}

fn sheet_json(sheet: &AttendanceSheet) -> serde_json::Value {
    let students: Vec<serde_json::Value> = sheet
        .roster
        .iter()
        .map(|s| {
            json!({
                "id": s.id,
                "name": s.name,
                "rollNumber": s.roll_number,
                "parentPhone": s.parent_phone,
                "status": sheet.status_of(&s.id),
            })
        })
        .collect();
    json!({
        "class": sheet.class,
        "date": sheet.date.format("%Y-%m-%d").to_string(),
        "students": students,
        "tally": sheet.tally(),
    })
}

fn sheet_open(
    shell: &mut ShellState,
    data: &SeedData,
    params: &Value,
) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let class = get_required_str(params, "class")?;
    if !CLASSES.contains(&class.as_str()) {
        return Err(HandlerErr {
            code: "bad_params",
            message: format!("unknown class: {}", class),
            details: None,
        });
    }
    let date = parse_date(params)?;

    // Opening always starts a fresh sheet; any earlier marks are gone.
    let sheet = AttendanceSheet::open(class, date, data.class_roster.clone());
    debug!(class = %sheet.class, date = %sheet.date, "attendance sheet opened");
    let result = sheet_json(&sheet);
    shell.sheet = Some(sheet);
    Ok(result)
}

fn require_sheet(shell: &mut ShellState) -> Result<&mut AttendanceSheet, HandlerErr> {
    shell.sheet.as_mut().ok_or_else(|| HandlerErr {
        code: "no_sheet",
        message: "open an attendance sheet first".to_string(),
        details: None,
    })
}

fn mark(shell: &mut ShellState, params: &Value) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let student_id = get_required_str(params, "studentId")?;
    let status_raw = get_required_str(params, "status")?;
    let Some(status) = MarkStatus::parse(&status_raw) else {
        return Err(HandlerErr {
            code: "bad_params",
            message: "status must be present, absent or late".to_string(),
            details: None,
        });
    };

    let sheet = require_sheet(shell)?;
    if !sheet.mark(&student_id, status) {
        return Err(HandlerErr {
            code: "not_found",
            message: format!("student {} is not on the sheet", student_id),
            details: None,
        });
    }
    Ok(json!({
        "studentId": student_id,
        "status": status,
        "tally": sheet.tally(),
    }))
}

fn save(shell: &mut ShellState) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let sheet = require_sheet(shell)?;
    let tally = sheet.tally();
    info!(
        class = %sheet.class,
        date = %sheet.date,
        present = tally.present,
        absent = tally.absent,
        late = tally.late,
        unmarked = tally.unmarked,
        "saving attendance"
    );
    Ok(json!({
        "persisted": false,
        "class": sheet.class,
        "date": sheet.date.format("%Y-%m-%d").to_string(),
        "tally": tally,
    }))
}

fn notify_absent(shell: &mut ShellState) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let sheet = require_sheet(shell)?;
    let absentees = sheet.absentees();
    if absentees.is_empty() {
        return Ok(json!({ "queued": 0, "delivered": false }));
    }
    let rolls: Vec<&str> = absentees.iter().map(|s| s.roll_number.as_str()).collect();
    info!(
        count = absentees.len(),
        students = ?rolls,
        "sending notifications to parents of absent students"
    );
    Ok(json!({
        "queued": absentees.len(),
        "delivered": false,
    }))
}

fn handle_sheet_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    match sheet_open(&mut state.shell, &state.data, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_mark(state: &mut AppState, req: &Request) -> serde_json::Value {
    match mark(&mut state.shell, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_save(state: &mut AppState, req: &Request) -> serde_json::Value {
    match save(&mut state.shell) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_notify_absent(state: &mut AppState, req: &Request) -> serde_json::Value {
    match notify_absent(&mut state.shell) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.sheetOpen" => Some(handle_sheet_open(state, req)),
        "attendance.mark" => Some(handle_mark(state, req)),
        "attendance.save" => Some(handle_save(state, req)),
        "attendance.notifyAbsent" => Some(handle_notify_absent(state, req)),
        _ => None,
    }
}
