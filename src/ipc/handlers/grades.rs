use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::ipc::error::ok;
use crate::ipc::helpers::{
    get_opt_str, get_required_f64, get_required_str, require_role, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::model::{class_average, round1, TestType};
use crate::seed::{SeedData, CLASSES, SUBJECTS};
use crate::shell::ShellState;

fn grades_model(shell: &ShellState, data: &SeedData) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let test_types: Vec<serde_json::Value> = TestType::ALL
        .iter()
        .map(|t| json!({ "value": t.as_str(), "label": t.label() }))
        .collect();
    Ok(json!({
        "students": data.grade_students,
        "entries": data.grade_entries,
        "classAverages": {
            "weekly": class_average(&data.grade_entries, TestType::Weekly),
            "assessment": class_average(&data.grade_entries, TestType::Assessment),
            "quarterly": class_average(&data.grade_entries, TestType::Quarterly),
        },
        "highlights": data.grade_highlights,
        "catalogs": {
            "classes": CLASSES,
            "subjects": SUBJECTS,
            "testTypes": test_types,
        },
    }))
}

fn grades_enter(
    shell: &ShellState,
    data: &SeedData,
    params: &Value,
) -> Result<serde_json::Value, HandlerErr> {
    require_role(shell)?;
    let student_id = get_required_str(params, "studentId")?;
    let subject = get_required_str(params, "subject")?;
    let test_type_raw = get_required_str(params, "testType")?;
    let marks = get_required_f64(params, "marks")?;
    let total_marks = get_required_f64(params, "totalMarks")?;

    let Some(student) = data.grade_students.iter().find(|s| s.id == student_id) else {
        return Err(HandlerErr {
            code: "not_found",
            message: format!("unknown student: {}", student_id),
            details: None,
        });
    };
    if !SUBJECTS.contains(&subject.as_str()) {
        return Err(HandlerErr {
            code: "bad_params",
            message: format!("unknown subject: {}", subject),
            details: None,
        });
    }
    let Some(test_type) = TestType::parse(&test_type_raw) else {
        return Err(HandlerErr {
            code: "bad_params",
            message: format!("unknown test type: {}", test_type_raw),
            details: None,
        });
    };
    if total_marks <= 0.0 {
        return Err(HandlerErr {
            code: "bad_params",
            message: "totalMarks must be positive".to_string(),
            details: None,
        });
    }
    if marks < 0.0 || marks > total_marks {
        return Err(HandlerErr {
            code: "bad_params",
            message: "marks must be between 0 and totalMarks".to_string(),
            details: None,
        });
    }
    let date = match get_opt_str(params, "date") {
        Some(raw) => {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| HandlerErr {
                code: "bad_params",
                message: "date must be YYYY-MM-DD".to_string(),
                details: None,
            })?;
            raw
        }
        None => Local::now().date_naive().format("%Y-%m-%d").to_string(),
    };

    let percentage = round1(marks / total_marks * 100.0);
    let entry_id = Uuid::new_v4().to_string();
    info!(
        entry = %entry_id,
        student = %student.name,
        subject = %subject,
        test_type = test_type.as_str(),
        marks,
        total_marks,
        "grade entry requested"
    );

    // Mark book stays read-only; the draft entry is echoed back for the
    // client to display.
    Ok(json!({
        "entryId": entry_id,
        "percentage": percentage,
        "persisted": false,
        "entry": {
            "id": entry_id,
            "studentId": student.id,
            "studentName": student.name,
            "rollNumber": student.roll_number,
            "subject": subject,
            "testType": test_type,
            "marks": marks,
            "totalMarks": total_marks,
            "percentage": percentage,
            "date": date,
        },
    }))
}

fn handle_grades_model(state: &mut AppState, req: &Request) -> serde_json::Value {
    match grades_model(&state.shell, &state.data) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_grades_enter(state: &mut AppState, req: &Request) -> serde_json::Value {
    match grades_enter(&state.shell, &state.data, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.model" => Some(handle_grades_model(state, req)),
        "grades.enter" => Some(handle_grades_enter(state, req)),
        _ => None,
    }
}
