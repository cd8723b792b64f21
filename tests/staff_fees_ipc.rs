use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_edutrackd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn edutrackd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn login_admin(stdin: &mut ChildStdin, reader: &mut BufReader<ChildStdout>) {
    let _ = request_ok(
        stdin,
        reader,
        "login",
        "session.login",
        json!({
            "role": "school_admin",
            "email": "admin@school.edu",
            "password": "x"
        }),
    );
}

fn staff_names(result: &serde_json::Value) -> Vec<String> {
    result
        .get("staff")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|s| s.get("name").and_then(|v| v.as_str()))
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn staff_list_filters_by_search_and_department() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    login_admin(&mut stdin, &mut reader);

    let all = request_ok(&mut stdin, &mut reader, "1", "staff.list", json!({}));
    assert_eq!(all.get("total").and_then(|v| v.as_i64()), Some(4));
    assert_eq!(
        all.get("departments").and_then(|v| v.as_array()).map(|a| a.len()),
        Some(9)
    );
    assert_eq!(
        all.pointer("/staff/0/employeeId").and_then(|v| v.as_str()),
        Some("EMP001")
    );
    assert_eq!(
        all.pointer("/staff/0/salary").and_then(|v| v.as_i64()),
        Some(85000)
    );
    assert_eq!(
        all.pointer("/staff/0/status").and_then(|v| v.as_str()),
        Some("active")
    );

    let by_name = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "staff.list",
        json!({ "search": "rajesh" }),
    );
    assert_eq!(staff_names(&by_name), ["Mr. Rajesh Kumar"]);

    // Employee ids and designations are searchable too.
    let by_id = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "staff.list",
        json!({ "search": "emp003" }),
    );
    assert_eq!(staff_names(&by_id), ["Ms. Priya Sharma"]);

    let by_designation = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "staff.list",
        json!({ "search": "office manager" }),
    );
    assert_eq!(staff_names(&by_designation), ["Mr. Amit Patel"]);

    let by_department = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "staff.list",
        json!({ "department": "Administration" }),
    );
    assert_eq!(staff_names(&by_department), ["Mr. Amit Patel"]);

    let none = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "staff.list",
        json!({ "search": "sarah", "department": "Science" }),
    );
    assert_eq!(none.get("total").and_then(|v| v.as_i64()), Some(0));
}

#[test]
fn staff_summary_has_overview_payroll_and_attendance_cards() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    login_admin(&mut stdin, &mut reader);

    let summary = request_ok(&mut stdin, &mut reader, "1", "staff.summary", json!({}));
    let overview = summary
        .get("overview")
        .and_then(|v| v.as_array())
        .expect("overview");
    let titles: Vec<&str> = overview
        .iter()
        .filter_map(|c| c.get("title").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(titles, ["Total Staff", "Teachers", "Admin Staff", "On Leave"]);
    let values: Vec<&str> = overview
        .iter()
        .filter_map(|c| c.get("value").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(values, ["48", "35", "13", "3"]);
    assert_eq!(
        overview[0].get("description").and_then(|v| v.as_str()),
        Some("Active members")
    );
    assert_eq!(
        overview[3].get("description").and_then(|v| v.as_str()),
        Some("Currently on leave")
    );

    let payroll = summary
        .get("payroll")
        .and_then(|v| v.as_array())
        .expect("payroll");
    assert_eq!(payroll.len(), 3);
    assert_eq!(
        payroll[0].get("title").and_then(|v| v.as_str()),
        Some("Total Payroll")
    );
    assert_eq!(
        payroll[0].get("value").and_then(|v| v.as_str()),
        Some("₹32,50,000")
    );

    let attendance = summary
        .get("attendance")
        .and_then(|v| v.as_array())
        .expect("attendance");
    assert_eq!(attendance.len(), 3);
    assert_eq!(
        attendance[2].get("value").and_then(|v| v.as_str()),
        Some("93.8%")
    );
}

#[test]
fn fees_model_serves_structure_records_and_summary() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    login_admin(&mut stdin, &mut reader);

    let model = request_ok(&mut stdin, &mut reader, "1", "fees.model", json!({}));
    let structure = model
        .get("structure")
        .and_then(|v| v.as_array())
        .expect("structure");
    assert_eq!(structure.len(), 5);
    assert_eq!(
        structure[0].get("tuition").and_then(|v| v.as_i64()),
        Some(5000)
    );

    let records = model
        .get("records")
        .and_then(|v| v.as_array())
        .expect("records");
    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0].get("status").and_then(|v| v.as_str()),
        Some("paid")
    );
    assert_eq!(
        records[0].get("paymentDate").and_then(|v| v.as_str()),
        Some("2025-01-08")
    );
    assert_eq!(
        records[1].get("status").and_then(|v| v.as_str()),
        Some("partial")
    );
    assert!(records[1]
        .get("paymentDate")
        .map(|v| v.is_null())
        .unwrap_or(false));
    assert_eq!(records[2].get("due").and_then(|v| v.as_i64()), Some(8200));

    let summary = model
        .get("summary")
        .and_then(|v| v.as_array())
        .expect("summary");
    assert_eq!(summary.len(), 4);
    assert_eq!(
        summary[0].get("title").and_then(|v| v.as_str()),
        Some("Total Collection")
    );
    assert_eq!(
        summary[3].get("value").and_then(|v| v.as_str()),
        Some("69%")
    );
}

#[test]
fn bills_and_reminders_report_counts_without_side_effects() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    login_admin(&mut stdin, &mut reader);

    let bills = request_ok(&mut stdin, &mut reader, "1", "fees.generateBills", json!({}));
    assert_eq!(bills.get("generated").and_then(|v| v.as_i64()), Some(3));
    assert_eq!(bills.get("persisted").and_then(|v| v.as_bool()), Some(false));

    // One partial and one pending record still owe money.
    let reminders = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "fees.sendReminders",
        json!({}),
    );
    assert_eq!(reminders.get("queued").and_then(|v| v.as_i64()), Some(2));
    assert_eq!(
        reminders.get("delivered").and_then(|v| v.as_bool()),
        Some(false)
    );

    // Counts are stable because nothing was written.
    let again = request_ok(&mut stdin, &mut reader, "3", "fees.generateBills", json!({}));
    assert_eq!(again.get("generated").and_then(|v| v.as_i64()), Some(3));
}
