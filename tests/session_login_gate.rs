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

fn error_code(value: &serde_json::Value) -> Option<&str> {
    value
        .get("error")
        .and_then(|v| v.get("code"))
        .and_then(|v| v.as_str())
}

fn missing_fields(value: &serde_json::Value) -> Vec<String> {
    value
        .pointer("/error/details/missing")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn login_requires_email_and_password() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "session.login",
        json!({ "role": "school_admin", "email": "admin@school.edu" }),
    );
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(error_code(&resp), Some("bad_params"));
    assert_eq!(missing_fields(&resp), ["password"]);

    let resp = request(
        &mut stdin,
        &mut reader,
        "2",
        "session.login",
        json!({ "role": "school_admin" }),
    );
    assert_eq!(error_code(&resp), Some("bad_params"));
    assert_eq!(missing_fields(&resp), ["email", "password"]);

    // Whitespace-only credentials do not pass the gate.
    let resp = request(
        &mut stdin,
        &mut reader,
        "3",
        "session.login",
        json!({ "role": "school_admin", "email": "  ", "password": "x" }),
    );
    assert_eq!(error_code(&resp), Some("bad_params"));
    assert_eq!(missing_fields(&resp), ["email"]);
}

#[test]
fn non_admin_roles_must_pick_a_school() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    for (id, role) in [("1", "teacher"), ("2", "student"), ("3", "parent")] {
        let resp = request(
            &mut stdin,
            &mut reader,
            id,
            "session.login",
            json!({ "role": role, "email": "someone@school.edu", "password": "x" }),
        );
        assert_eq!(error_code(&resp), Some("bad_params"), "role {}", role);
        assert_eq!(missing_fields(&resp), ["schoolId"], "role {}", role);
    }

    // School admins sign in without one.
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "session.login",
        json!({ "role": "school_admin", "email": "admin@school.edu", "password": "x" }),
    );
    assert_eq!(
        result.get("activeView").and_then(|v| v.as_str()),
        Some("dashboard")
    );
    assert!(result.get("school").map(|v| v.is_null()).unwrap_or(false));
}

#[test]
fn unknown_role_and_unknown_school_are_rejected() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "session.login",
        json!({ "role": "principal", "email": "a@b.c", "password": "x" }),
    );
    assert_eq!(error_code(&resp), Some("bad_params"));

    // Staff is a directory role, not a shell role.
    let resp = request(
        &mut stdin,
        &mut reader,
        "2",
        "session.login",
        json!({ "role": "staff", "email": "a@b.c", "password": "x" }),
    );
    assert_eq!(error_code(&resp), Some("bad_params"));

    let resp = request(
        &mut stdin,
        &mut reader,
        "3",
        "session.login",
        json!({
            "role": "teacher",
            "email": "a@b.c",
            "password": "x",
            "schoolId": "school99"
        }),
    );
    assert_eq!(error_code(&resp), Some("bad_params"));

    // Nothing above signed the shell in.
    let state = request_ok(&mut stdin, &mut reader, "4", "session.state", json!({}));
    assert_eq!(state.get("signedIn").and_then(|v| v.as_bool()), Some(false));
}

#[test]
fn guarded_methods_reject_anonymous_callers() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    for (id, method, params) in [
        ("1", "header.model", json!({})),
        ("2", "dashboard.model", json!({})),
        ("3", "students.list", json!({})),
        ("4", "attendance.sheetOpen", json!({ "class": "Class 10" })),
        ("5", "grades.model", json!({})),
        ("6", "staff.list", json!({})),
        ("7", "fees.model", json!({})),
        ("8", "shell.resolve", json!({ "view": "dashboard" })),
    ] {
        let resp = request(&mut stdin, &mut reader, id, method, params);
        assert_eq!(
            resp.get("ok").and_then(|v| v.as_bool()),
            Some(false),
            "{} allowed anonymously",
            method
        );
        assert_eq!(error_code(&resp), Some("not_signed_in"), "{}", method);
    }

    // The login screen's own data stays reachable.
    let schools = request_ok(&mut stdin, &mut reader, "9", "directory.schools", json!({}));
    assert_eq!(
        schools.get("schools").and_then(|v| v.as_array()).map(|a| a.len()),
        Some(3)
    );
}
