use serde_json::{json, Value};
use tracing::{debug, info};

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_opt_str, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::seed::SeedData;
use crate::shell::{Role, ShellState, SignedIn};

/// "alice.johnson@school.edu" -> "Alice Johnson". Used when no directory
/// profile matches the sign-in.
fn display_name_from_email(email: &str) -> String {
    let local = match email.split_once('@') {
        Some((local, _)) => local,
        None => email,
    };
    let words: Vec<String> = local
        .split(['.', '_', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        "User".to_string()
    } else {
        words.join(" ")
    }
}

fn login(
    shell: &mut ShellState,
    data: &SeedData,
    params: &Value,
) -> Result<serde_json::Value, HandlerErr> {
    let role_raw = get_required_str(params, "role")?;
    let Some(role) = Role::parse(&role_raw) else {
        return Err(HandlerErr {
            code: "bad_params",
            message: format!("unknown role: {}", role_raw),
            details: None,
        });
    };

    let email = get_opt_str(params, "email").unwrap_or_default();
    let password = get_opt_str(params, "password").unwrap_or_default();
    let school_id = get_opt_str(params, "schoolId").filter(|s| !s.trim().is_empty());

    // Same gate the login form applies. The password is only ever
    // checked for presence; credentials are not verified against a
    // directory.
    let mut missing: Vec<&str> = Vec::new();
    if email.trim().is_empty() {
        missing.push("email");
    }
    if password.trim().is_empty() {
        missing.push("password");
    }
    if role.requires_school() && school_id.is_none() {
        missing.push("schoolId");
    }
    if !missing.is_empty() {
        return Err(HandlerErr {
            code: "bad_params",
            message: "missing credentials".to_string(),
            details: Some(json!({ "missing": missing })),
        });
    }

    let school = match school_id {
        Some(id) => match data.find_school(&id) {
            Some(school) => Some(school.clone()),
            None => {
                return Err(HandlerErr {
                    code: "bad_params",
                    message: format!("unknown school: {}", id),
                    details: None,
                })
            }
        },
        None => None,
    };

    let display_name = match data.find_profile(&email, school.as_ref().map(|s| s.id.as_str())) {
        Some(profile) => {
            // A mismatch never blocks the sign-in; the requested role wins.
            match profile.role.shell_role() {
                Some(shell_role) if shell_role == role => {}
                _ => debug!(
                    email = %email,
                    profile_role = ?profile.role,
                    requested = role.as_str(),
                    "profile role differs from requested role"
                ),
            }
            profile.name.clone()
        }
        None => display_name_from_email(&email),
    };

    let view = shell.login(SignedIn {
        role,
        email,
        display_name: display_name.clone(),
        school: school.clone(),
    });
    info!(role = role.as_str(), view = view.as_str(), "signed in");

    Ok(json!({
        "role": role,
        "activeView": view,
        "displayName": display_name,
        "school": school,
    }))
}

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    match login(&mut state.shell, &state.data, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Some(user) = state.shell.signed_in() {
        info!(role = user.role.as_str(), "signed out");
    }
    state.shell.logout();
    ok(
        &req.id,
        json!({
            "signedIn": false,
            "activeView": state.shell.active_view,
        }),
    )
}

fn handle_session_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    let shell = &state.shell;
    let result = match shell.signed_in() {
        Some(user) => json!({
            "signedIn": true,
            "role": user.role,
            "email": user.email,
            "displayName": user.display_name,
            "school": user.school,
            "activeView": shell.active_view,
            "menuFamily": shell.menu_family().as_str(),
        }),
        None => json!({
            "signedIn": false,
            "activeView": shell.active_view,
            "menuFamily": shell.menu_family().as_str(),
        }),
    };
    ok(&req.id, result)
}

fn handle_header_model(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(user) = state.shell.signed_in() else {
        return err(&req.id, "not_signed_in", "sign in first", None);
    };
    let school_name = user
        .school
        .as_ref()
        .map(|s| s.name.as_str())
        .unwrap_or(&state.data.school_name);
    ok(
        &req.id,
        json!({
            "schoolName": school_name,
            "displayName": user.display_name,
            "roleLabel": user.role.label(),
            "initials": user.role.initials(),
            "notificationCount": state.data.notification_count,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.login" => Some(handle_login(state, req)),
        "session.logout" => Some(handle_logout(state, req)),
        "session.state" => Some(handle_session_state(state, req)),
        "header.model" => Some(handle_header_model(state, req)),
        _ => None,
    }
}
