use serde::Deserialize;

use crate::seed::SeedData;
use crate::shell::ShellState;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub shell: ShellState,
    pub data: SeedData,
}

impl AppState {
    pub fn new(data: SeedData) -> AppState {
        AppState {
            shell: ShellState::new(),
            data,
        }
    }
}
