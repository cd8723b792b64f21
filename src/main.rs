mod ipc;
mod logging;
mod model;
mod seed;
mod shell;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

/// School-administration shell sidecar. Speaks line-delimited JSON over
/// stdio: requests on stdin, responses on stdout, diagnostics on stderr.
#[derive(Debug, Parser)]
#[command(name = "edutrackd", version, about)]
struct CliArgs {
    /// Replace the built-in sample data with a JSON seed file
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init();

    let data = match &args.seed {
        Some(path) => match seed::load(path) {
            Ok(data) => {
                info!(path = %path.display(), "seed data loaded");
                data
            }
            Err(e) => {
                error!(path = %path.display(), "invalid seed file: {e:#}");
                return ExitCode::FAILURE;
            }
        },
        None => seed::builtin(),
    };
    info!(version = env!("CARGO_PKG_VERSION"), "edutrackd ready");

    let mut state = ipc::AppState::new(data);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply with an id we never parsed.
                let _ = writeln!(
                    stdout,
                    "{{\"ok\":false,\"error\":{{\"code\":\"bad_json\",\"message\":\"{}\"}}}}",
                    e
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    ExitCode::SUCCESS
}
