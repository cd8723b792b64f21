use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Stdout carries the wire protocol, so
/// every diagnostic goes to stderr. `EDUTRACKD_LOG` overrides the default
/// `edutrackd=info` filter, with `RUST_LOG` as a fallback.
pub fn init() {
    let filter = std::env::var("EDUTRACKD_LOG")
        .map(EnvFilter::new)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME"))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
