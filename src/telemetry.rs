use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

pub const ENV_LOCAL: &str = "local";
pub const ENV_PROD: &str = "prod";

/// Default filter when `RUST_LOG` is not set.
fn default_directives(env: &str) -> &'static str {
    match env {
        ENV_LOCAL => "debug,sqlx=info,tower_http=debug",
        _ => "info",
    }
}

/// Installs the process subscriber. Called once from the binary, before
/// anything else logs.
///
/// - `local`: human readable, debug level
/// - `prod`: JSON lines, info level
/// - anything else: compact, info level
pub fn init(env: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));
    let registry = tracing_subscriber::registry().with(filter);

    match env {
        ENV_LOCAL => registry.with(fmt::layer().pretty()).try_init(),
        ENV_PROD => registry.with(fmt::layer().json()).try_init(),
        _ => registry.with(fmt::layer().compact()).try_init(),
    }
}
