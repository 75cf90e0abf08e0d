//! Tracing subscriber setup for the binary.

/// Environment variable that overrides `--log-level`.
pub const LOG_ENV: &str = "PAPERTRADER_LOG";

pub fn init_tracing(log_level: &str, log_format: &str) -> Result<(), String> {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| log_level.to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|err| format!("invalid log filter: {err}"))?;

    match log_format.trim().to_lowercase().as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .init(),
        "text" => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
        other => return Err(format!("unknown log format '{other}' (expected text or json)")),
    }
    Ok(())
}
