use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize console logging for striplog.
///
/// RUST_LOG overrides the level passed on the command line.
pub fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("striplog={}", level)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    Registry::default().with(env_filter).with(console_layer).init();

    info!("striplog logging initialized");
    info!("Log level: {}", level);
}

/// Log system information for debugging
pub fn log_system_info() {
    info!("📏 striplog - Well-Log Strip Extraction");
    info!("System: {} {}", std::env::consts::OS, std::env::consts::ARCH);

    if let Ok(cwd) = std::env::current_dir() {
        info!("Working directory: {}", cwd.display());
    }
}
