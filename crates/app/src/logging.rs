use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Initialize logging to stderr, keeping stdout for command output.
/// The returned guard must be kept alive for the duration of the program.
pub fn init_logging(log_level: tracing::Level) -> WorkerGuard {
    let (stderr_writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stderr_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();

    guard
}

/// Resolve the effective level: explicit flag > config value > WARN
pub fn resolve_level(explicit: Option<tracing::Level>, configured: &str) -> tracing::Level {
    explicit.unwrap_or_else(|| configured.parse().unwrap_or(tracing::Level::WARN))
}
