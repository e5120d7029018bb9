use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

/// Install a per-test default subscriber so handler logs show up in captured
/// test output. Scoped by the returned guard; tests hold it for their lifetime.
pub fn init_tracing() -> DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("mockbird=debug")
        }))
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}
