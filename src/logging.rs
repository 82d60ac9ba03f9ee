use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "velostream=info".into());

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
