use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr.
///
/// The level can be overridden per target via the `RUST_LOG` environment
/// variable; otherwise the `--log-level` flag applies to both crates.
pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    let default_filter = format!("adsweep={level},adsweep_core={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(true),
        )
        .init();

    tracing::info!("adsweep logging initialized (level={level})");
    Ok(())
}
