use ferrous_resolv_domain::{CliOverrides, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// An explicit `--log-level` wins; otherwise `RUST_LOG`, then the config file.
pub fn init_logging(config: &Config, level_from_cli: bool) {
    let level = config.logging.level.as_str();
    let filter = if level_from_cli {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(level, "Logging initialized");
}
