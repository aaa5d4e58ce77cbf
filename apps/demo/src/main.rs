mod handlers;

use anyhow::Context;
use std::{env, fs};
use strata::{Config, Diagnostics, Level, LevelFilter, Logger};

const CONFIG_ENV: &str = "STRATA_CONFIG";

fn main() -> anyhow::Result<()> {
    Diagnostics::builder().level(LevelFilter::WARN).init()?;

    let mut builder = Logger::builder().config(load_config()?).level(Level::Debug);
    if env::args().skip(1).any(|arg| arg == "--json") {
        builder = builder.json();
    }
    let logger = builder.build()?;

    strata::info!(logger, "Application started");
    handlers::handle_user(&logger)?;

    Ok(())
}

/// Reads a JSON [`Config`] from the file named by `STRATA_CONFIG`, if set.
fn load_config() -> anyhow::Result<Config> {
    let Some(path) = env::var_os(CONFIG_ENV) else {
        return Ok(Config::default());
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.to_string_lossy()))?;
    let config: Config = serde_json::from_str(&raw).context("parsing resolver config")?;
    config.validate()?;
    Ok(config)
}
