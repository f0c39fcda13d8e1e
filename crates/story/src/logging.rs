//! Stdout tracing for the demo. `RUST_LOG=gpui_dnd_sort_core=trace` shows every frame.

use anyhow::Context as _;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

pub fn init() -> anyhow::Result<()> {
    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(fmt::layer().with_writer(std::io::stdout));
    tracing::subscriber::set_global_default(subscriber)
        .context("install global tracing subscriber")?;
    tracing::info!("logging initialized");
    Ok(())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
