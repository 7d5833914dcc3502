mod app;
mod config;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use log::info;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting multiclip demo console");

    // Load configuration
    let path = env::args().nth(1).map(PathBuf::from);
    let config = config::DemoConfig::load(path)?;
    info!("Loaded configuration: {:?}", config);

    let app = app::App::new(config);
    app.run()?;

    Ok(())
}
