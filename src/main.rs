mod app;
mod cli;
mod clock;
mod error;
mod logging;
mod renderer;
mod shader;
mod window;

use std::process;

use log::{error, info};

use crate::app::App;
use crate::logging::ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

fn main() {
    // Initialize logging
    match log::set_logger(&LOGGER) {
        Ok(_) => log::set_max_level(log::LevelFilter::Info),
        Err(e) => println!("Failed to initialize logger: {}", e),
    }

    info!("fragview - Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run() {
        error!("{err:#}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = cli::parse()?;
    let mut app = App::new(&config)?;
    app.run();
    Ok(())
}
