use std::error::Error;

use log::warn;

use deskfolio::{config, Config, Storage};

fn main() -> Result<(), Box<dyn Error>> {
    let storage = Storage::open_default()?;

    // stderr would scribble over the alternate screen, so log to a file
    let log_path = storage.root().join("deskfolio.log");
    let _log2 = log2::open(&log_path.to_string_lossy()).module(false).start();

    let config = config::load_config().unwrap_or_else(|e| {
        warn!("falling back to default config: {e}");
        Config::default()
    });

    deskfolio::run(config, storage)?;
    Ok(())
}
