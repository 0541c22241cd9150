mod config;
mod launcher;
mod logging;
mod paths;
mod payload;

use anyhow::Result;

fn main() -> Result<()> {
    logging::init();
    launcher::run()
}
