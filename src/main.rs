use anyhow::Result;
use sheet_explorer::{config, logging};

fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::Config::load()?;

    sheet_explorer::run(&config)?;

    Ok(())
}
