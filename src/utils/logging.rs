use std::str::FromStr;

use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Parses a level name such as `"debug"`, falling back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. Call once, before anything logs.
pub fn init(level: &str) -> Result<()> {
    SimpleLogger::new().with_level(parse_level(level)).init()?;
    Ok(())
}
