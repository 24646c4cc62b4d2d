// Path: crates/workflow/src/validate.rs

//! Eager precondition validation of the run configuration.
//!
//! Runs before any network activity; the first violation aborts the run
//! naming the offending field. Never retries.

use por_types::config::RunConfig;
use por_types::error::ConfigError;

/// Checks that every required configuration field is present and, after
/// trimming whitespace, non-empty. Fields are checked in declaration order.
pub fn validate(config: &RunConfig) -> Result<(), ConfigError> {
    require("schedule", &config.schedule)?;
    require("url", &config.url)?;
    require("balance_reader_address", &config.balance_reader_address)?;
    require("address_one", &config.address_one)?;
    require("address_two", &config.address_two)?;
    require("data_feeds_cache_address", &config.data_feeds_cache_address)?;
    require("feed_id", &config.feed_id)?;
    tracing::info!("config is valid");
    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        tracing::error!(field, "config value cannot be empty");
        return Err(ConfigError::Missing { field });
    }
    Ok(())
}
