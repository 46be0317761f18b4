//! Object store configuration.

use super::{parse_env_var, Config};
use crate::error::{Result, StoreError};
use crate::store::{
    check_capacity_increment, IdFormat, SortOrder, DEFAULT_CAPACITY_INCREMENT,
    DEFAULT_ID_COUNTER_START, DEFAULT_ID_DECIMALS, DEFAULT_ID_DIGITS, DEFAULT_ID_SEPARATOR,
    MIN_CAPACITY_INCREMENT,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings applied when an [`ObjectStore`](crate::ObjectStore) is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Slots reserved each time the store grows (2 to 2^24)
    pub capacity_increment: usize,
    /// Separator between the parts of a synthesized id (non-empty)
    pub id_separator: String,
    /// Zero-padded width of integer id parts (at least 1)
    pub id_digits: usize,
    /// Fractional digits of float id parts (at least 1)
    pub id_decimals: usize,
    /// First value of the auto-increment id counter
    pub id_counter_start: u64,
    /// Id ordering of the entries
    pub sort_order: SortOrder,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity_increment: DEFAULT_CAPACITY_INCREMENT,
            id_separator: DEFAULT_ID_SEPARATOR.to_string(),
            id_digits: DEFAULT_ID_DIGITS,
            id_decimals: DEFAULT_ID_DECIMALS,
            id_counter_start: DEFAULT_ID_COUNTER_START,
            sort_order: SortOrder::Unordered,
        }
    }
}

impl StoreConfig {
    /// Id format described by this configuration
    pub fn id_format(&self) -> Result<IdFormat> {
        IdFormat::new(self.id_separator.clone(), self.id_digits, self.id_decimals)
    }
}

impl Config for StoreConfig {
    fn validate(&self) -> Result<()> {
        check_capacity_increment(self.capacity_increment)?;
        self.id_format()?;
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.capacity_increment = parse_env_var(
            &format!("{}CAPACITY_INCREMENT", prefix),
            config.capacity_increment,
        );
        config.id_separator = parse_env_var(&format!("{}ID_SEPARATOR", prefix), config.id_separator);
        config.id_digits = parse_env_var(&format!("{}ID_DIGITS", prefix), config.id_digits);
        config.id_decimals = parse_env_var(&format!("{}ID_DECIMALS", prefix), config.id_decimals);
        config.id_counter_start = parse_env_var(
            &format!("{}ID_COUNTER_START", prefix),
            config.id_counter_start,
        );
        config.sort_order = parse_env_var(&format!("{}SORT_ORDER", prefix), config.sort_order);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            capacity_increment: 1024,
            sort_order: SortOrder::Ascending,
            ..Self::default()
        }
    }

    fn memory_preset() -> Self {
        Self {
            capacity_increment: MIN_CAPACITY_INCREMENT,
            ..Self::default()
        }
    }

    fn realtime_preset() -> Self {
        Self {
            capacity_increment: 64,
            sort_order: SortOrder::Ascending,
            ..Self::default()
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            StoreError::configuration(format!("Failed to serialize store config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            StoreError::configuration(format!("Failed to parse store config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
