//! Configuration APIs for idstore
//!
//! Store settings can be built in code, taken from a preset, read from
//! environment variables or loaded from a JSON file.
//!
//! # Configuration Traits
//!
//! The [`Config`] trait provides validation, environment initialization,
//! presets and file persistence for every configuration type.
//!
//! # Core Configuration Types
//!
//! - [`StoreConfig`]: capacity growth, id synthesis and sort order of an
//!   [`ObjectStore`](crate::ObjectStore)
//!
//! # Preset Configurations
//!
//! ```rust
//! use idstore::config::{Config, StoreConfig};
//!
//! // large growth steps for insert-heavy workloads
//! let config = StoreConfig::performance_preset();
//!
//! // minimal over-allocation
//! let config = StoreConfig::memory_preset();
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use idstore::config::{Config, StoreConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // reads IDSTORE_CAPACITY_INCREMENT, IDSTORE_SORT_ORDER, ...
//! let config = StoreConfig::from_env()?;
//!
//! // same variables under a custom prefix
//! let config = StoreConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod store;


pub use store::StoreConfig;

/// Prefix of the environment variables read by [`Config::from_env`]
pub const ENV_PREFIX: &str = "IDSTORE_";

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, `Err` with details if invalid.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Environment variables use the format `IDSTORE_{FIELD}`, for example
    /// `IDSTORE_CAPACITY_INCREMENT=64`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Initialize configuration from environment variables with a custom prefix.
    ///
    /// Unset or unparsable variables keep their default value; the result is
    /// validated before it is returned.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset favouring speed over memory.
    fn performance_preset() -> Self;

    /// Preset favouring memory over speed.
    fn memory_preset() -> Self;

    /// Preset with predictable per-operation cost.
    fn realtime_preset() -> Self;

    /// Balanced preset, the defaults.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse an environment variable, falling back to `default`.
///
/// # Arguments
///
/// * `var_name` - The environment variable name
/// * `default` - The value used when the variable is unset or does not parse
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
