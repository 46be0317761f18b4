//! # idstore: in-memory object store keyed by string ids
//!
//! This crate provides [`ObjectStore`], a container that keeps values of any
//! type under unique string ids, either unordered, sorted by id or sorted by a
//! caller supplied comparison over the values.
//!
//! ## Key Features
//!
//! - **Ordered or unordered**: ascending or descending by id, or by value
//!   through a comparator, with ties broken by id
//! - **Binary search**: O(log n) lookups in sorted stores, plus an O(1) fast
//!   path for repeated access to the same id
//! - **Id synthesis**: ids built from numbers and text with configurable
//!   separator and padding, from a per-value callback, or from a counter
//! - **Rebuilds**: changing the order, comparator or id callback re-places
//!   every entry, so the order invariant always holds
//! - **Amortized growth**: capacity grows in configurable increments
//!
//! ## Quick Start
//!
//! ```rust
//! use idstore::{ObjectStore, SortOrder};
//!
//! #[derive(Debug, Default)]
//! struct City {
//!     name: String,
//!     population: u32,
//! }
//!
//! let mut cities = ObjectStore::with_order(SortOrder::Ascending);
//! cities.add_with_id("PAR", || City { name: "Paris".into(), population: 2_102_650 });
//! cities.add_with_id("IEV", || City { name: "Kyiv".into(), population: 2_952_301 });
//! assert_eq!(cities.ids().collect::<Vec<_>>(), vec!["IEV", "PAR"]);
//!
//! // order by population, largest first
//! cities.set_compare_callback(|a: &City, b: &City| b.population.cmp(&a.population));
//! assert_eq!(cities.values().next().unwrap().name, "Kyiv");
//!
//! // ids derived from the values
//! let format = cities.id_format().clone();
//! cities.set_id_callback(move |c: &City| format.make_id(c.name.as_str()))?;
//! assert!(cities.contains_id("Paris"));
//!
//! cities.for_each_with_id(|id, city| {
//!     println!("{}: {}", id, city.population);
//!     true
//! });
//! # Ok::<(), idstore::StoreError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod store;

pub use config::{Config, StoreConfig};
pub use error::{Result, StoreError};
pub use store::{
    CompareCallback, IdCallback, IdCompareCallback, IdFormat, IdPart, IntoIdParts, Iter,
    ObjectStore, SortOrder,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently only logs the version)
pub fn init() {
    log::debug!("Initializing idstore v{}", VERSION);
}
