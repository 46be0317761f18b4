//! ObjectStore: values of any type kept under unique string ids
//!
//! Ids and values live in two index-aligned vectors. Entries are kept
//! unordered, sorted by id (ascending or descending) or sorted by a caller
//! supplied comparison over the values. Every insert searches first and then
//! places the entry where it belongs, so the order holds after each call
//! without a separate sort step.
//!
//! # Lookups
//!
//! - Unordered stores scan linearly: O(n)
//! - Id-sorted stores and value-sorted stores (when the value is known) use a
//!   lower-bound binary search: O(log n)
//! - The position of the last entry found is cached, so repeated access to the
//!   same id is O(1)
//!
//! # Growth
//!
//! When an insert hits the reserved capacity both vectors reserve
//! `len + capacity_increment` slots at once.
//!
//! # Example
//!
//! ```rust
//! use idstore::{ObjectStore, SortOrder};
//!
//! let mut store = ObjectStore::with_order(SortOrder::Ascending);
//! store.set("b", 2);
//! store.set("a", 1);
//! store.set("c", 3);
//! assert!(store.added());
//!
//! assert_eq!(store.ids().collect::<Vec<_>>(), vec!["a", "b", "c"]);
//! assert_eq!(store.get("b"), Some(&2));
//! assert!(!store.delete("zzz"));
//! ```

mod id;
mod iter;
mod order;
mod search;

pub use id::{
    IdFormat, IdPart, IntoIdParts, DEFAULT_ID_COUNTER_START, DEFAULT_ID_DECIMALS,
    DEFAULT_ID_DIGITS, DEFAULT_ID_SEPARATOR,
};
pub use iter::Iter;
pub use order::SortOrder;

use crate::config::{Config, StoreConfig};
use crate::error::{Result, StoreError};
use id::IdGenerator;
use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

/// Default number of slots reserved on growth
pub const DEFAULT_CAPACITY_INCREMENT: usize = 10;
/// Smallest accepted capacity increment
pub const MIN_CAPACITY_INCREMENT: usize = 2;
/// Largest accepted capacity increment
pub const MAX_CAPACITY_INCREMENT: usize = 1 << 24;

/// Comparison over values, used to keep a store ordered by value
pub type CompareCallback<T> = Box<dyn Fn(&T, &T) -> Ordering>;
/// Comparison over ids, replacing byte-wise comparison
pub type IdCompareCallback = Box<dyn Fn(&str, &str) -> Ordering>;
/// Derives the id of a value
pub type IdCallback<T> = Box<dyn Fn(&T) -> String>;

/// Store of values under unique string ids
///
/// The store is single threaded: the cached lookup position lives in a
/// [`Cell`], so it can be refreshed by `&self` lookups and the type is not
/// `Sync`.
///
/// References handed out by lookups borrow the store and therefore end before
/// the next mutation.
pub struct ObjectStore<T> {
    ids: Vec<String>,
    values: Vec<T>,
    /// Last found position or insertion point
    cursor: Cell<Option<usize>>,
    capacity_increment: usize,
    order: SortOrder,
    compare: Option<CompareCallback<T>>,
    id_compare: Option<IdCompareCallback>,
    id_callback: Option<IdCallback<T>>,
    generator: IdGenerator,
    added: bool,
}

impl<T> ObjectStore<T> {
    /// Create an empty, unordered store
    pub fn new() -> Self {
        Self::with_order(SortOrder::Unordered)
    }

    /// Create an empty store kept in the given id order
    pub fn with_order(order: SortOrder) -> Self {
        Self {
            ids: Vec::new(),
            values: Vec::new(),
            cursor: Cell::new(None),
            capacity_increment: DEFAULT_CAPACITY_INCREMENT,
            order,
            compare: None,
            id_compare: None,
            id_callback: None,
            generator: IdGenerator::default(),
            added: false,
        }
    }

    /// Create an empty store ordered by `compare` over values
    pub fn with_compare<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        let mut store = Self::new();
        store.compare = Some(Box::new(compare));
        store
    }

    /// Create an empty store sorted ascending by `compare` over ids
    pub fn with_id_compare<F>(compare: F) -> Self
    where
        F: Fn(&str, &str) -> Ordering + 'static,
    {
        let mut store = Self::with_order(SortOrder::Ascending);
        store.id_compare = Some(Box::new(compare));
        store
    }

    /// Create an empty store from a validated configuration
    pub fn with_config(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let format = config.id_format()?;
        let mut store = Self::with_order(config.sort_order);
        store.capacity_increment = config.capacity_increment;
        store.generator = IdGenerator::new(format, config.id_counter_start);
        Ok(store)
    }

    /// Snapshot of the current settings
    pub fn config(&self) -> StoreConfig {
        let format = &self.generator.format;
        StoreConfig {
            capacity_increment: self.capacity_increment,
            id_separator: format.separator().to_string(),
            id_digits: format.digits(),
            id_decimals: format.decimals(),
            id_counter_start: self.generator.counter(),
            sort_order: self.order,
        }
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the store holds no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of entries that fit without reallocating
    pub fn capacity(&self) -> usize {
        self.ids.capacity().min(self.values.capacity())
    }

    /// Whether the last insert or upsert created a new entry
    pub fn added(&self) -> bool {
        self.added
    }

    /// Slots reserved whenever the store has to grow
    pub fn capacity_increment(&self) -> usize {
        self.capacity_increment
    }

    /// Change the growth step
    ///
    /// Values outside `MIN_CAPACITY_INCREMENT..=MAX_CAPACITY_INCREMENT` are
    /// rejected and the previous step is kept.
    pub fn set_capacity_increment(&mut self, increment: usize) -> Result<()> {
        check_capacity_increment(increment).map_err(log_rejected)?;
        self.capacity_increment = increment;
        Ok(())
    }

    /// Release reserved but unused capacity
    pub fn shrink_to_fit(&mut self) {
        self.ids.shrink_to_fit();
        self.values.shrink_to_fit();
    }

    /// Insert or replace the value under `id`
    ///
    /// `make` always runs: a new entry is created when `id` is absent, the
    /// stored value is replaced otherwise.
    pub fn add_with_id<S, F>(&mut self, id: S, make: F) -> &mut T
    where
        S: Into<String>,
        F: FnOnce() -> T,
    {
        let (index, _) = self.upsert(id.into(), make());
        &mut self.values[index]
    }

    /// Make sure an entry exists under `id`
    ///
    /// A missing entry is created with `T::default()`; an existing one is
    /// returned unchanged.
    pub fn add_default<S>(&mut self, id: S) -> &mut T
    where
        S: Into<String>,
        T: Default,
    {
        self.get_or_add_with(id, T::default)
    }

    /// Return the value under `id`, inserting `make()` if it is missing
    pub fn get_or_add_with<S, F>(&mut self, id: S, make: F) -> &mut T
    where
        S: Into<String>,
        F: FnOnce() -> T,
    {
        let id = id.into();
        let index = match self.search(&id, None) {
            Ok(index) => {
                self.added = false;
                index
            }
            Err(index) => {
                self.added = true;
                self.insert_new(index, id, make())
            }
        };
        &mut self.values[index]
    }

    /// Insert `value` under a synthesized id and return that id
    ///
    /// The id comes from the id callback when one is installed, from the
    /// auto-increment counter otherwise. If the id is already taken nothing is
    /// inserted and [`StoreError::DuplicateId`] is returned.
    pub fn add(&mut self, value: T) -> Result<String> {
        let id = match &self.id_callback {
            Some(make_id) => make_id(&value),
            None => self.generator.next_id(),
        };
        match self.search(&id, None) {
            Ok(_) => {
                self.added = false;
                log::warn!("synthesized id '{}' is already in use", id);
                Err(StoreError::duplicate_id(id))
            }
            Err(index) => {
                self.added = true;
                self.insert_new(index, id.clone(), value);
                Ok(id)
            }
        }
    }

    /// Insert or overwrite the value under `id`, returning the previous value
    pub fn set<S>(&mut self, id: S, value: T) -> Option<T>
    where
        S: Into<String>,
    {
        self.upsert(id.into(), value).1
    }

    /// Value stored under `id`
    pub fn get(&self, id: &str) -> Option<&T> {
        self.search(id, None).ok().map(|index| &self.values[index])
    }

    /// Mutable access to the value stored under `id`
    ///
    /// In a value-ordered store, editing fields the comparator looks at leaves
    /// the entry at its old position; use [`ObjectStore::update`] instead, or
    /// call [`ObjectStore::resort`] afterwards.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        let index = self.search(id, None).ok()?;
        Some(&mut self.values[index])
    }

    /// Edit the value under `id` in place and restore the value order
    ///
    /// Returns `false` if there is no such entry.
    pub fn update<F>(&mut self, id: &str, edit: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.search(id, None) {
            Ok(index) => {
                edit(&mut self.values[index]);
                self.reposition(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Whether an entry exists under `id`
    pub fn contains_id(&self, id: &str) -> bool {
        self.search(id, None).is_ok()
    }

    /// Entry whose value compares equal to `probe` under the value comparator
    ///
    /// Ids play no part in the match. Without a value comparator this always
    /// returns `None`.
    pub fn find_by_value(&self, probe: &T) -> Option<(&str, &T)> {
        let index = self.search_value(probe)?;
        Some((self.ids[index].as_str(), &self.values[index]))
    }

    /// Whether some value compares equal to `probe`
    pub fn exists_by_value(&self, probe: &T) -> bool {
        self.search_value(probe).is_some()
    }

    /// Remove the entry whose value compares equal to `probe`
    pub fn delete_by_value(&mut self, probe: &T) -> Option<(String, T)> {
        let index = self.search_value(probe)?;
        Some(self.remove_at(index))
    }

    /// Remove the entry under `id`, returning whether it existed
    pub fn delete(&mut self, id: &str) -> bool {
        self.remove(id).is_some()
    }

    /// Remove the entry under `id` and return its value
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.search(id, None).ok()?;
        Some(self.remove_at(index).1)
    }

    /// Remove all entries; reserved capacity is kept
    pub fn reset(&mut self) {
        self.ids.clear();
        self.values.clear();
        self.cursor.set(None);
    }

    /// Id format used by [`ObjectStore::make_id`] and the counter
    pub fn id_format(&self) -> &IdFormat {
        &self.generator.format
    }

    /// Change the separator of synthesized ids; empty is rejected
    ///
    /// Stored ids are not rewritten.
    pub fn set_id_separator<S: Into<String>>(&mut self, separator: S) -> Result<()> {
        self.generator
            .format
            .set_separator(separator)
            .map_err(log_rejected)
    }

    /// Change the zero-padded width of integer parts; 0 is rejected
    pub fn set_id_digits(&mut self, digits: usize) -> Result<()> {
        self.generator.format.set_digits(digits).map_err(log_rejected)
    }

    /// Change the fractional digits of float parts; 0 is rejected
    pub fn set_id_decimals(&mut self, decimals: usize) -> Result<()> {
        self.generator
            .format
            .set_decimals(decimals)
            .map_err(log_rejected)
    }

    /// Build an id from one value or a tuple of values with the store's format
    pub fn make_id<'a, P: IntoIdParts<'a>>(&self, parts: P) -> String {
        self.generator.format.make_id(parts)
    }

    /// Draw the next id from the auto-increment counter
    pub fn next_id(&mut self) -> String {
        self.generator.next_id()
    }

    /// Value the counter hands out next
    pub fn id_counter(&self) -> u64 {
        self.generator.counter()
    }

    /// Overwrite an existing entry or insert a new one
    fn upsert(&mut self, id: String, value: T) -> (usize, Option<T>) {
        match self.search(&id, None) {
            Ok(index) => {
                self.added = false;
                let previous = mem::replace(&mut self.values[index], value);
                (self.reposition(index), Some(previous))
            }
            Err(index) => {
                self.added = true;
                (self.insert_new(index, id, value), None)
            }
        }
    }

    /// Insert an entry whose id is known to be absent
    ///
    /// `hint` is the insertion point of the id-only search, which is final
    /// unless the store is ordered by value.
    fn insert_new(&mut self, hint: usize, id: String, value: T) -> usize {
        let index = if self.compare.is_some() {
            self.insertion_point(&id, &value)
        } else {
            hint
        };
        self.insert_at(index, id, value);
        index
    }

    /// Move the entry at `index` to where its value now belongs
    fn reposition(&mut self, index: usize) -> usize {
        if self.compare.is_none() {
            return index;
        }
        let (id, value) = self.remove_at(index);
        let target = self.insertion_point(&id, &value);
        self.insert_at(target, id, value);
        target
    }

    fn insert_at(&mut self, index: usize, id: String, value: T) {
        self.reserve_for_insert();
        log::trace!("insert '{}' at {}", id, index);
        self.ids.insert(index, id);
        self.values.insert(index, value);
        self.cursor.set(Some(index));
    }

    fn remove_at(&mut self, index: usize) -> (String, T) {
        let id = self.ids.remove(index);
        let value = self.values.remove(index);
        log::trace!("removed '{}' from {}", id, index);
        self.cursor.set(None);
        (id, value)
    }

    fn reserve_for_insert(&mut self) {
        let len = self.ids.len();
        if len < self.ids.capacity() && len < self.values.capacity() {
            return;
        }
        let increment = self.capacity_increment;
        if self.ids.try_reserve_exact(increment).is_err()
            || self.values.try_reserve_exact(increment).is_err()
        {
            // the insert itself still grows the vectors the usual way
            log::warn!(
                "could not reserve {} more slots at length {}, growing by one",
                increment,
                len
            );
        }
    }
}

/// Validate a growth step against the accepted range
pub(crate) fn check_capacity_increment(increment: usize) -> Result<()> {
    if !(MIN_CAPACITY_INCREMENT..=MAX_CAPACITY_INCREMENT).contains(&increment) {
        return Err(StoreError::configuration(format!(
            "capacity increment must be between {} and {}, got {}",
            MIN_CAPACITY_INCREMENT, MAX_CAPACITY_INCREMENT, increment
        )));
    }
    Ok(())
}

fn log_rejected(err: StoreError) -> StoreError {
    log::warn!("{}, keeping previous setting", err);
    err
}

impl<T> Default for ObjectStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObjectStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStore")
            .field("entries", &EntriesDebug(self))
            .field("order", &self.order)
            .field("value_comparator", &self.compare.is_some())
            .field("id_comparator", &self.id_compare.is_some())
            .field("id_callback", &self.id_callback.is_some())
            .field("capacity_increment", &self.capacity_increment)
            .field("id_format", &self.generator.format)
            .field("added", &self.added)
            .finish()
    }
}

struct EntriesDebug<'a, T>(&'a ObjectStore<T>);

impl<T: fmt::Debug> fmt::Debug for EntriesDebug<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<S: Into<String>, T> Extend<(S, T)> for ObjectStore<T> {
    fn extend<I: IntoIterator<Item = (S, T)>>(&mut self, iter: I) {
        for (id, value) in iter {
            self.set(id, value);
        }
    }
}

impl<S: Into<String>, T> FromIterator<(S, T)> for ObjectStore<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
