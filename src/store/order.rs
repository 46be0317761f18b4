//! Sort order, comparator management and rebuilds
//!
//! Any change of the active ordering rule (sort order, value comparator, id
//! comparator) or of the id scheme (id callback) rebuilds the store: every
//! entry is taken out and placed again through the normal insertion path, so
//! ordering never depends on a separate sort routine.

use super::ObjectStore;
use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::mem;
use std::str::FromStr;

/// Ordering of entries by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Insertion order, linear lookups
    #[default]
    Unordered,
    /// Ids A to Z
    Ascending,
    /// Ids Z to A
    Descending,
}

impl SortOrder {
    /// Whether entries are kept sorted by id
    #[inline]
    pub fn is_sorted(self) -> bool {
        !matches!(self, SortOrder::Unordered)
    }

    /// Apply the direction to an ascending comparison result
    #[inline]
    pub(crate) fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Descending => ordering.reverse(),
            _ => ordering,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Unordered => "unordered",
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        };
        f.write_str(name)
    }
}

impl FromStr for SortOrder {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "unordered" | "none" | "unsorted" => Ok(SortOrder::Unordered),
            "ascending" | "asc" => Ok(SortOrder::Ascending),
            "descending" | "desc" => Ok(SortOrder::Descending),
            other => Err(StoreError::configuration(format!(
                "unknown sort order '{}'",
                other
            ))),
        }
    }
}

impl<T> ObjectStore<T> {
    /// Current id ordering
    pub fn sort_order(&self) -> SortOrder {
        self.order
    }

    /// Whether entries are kept in any order (by id or by value)
    pub fn is_sorted(&self) -> bool {
        self.order.is_sorted() || self.compare.is_some()
    }

    /// Change the id ordering
    ///
    /// Rebuilds the store when the order actually changes. With a value
    /// comparator installed the order still decides the direction of the id
    /// tie-break, so the rebuild happens in that case too.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        if order == self.order {
            return;
        }
        self.order = order;
        self.rebuild();
    }

    /// Order entries by their values
    ///
    /// Values comparing equal are ordered by id. The store is rebuilt with all
    /// ids preserved.
    pub fn set_compare_callback<F>(&mut self, compare: F)
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        self.compare = Some(Box::new(compare));
        self.rebuild();
    }

    /// Drop the value comparator and fall back to the id ordering
    pub fn clear_compare_callback(&mut self) {
        if self.compare.take().is_some() {
            self.rebuild();
        }
    }

    /// Whether a value comparator is installed
    pub fn has_compare_callback(&self) -> bool {
        self.compare.is_some()
    }

    /// Replace the byte-wise id comparison
    ///
    /// Two ids comparing equal are treated as the same entry, so the callback
    /// must only return `Equal` for identical ids. An unordered store switches
    /// to [`SortOrder::Ascending`].
    pub fn set_id_compare_callback<F>(&mut self, compare: F)
    where
        F: Fn(&str, &str) -> Ordering + 'static,
    {
        self.id_compare = Some(Box::new(compare));
        if !self.order.is_sorted() {
            self.order = SortOrder::Ascending;
        }
        self.rebuild();
    }

    /// Return to byte-wise id comparison
    pub fn clear_id_compare_callback(&mut self) {
        if self.id_compare.take().is_some() && self.is_sorted() {
            self.rebuild();
        }
    }

    /// Whether an id comparator is installed
    pub fn has_id_compare_callback(&self) -> bool {
        self.id_compare.is_some()
    }

    /// Derive ids from values
    ///
    /// The callback is used by [`ObjectStore::add`] and every existing entry is
    /// re-keyed with it. If two stored values map to the same id the callback
    /// is rejected and the store is left as it was.
    pub fn set_id_callback<F>(&mut self, make_id: F) -> Result<()>
    where
        F: Fn(&T) -> String + 'static,
    {
        let ids: Vec<String> = self.values.iter().map(&make_id).collect();
        if let Some(id) = first_duplicate(&ids) {
            log::warn!("id callback rejected, '{}' would be assigned twice", id);
            return Err(StoreError::duplicate_id(id));
        }
        self.id_callback = Some(Box::new(make_id));
        self.ids = ids;
        self.rebuild();
        Ok(())
    }

    /// Go back to counter ids; existing ids are kept
    pub fn clear_id_callback(&mut self) {
        self.id_callback = None;
    }

    /// Whether an id callback is installed
    pub fn has_id_callback(&self) -> bool {
        self.id_callback.is_some()
    }

    /// Re-place every entry under the current ordering rules
    ///
    /// Only needed after values were edited in place through
    /// [`ObjectStore::get_mut`] while a value comparator is active.
    pub fn resort(&mut self) {
        self.rebuild();
    }

    pub(crate) fn rebuild(&mut self) {
        let ids = mem::take(&mut self.ids);
        let values = mem::take(&mut self.values);
        self.cursor.set(None);

        let count = ids.len();
        self.ids.reserve_exact(count);
        self.values.reserve_exact(count);

        let sorted = self.is_sorted();
        for (id, value) in ids.into_iter().zip(values) {
            if sorted {
                let index = self.insertion_point(&id, &value);
                self.insert_at(index, id, value);
            } else {
                self.ids.push(id);
                self.values.push(value);
            }
        }
        self.cursor.set(None);

        log::debug!(
            "rebuilt store with {} entries (order: {}, value comparator: {})",
            count,
            self.order,
            self.compare.is_some()
        );
    }
}

fn first_duplicate(ids: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Some(id.as_str());
        }
    }
    None
}
