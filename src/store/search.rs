//! Entry lookup
//!
//! `search` returns `Ok(index)` for a match and `Err(index)` with the position
//! a new entry has to be inserted at, the same convention as
//! `slice::binary_search`.

use super::ObjectStore;
use std::cmp::Ordering;

impl<T> ObjectStore<T> {
    /// Locate `id`, optionally guided by the entry's value
    ///
    /// Sorted stores are bisected: by id, or by value when a value comparator is
    /// installed and `value` is given. A value-ordered store cannot be bisected
    /// by id alone, so id-only lookups there scan linearly like an unordered
    /// store does.
    pub(crate) fn search(&self, id: &str, value: Option<&T>) -> Result<usize, usize> {
        if let Some(index) = self.cursor.get() {
            if index < self.ids.len() && self.ids[index] == id {
                return Ok(index);
            }
        }

        let result = match (self.compare.is_some(), value) {
            (true, Some(value)) => {
                self.bisect(|index| self.compare_entry(index, Some(id), value))
            }
            (false, _) if self.order.is_sorted() => {
                self.bisect(|index| self.compare_ids(&self.ids[index], id))
            }
            _ => self.scan(id),
        };

        self.cursor.set(Some(match result {
            Ok(index) | Err(index) => index,
        }));
        result
    }

    /// Find the first entry whose value compares equal to `probe`, ignoring ids
    ///
    /// Always misses when no value comparator is installed.
    pub(crate) fn search_value(&self, probe: &T) -> Option<usize> {
        self.compare.as_ref()?;
        let mut index = self
            .bisect(|index| self.compare_entry(index, None, probe))
            .ok()?;
        // bisect stops at any equal value, walk back to the leftmost one
        while index > 0 && self.compare_entry(index - 1, None, probe) == Ordering::Equal {
            index -= 1;
        }
        self.cursor.set(Some(index));
        Some(index)
    }

    /// Position at which `id`/`value` belongs under the current ordering
    pub(crate) fn insertion_point(&self, id: &str, value: &T) -> usize {
        match self.search(id, Some(value)) {
            Ok(index) | Err(index) => index,
        }
    }

    fn scan(&self, id: &str) -> Result<usize, usize> {
        match self.ids.iter().position(|stored| stored == id) {
            Some(index) => Ok(index),
            None => Err(self.ids.len()),
        }
    }

    /// Lower-bound search that stops at the first probe comparing equal
    ///
    /// `compare(index)` orders the stored entry at `index` against the query.
    fn bisect<F>(&self, compare: F) -> Result<usize, usize>
    where
        F: Fn(usize) -> Ordering,
    {
        let mut first = 0;
        let mut count = self.ids.len();
        while count > 0 {
            let step = count / 2;
            let probe = first + step;
            match compare(probe) {
                Ordering::Less => {
                    first = probe + 1;
                    count -= step + 1;
                }
                Ordering::Equal => return Ok(probe),
                Ordering::Greater => count = step,
            }
        }
        Err(first)
    }

    pub(crate) fn compare_ids(&self, stored: &str, query: &str) -> Ordering {
        let ordering = match &self.id_compare {
            Some(compare) => compare(stored, query),
            None => stored.as_bytes().cmp(query.as_bytes()),
        };
        self.order.apply(ordering)
    }

    /// Order the entry at `index` against a query value, then against the
    /// query id when one is given
    fn compare_entry(&self, index: usize, id: Option<&str>, value: &T) -> Ordering {
        let ordering = match &self.compare {
            Some(compare) => compare(&self.values[index], value),
            None => Ordering::Equal,
        };
        match id {
            Some(id) if ordering == Ordering::Equal => self.compare_ids(&self.ids[index], id),
            _ => ordering,
        }
    }
}
