//! Traversal of stored entries in store order

use super::ObjectStore;
use std::iter::FusedIterator;
use std::slice;

impl<T> ObjectStore<T> {
    /// Call `visit` with every value until it returns `false`
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&T) -> bool,
    {
        for value in &self.values {
            if !visit(value) {
                break;
            }
        }
    }

    /// Call `visit` with every id and value until it returns `false`
    pub fn for_each_with_id<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &T) -> bool,
    {
        for (id, value) in self.ids.iter().zip(&self.values) {
            if !visit(id, value) {
                break;
            }
        }
    }

    /// Iterate over `(id, value)` pairs in store order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ids: self.ids.iter(),
            values: self.values.iter(),
        }
    }

    /// Iterate over ids in store order
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator + '_ {
        self.ids.iter().map(String::as_str)
    }

    /// Iterate over values in store order
    pub fn values(&self) -> slice::Iter<'_, T> {
        self.values.iter()
    }
}

/// Iterator over the entries of an [`ObjectStore`]
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    ids: slice::Iter<'a, String>,
    values: slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a str, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        let value = self.values.next()?;
        Some((id.as_str(), value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.ids.next_back()?;
        let value = self.values.next_back()?;
        Some((id.as_str(), value))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a ObjectStore<T> {
    type Item = (&'a str, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{ObjectStore, SortOrder};

    fn sample() -> ObjectStore<u32> {
        let mut store = ObjectStore::with_order(SortOrder::Ascending);
        store.set("b", 2);
        store.set("a", 1);
        store.set("c", 3);
        store
    }

    #[test]
    fn test_for_each_visits_in_order() {
        let store = sample();
        let mut seen = Vec::new();
        store.for_each(|v| {
            seen.push(*v);
            true
        });
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_for_each_stops_early() {
        let store = sample();
        let mut seen = Vec::new();
        store.for_each_with_id(|id, v| {
            seen.push(format!("{}{}", id, v));
            id != "b"
        });
        assert_eq!(seen, vec!["a1", "b2"]);

        let mut calls = 0;
        store.for_each(|_| {
            calls += 1;
            false
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_iterators() {
        let store = sample();
        let pairs: Vec<_> = store.iter().collect();
        assert_eq!(pairs, vec![("a", &1), ("b", &2), ("c", &3)]);
        assert_eq!(store.iter().len(), 3);
        assert_eq!(store.iter().next_back(), Some(("c", &3)));
        assert_eq!(store.ids().rev().collect::<Vec<_>>(), vec!["c", "b", "a"]);
        assert_eq!(store.values().sum::<u32>(), 6);

        let mut count = 0;
        for (id, value) in &store {
            assert_eq!(store.get(id), Some(value));
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn test_empty_store_iteration() {
        let store: ObjectStore<u32> = ObjectStore::new();
        let mut called = false;
        store.for_each(|_| {
            called = true;
            true
        });
        assert!(!called);
        assert_eq!(store.iter().next(), None);
    }
}
