//! Shared collection abstractions used by the method index.
//!
//! Both collections are backed by `dashmap`, so writers on different shards never
//! contend and readers only take a shard read lock.

use dashmap::{DashMap, DashSet};
use std::borrow::Borrow;
use std::hash::Hash;

pub struct ConcurrentMap<K, V> {
    inner: DashMap<K, V>,
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    pub fn get_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    /// Atomically create-or-update the entry for `key`.
    ///
    /// `update` runs while the shard holding `key` is write-locked, so two
    /// concurrent upserts on the same key are serialised and neither
    /// contribution is lost.
    pub fn upsert_with<F>(&self, key: K, update: F)
    where
        V: Default,
        F: FnOnce(&mut V),
    {
        let mut entry = self.inner.entry(key).or_default();
        update(entry.value_mut());
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for entry in self.inner.iter() {
            let (k, v) = entry.pair();
            f(k, v);
        }
    }
}

pub struct ConcurrentSet<T> {
    inner: DashSet<T>,
}

impl<T> Default for ConcurrentSet<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ConcurrentSet<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            inner: DashSet::new(),
        }
    }

    /// Returns `true` if the value was not present before.
    pub fn insert(&self, value: T) -> bool {
        self.inner.insert(value)
    }

    pub fn extend<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.inner.insert(value);
        }
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains(value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn upsert_with_creates_default_then_updates() {
        let map: ConcurrentMap<String, BTreeSet<u8>> = ConcurrentMap::new();
        map.upsert_with("a".to_string(), |set| {
            set.insert(1);
        });
        map.upsert_with("a".to_string(), |set| {
            set.insert(2);
        });
        assert_eq!(
            map.get_cloned("a"),
            Some(BTreeSet::from([1, 2]))
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn concurrent_set_reports_first_insert_only() {
        let set = ConcurrentSet::new();
        assert!(set.insert("eval".to_string()));
        assert!(!set.insert("eval".to_string()));
        assert!(set.contains("eval"));
        assert!(!set.contains("binding"));
    }
}
