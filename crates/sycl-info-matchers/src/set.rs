//! Ordered sets of records identified by `(name, vendor)`.
//!
//! Each record carries a payload (drivers, nested devices) that is not part
//! of its identity. The key lives outside the payload's reach: callers get
//! `&mut T` only through [`KeyedSet::get_or_insert_with`], and `T` exposes no
//! way to change its key, so payload edits never disturb the ordering.

use std::cmp::Ordering;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::iter::Peekable;

/// Identity of a platform or device. Ordered by name, then vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub name: String,
    pub vendor: String,
}

impl RecordKey {
    pub fn new(name: impl Into<String>, vendor: impl Into<String>) -> Self {
        RecordKey {
            name: name.into(),
            vendor: vendor.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.vendor)
    }
}

/// A record with an immutable [`RecordKey`].
pub trait Keyed {
    fn key(&self) -> &RecordKey;
}

/// A set of keyed records in key order. Inserting a record whose key is
/// already present replaces the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedSet<T> {
    entries: BTreeMap<RecordKey, T>,
}

impl<T> Default for KeyedSet<T> {
    fn default() -> Self {
        KeyedSet {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Keyed> KeyedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in key order.
    pub fn iter(&self) -> btree_map::Values<'_, RecordKey, T> {
        self.entries.values()
    }

    pub fn get(&self, key: &RecordKey) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &RecordKey) -> bool {
        self.entries.contains_key(key)
    }

    /// The record at 0-based position `index` in key order.
    pub fn nth(&self, index: usize) -> Option<&T> {
        self.entries.values().nth(index)
    }

    /// Insert `record`, returning the record it replaced.
    pub fn insert(&mut self, record: T) -> Option<T> {
        self.entries.insert(record.key().clone(), record)
    }

    /// The record for `key`, created with `make` if absent.
    ///
    /// `make` must return a record whose key is the one it was given.
    pub fn get_or_insert_with(
        &mut self,
        key: RecordKey,
        make: impl FnOnce(RecordKey) -> T,
    ) -> &mut T {
        match self.entries.entry(key) {
            btree_map::Entry::Occupied(entry) => entry.into_mut(),
            btree_map::Entry::Vacant(entry) => {
                let record = make(entry.key().clone());
                debug_assert_eq!(record.key(), entry.key(), "record stored under another key");
                entry.insert(record)
            }
        }
    }

    /// Pairs of records present in both sets, in key order.
    ///
    /// Walks both sets once in lockstep: `O(self.len() + other.len())`.
    pub fn intersection<'a, U: Keyed>(&'a self, other: &'a KeyedSet<U>) -> Intersection<'a, T, U> {
        Intersection {
            left: self.entries.iter().peekable(),
            right: other.entries.iter().peekable(),
        }
    }
}

impl<T: Keyed> FromIterator<T> for KeyedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = KeyedSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl<'a, T: Keyed> IntoIterator for &'a KeyedSet<T> {
    type Item = &'a T;
    type IntoIter = btree_map::Values<'a, RecordKey, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`KeyedSet::intersection`].
pub struct Intersection<'a, T, U> {
    left: Peekable<btree_map::Iter<'a, RecordKey, T>>,
    right: Peekable<btree_map::Iter<'a, RecordKey, U>>,
}

impl<'a, T, U> Iterator for Intersection<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ordering = match (self.left.peek(), self.right.peek()) {
                (Some((l, _)), Some((r, _))) => l.cmp(r),
                _ => return None,
            };
            match ordering {
                Ordering::Less => {
                    self.left.next();
                }
                Ordering::Greater => {
                    self.right.next();
                }
                Ordering::Equal => {
                    let (_, l) = self.left.next()?;
                    let (_, r) = self.right.next()?;
                    return Some((l, r));
                }
            }
        }
    }
}
