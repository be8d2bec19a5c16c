#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Keyed enter/update/exit diffing.
//!
//! [`diff`] classifies the items of two ordered snapshots by a stable key.
//! [`Panel`] builds on it to track rendered elements across snapshots and
//! emit the transitions a presentation surface should animate, with all
//! presentation decisions delegated to a [`PanelAdapter`].
//!
//! Keys must be domain identifiers (a city id, a `(metric, slot)` pair),
//! never positions: a re-sorted ranking would otherwise rebind every
//! element to a different city.

pub mod panel;

use std::collections::BTreeMap;
use std::fmt::Debug;

pub use panel::{ElementId, Frame, Panel, PanelAdapter, Phase, Timing, Transition};

/// An item present in both snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Persisting<'a, T> {
    /// The item as it was.
    pub previous: &'a T,
    /// Position of `previous` in the previous snapshot.
    pub previous_index: usize,
    /// The item as it is now.
    pub next: &'a T,
    /// Position of `next` in the next snapshot.
    pub next_index: usize,
}

/// Result of [`diff`]. The three classes are disjoint by key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedDiff<'a, T> {
    /// Items only in the next snapshot, with their index there, in next
    /// order.
    pub entering: Vec<(usize, &'a T)>,
    /// Items in both snapshots, in next order.
    pub persisting: Vec<Persisting<'a, T>>,
    /// Items only in the previous snapshot, with their index there, in
    /// previous order.
    pub exiting: Vec<(usize, &'a T)>,
}

impl<T> KeyedDiff<'_, T> {
    /// Whether both snapshots have the same key set.
    #[must_use]
    pub fn is_same_key_set(&self) -> bool {
        self.entering.is_empty() && self.exiting.is_empty()
    }
}

/// Indexes a snapshot by key. Later duplicates are dropped (and logged) so
/// every key maps to exactly one item.
fn index_by_key<T, K: Ord + Debug>(
    items: &[T],
    key_of: &impl Fn(&T) -> K,
    snapshot: &str,
) -> (Vec<Option<K>>, BTreeMap<K, usize>) {
    let mut keys = Vec::with_capacity(items.len());
    let mut positions = BTreeMap::new();

    for (i, item) in items.iter().enumerate() {
        let key = key_of(item);
        if positions.contains_key(&key) {
            log::warn!("Duplicate key {key:?} in {snapshot} snapshot at index {i}; ignoring");
            keys.push(None);
        } else {
            positions.insert(key, i);
            keys.push(Some(key_of(item)));
        }
    }

    (keys, positions)
}

/// Classifies `previous` and `next` into entering, persisting, and exiting
/// items by `key_of`.
///
/// If a snapshot repeats a key, the first occurrence wins and the rest are
/// ignored.
pub fn diff<'a, T, K: Ord + Debug>(
    previous: &'a [T],
    next: &'a [T],
    key_of: impl Fn(&T) -> K,
) -> KeyedDiff<'a, T> {
    let (previous_keys, previous_positions) = index_by_key(previous, &key_of, "previous");
    let (next_keys, next_positions) = index_by_key(next, &key_of, "next");

    let mut entering = Vec::new();
    let mut persisting = Vec::new();

    for (next_index, key) in next_keys.iter().enumerate() {
        let Some(key) = key else { continue };
        match previous_positions.get(key) {
            Some(&previous_index) => persisting.push(Persisting {
                previous: &previous[previous_index],
                previous_index,
                next: &next[next_index],
                next_index,
            }),
            None => entering.push((next_index, &next[next_index])),
        }
    }

    let exiting = previous_keys
        .iter()
        .enumerate()
        .filter_map(|(i, key)| {
            let key = key.as_ref()?;
            (!next_positions.contains_key(key)).then_some((i, &previous[i]))
        })
        .collect();

    KeyedDiff {
        entering,
        persisting,
        exiting,
    }
}
