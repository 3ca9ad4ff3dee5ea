//! In-memory board state.
//!
//! A `BoardSnapshot` maps every lane to its items in ascending position
//! order. It is the single source of truth the UI renders from, and the
//! value the dispatcher swaps in and out during optimistic updates.
//!
//! On the wire a snapshot is a flat item list; lanes are rebuilt (and
//! re-sorted) on load so persisted files cannot smuggle in a mis-ordered
//! lane.

use crate::item::{Item, ItemId};
use crate::lane::Lane;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SnapshotData", into = "SnapshotData")]
pub struct BoardSnapshot {
    lanes: BTreeMap<Lane, Vec<Item>>,
}

#[derive(Serialize, Deserialize)]
struct SnapshotData {
    #[serde(default)]
    items: Vec<Item>,
}

impl From<SnapshotData> for BoardSnapshot {
    fn from(data: SnapshotData) -> Self {
        Self::from_items(data.items)
    }
}

impl From<BoardSnapshot> for SnapshotData {
    fn from(snapshot: BoardSnapshot) -> Self {
        Self {
            items: snapshot.into_items(),
        }
    }
}

impl BoardSnapshot {
    /// Empty board with every lane present.
    pub fn new() -> Self {
        Self {
            lanes: Lane::ALL.into_iter().map(|lane| (lane, Vec::new())).collect(),
        }
    }

    /// Group items by lane, ordering each lane by position. Items sharing a
    /// position keep their relative input order.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut snapshot = Self::new();
        for item in items {
            snapshot.lanes.entry(item.lane).or_default().push(item);
        }
        for items in snapshot.lanes.values_mut() {
            items.sort_by_key(|item| item.position);
        }
        snapshot
    }

    pub fn lane(&self, lane: Lane) -> &[Item] {
        self.lanes.get(&lane).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.lanes.values().flatten()
    }

    pub fn into_items(self) -> Vec<Item> {
        self.lanes.into_values().flatten().collect()
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lanes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.values().all(Vec::is_empty)
    }

    /// Highest position in `lane`, ignoring `excluding`.
    pub fn max_position(&self, lane: Lane, excluding: Option<ItemId>) -> Option<u32> {
        self.lane(lane)
            .iter()
            .filter(|item| Some(item.id) != excluding)
            .map(|item| item.position)
            .max()
    }

    /// Position an item appended to `lane` would receive, or `None` when the
    /// lane already holds the largest position.
    pub fn next_position(&self, lane: Lane) -> Option<u32> {
        self.max_position(lane, None).map_or(Some(0), |max| max.checked_add(1))
    }

    /// Insert after every item whose position is not greater than the new
    /// item's, keeping the lane sorted.
    pub fn insert(&mut self, item: Item) {
        let items = self.lanes.entry(item.lane).or_default();
        let index = items.partition_point(|existing| existing.position <= item.position);
        items.insert(index, item);
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        for items in self.lanes.values_mut() {
            if let Some(index) = items.iter().position(|item| item.id == id) {
                return Some(items.remove(index));
            }
        }
        None
    }

    pub(crate) fn lane_mut(&mut self, lane: Lane) -> &mut Vec<Item> {
        self.lanes.entry(lane).or_default()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
