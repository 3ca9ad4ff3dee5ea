//! Reordering rules.
//!
//! Pure functions deciding where a dropped item lands. Cross-lane drops
//! always append to the destination; the source lane is never compacted, so
//! untouched items keep their positions and concurrent movers never fight
//! over renumbered slots.

use crate::item::ItemId;
use crate::lane::Lane;
use crate::snapshot::BoardSnapshot;
use serde::{Deserialize, Serialize};

/// Where an item sits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub item_id: ItemId,
    pub lane: Lane,
    pub position: u32,
}

/// Result of applying a drop to a snapshot.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub from: Placement,
    pub to: Placement,
    /// Board after the move. Identical to the input for same-lane drops.
    pub snapshot: BoardSnapshot,
}

impl MoveOutcome {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Position the item would receive in `target`, or `None` if the item is
/// not on the board or `target` has no room after its last item.
///
/// - Same lane: the current position.
/// - Other lane: one past the highest position there (ignoring the item
///   itself), or 0 when that lane is empty.
pub fn compute_position(snapshot: &BoardSnapshot, item_id: ItemId, target: Lane) -> Option<u32> {
    let item = snapshot.find(item_id)?;
    if item.lane == target {
        return Some(item.position);
    }
    match snapshot.max_position(target, Some(item_id)) {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

/// Move `item_id` into `target`, returning the new board. The input snapshot
/// is not touched; `None` means the item could not be found or cannot be
/// appended to `target`.
pub fn apply_move(snapshot: &BoardSnapshot, item_id: ItemId, target: Lane) -> Option<MoveOutcome> {
    let from = snapshot.find(item_id)?.placement();
    let position = compute_position(snapshot, item_id, target)?;
    let to = Placement {
        item_id,
        lane: target,
        position,
    };

    if from.lane == target {
        return Some(MoveOutcome {
            from,
            to,
            snapshot: snapshot.clone(),
        });
    }

    let mut next = snapshot.clone();
    let mut item = next.remove(item_id)?;
    item.move_to_lane(target, position);
    next.lane_mut(target).push(item);

    Some(MoveOutcome {
        from,
        to,
        snapshot: next,
    })
}

/// Resequence positions in `lane` to 0, 1, 2, ... preserving order.
pub fn compact_lane_positions(snapshot: &BoardSnapshot, lane: Lane) -> BoardSnapshot {
    let mut next = snapshot.clone();
    for (new_pos, item) in next.lane_mut(lane).iter_mut().enumerate() {
        item.position = new_pos as u32;
    }
    next
}
