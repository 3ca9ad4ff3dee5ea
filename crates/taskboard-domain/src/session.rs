//! Drag gesture state machine.
//!
//! ```text
//! Idle --start--> Dragging --over--> HoveringLane --over--> HoveringLane
//!                     |                    |
//!                     +------end/cancel----+--> Idle
//! ```
//!
//! The hovered lane doubles as the UI highlight: at most one lane is
//! highlighted, and every transition back to `Idle` clears it.

use crate::item::ItemId;
use crate::lane::Lane;
use crate::reorder::{apply_move, MoveOutcome};
use crate::resolver::{DropQuery, Pointer, TargetResolver};
use crate::snapshot::BoardSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        active_id: ItemId,
        source_lane: Lane,
    },
    HoveringLane {
        active_id: ItemId,
        source_lane: Lane,
        hover_lane: Lane,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    pub fn active_id(&self) -> Option<ItemId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { active_id, .. } | DragState::HoveringLane { active_id, .. } => {
                Some(active_id)
            }
        }
    }

    pub fn source_lane(&self) -> Option<Lane> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { source_lane, .. }
            | DragState::HoveringLane { source_lane, .. } => Some(source_lane),
        }
    }

    /// Lane the UI should render with a drag-over highlight.
    pub fn highlighted_lane(&self) -> Option<Lane> {
        match self.state {
            DragState::HoveringLane { hover_lane, .. } => Some(hover_lane),
            _ => None,
        }
    }

    /// Begin dragging `id`. Any gesture already in progress is replaced.
    /// Returns false (and leaves the session idle) when the item is unknown.
    pub fn drag_start(&mut self, snapshot: &BoardSnapshot, id: ItemId) -> bool {
        if self.is_dragging() {
            tracing::debug!("Drag start while dragging; replacing previous gesture");
        }
        match snapshot.find(id) {
            Some(item) => {
                self.state = DragState::Dragging {
                    active_id: id,
                    source_lane: item.lane,
                };
                tracing::debug!("Drag started: {} from {}", id, item.lane);
                true
            }
            None => {
                tracing::debug!("Ignoring drag start for unknown item {}", id);
                self.state = DragState::Idle;
                false
            }
        }
    }

    /// Update the hovered lane. Returns the lane now highlighted.
    pub fn drag_over(
        &mut self,
        resolver: &dyn TargetResolver,
        snapshot: &BoardSnapshot,
        raw_target: Option<&str>,
        pointer: Option<Pointer>,
    ) -> Option<Lane> {
        let (active_id, source_lane) = self.active_id().zip(self.source_lane())?;
        let query = DropQuery {
            active_id,
            raw_target,
            pointer,
        };
        match resolver.resolve(snapshot, &query) {
            Some(hover_lane) => {
                self.state = DragState::HoveringLane {
                    active_id,
                    source_lane,
                    hover_lane,
                };
                Some(hover_lane)
            }
            None => {
                self.state = DragState::Dragging {
                    active_id,
                    source_lane,
                };
                None
            }
        }
    }

    /// Finish the gesture: resolve the final lane and compute the move.
    /// Always returns the session to `Idle`. `None` means there was nothing
    /// to move (no gesture, or the item vanished from the board).
    pub fn drag_end(
        &mut self,
        resolver: &dyn TargetResolver,
        snapshot: &BoardSnapshot,
        raw_target: Option<&str>,
        pointer: Option<Pointer>,
    ) -> Option<MoveOutcome> {
        let active_id = self.active_id()?;
        self.state = DragState::Idle;

        let query = DropQuery {
            active_id,
            raw_target,
            pointer,
        };
        let target = resolver.resolve(snapshot, &query)?;
        let outcome = apply_move(snapshot, active_id, target)?;
        tracing::debug!(
            "Drag ended: {} {} -> {} at {}",
            active_id,
            outcome.from.lane,
            outcome.to.lane,
            outcome.to.position
        );
        Some(outcome)
    }

    /// Abandon the gesture without moving anything.
    pub fn drag_cancel(&mut self) {
        if self.is_dragging() {
            tracing::debug!("Drag cancelled");
        }
        self.state = DragState::Idle;
    }
}
