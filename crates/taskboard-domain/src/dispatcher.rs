//! Optimistic placement updates.
//!
//! A move is applied to the local snapshot before the persistence call is
//! made, so the board reflects the drop immediately. The work is split in
//! three phases so callers can keep handling input while the request is in
//! flight:
//!
//! - [`UpdateDispatcher::begin`] swaps in the moved snapshot and returns a
//!   [`PendingUpdate`] tagged with the placement it intends to persist and a
//!   sequence number
//! - [`UpdateDispatcher::persist`] performs the call
//! - [`UpdateDispatcher::reconcile`] folds the response back in, rolling the
//!   move back on failure and ignoring responses that a newer move of the
//!   same item has superseded

use crate::item::{Item, ItemId, ProjectId, SprintId};
use crate::lane::Lane;
use crate::reorder::{MoveOutcome, Placement};
use crate::snapshot::BoardSnapshot;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use taskboard_core::{TaskboardError, TaskboardResult};

/// Body of a placement update: move `item_id` to `lane` at `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub item_id: ItemId,
    pub lane: Lane,
    pub position: u32,
    pub project_id: ProjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<SprintId>,
}

impl PlacementRequest {
    pub fn placement(&self) -> Placement {
        Placement {
            item_id: self.item_id,
            lane: self.lane,
            position: self.position,
        }
    }
}

/// Remote endpoint that persists item placements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacementApi: Send + Sync {
    async fn update_item_placement(&self, request: PlacementRequest) -> TaskboardResult<Item>;
}

/// A move that has been applied locally but not yet confirmed.
#[derive(Debug, Clone)]
pub struct PendingUpdate {
    sequence: u64,
    request: PlacementRequest,
    previous: Placement,
    before: BoardSnapshot,
    after: BoardSnapshot,
}

impl PendingUpdate {
    /// Order in which the move was begun; later moves get larger numbers.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn request(&self) -> &PlacementRequest {
        &self.request
    }

    pub fn previous(&self) -> Placement {
        self.previous
    }

    pub fn intended(&self) -> Placement {
        self.request.placement()
    }
}

#[derive(Debug)]
pub enum Reconciliation {
    /// The server accepted the move; the local snapshot was already correct.
    Confirmed(Item),
    /// The server rejected the move and the local snapshot was reverted.
    RolledBack(TaskboardError),
    /// A newer move of the same item happened first; the response was dropped.
    Stale,
}

pub struct UpdateDispatcher<A: ?Sized> {
    next_sequence: u64,
    /// Sequence of the most recent move begun for each item.
    latest: HashMap<ItemId, u64>,
    api: Arc<A>,
}

impl<A: PlacementApi + ?Sized> UpdateDispatcher<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            next_sequence: 0,
            latest: HashMap::new(),
            api,
        }
    }

    pub fn api(&self) -> Arc<A> {
        Arc::clone(&self.api)
    }

    /// Apply the move to `snapshot`. Same-lane drops change nothing and need
    /// no request, so they return `None`.
    pub fn begin(
        &mut self,
        snapshot: &mut BoardSnapshot,
        outcome: MoveOutcome,
    ) -> Option<PendingUpdate> {
        if outcome.is_noop() {
            return None;
        }
        let item = outcome.snapshot.find(outcome.to.item_id)?;
        let request = PlacementRequest {
            item_id: item.id,
            lane: outcome.to.lane,
            position: outcome.to.position,
            project_id: item.project_id,
            sprint_id: item.sprint_id,
        };
        self.next_sequence += 1;
        let sequence = self.next_sequence;
        self.latest.insert(item.id, sequence);
        let before = std::mem::replace(snapshot, outcome.snapshot);
        Some(PendingUpdate {
            sequence,
            request,
            previous: outcome.from,
            before,
            after: snapshot.clone(),
        })
    }

    pub async fn persist(&self, pending: &PendingUpdate) -> TaskboardResult<Item> {
        self.api.update_item_placement(pending.request.clone()).await
    }

    /// Fold a persistence result into `snapshot`. Only the response to the
    /// item's most recent move is applied, and only while the item still
    /// sits where that move put it.
    pub fn reconcile(
        &mut self,
        snapshot: &mut BoardSnapshot,
        pending: PendingUpdate,
        result: TaskboardResult<Item>,
    ) -> Reconciliation {
        let item_id = pending.request.item_id;
        if self.latest.get(&item_id) != Some(&pending.sequence) {
            tracing::debug!(
                "Discarding superseded placement response #{} for {}",
                pending.sequence,
                item_id
            );
            return Reconciliation::Stale;
        }
        let reconciliation = reconcile(snapshot, pending, result);
        if !matches!(reconciliation, Reconciliation::Stale) {
            self.latest.remove(&item_id);
        }
        reconciliation
    }

    /// Apply, persist and reconcile in one go.
    pub async fn dispatch(
        &mut self,
        snapshot: &mut BoardSnapshot,
        outcome: MoveOutcome,
    ) -> Option<Reconciliation> {
        let pending = self.begin(snapshot, outcome)?;
        let result = self.persist(&pending).await;
        Some(self.reconcile(snapshot, pending, result))
    }
}

fn reconcile(
    snapshot: &mut BoardSnapshot,
    pending: PendingUpdate,
    result: TaskboardResult<Item>,
) -> Reconciliation {
    let intended = pending.intended();
    let current = snapshot.find(intended.item_id).map(Item::placement);
    if current != Some(intended) {
        tracing::debug!(
            "Discarding stale placement response for {} ({} at {})",
            intended.item_id,
            intended.lane,
            intended.position
        );
        return Reconciliation::Stale;
    }

    match result {
        Ok(item) => {
            tracing::info!(
                "Moved {} from {} to {} at {}",
                intended.item_id,
                pending.previous.lane,
                intended.lane,
                intended.position
            );
            Reconciliation::Confirmed(item)
        }
        Err(e) => {
            tracing::warn!("Rolling back move of {}: {}", intended.item_id, e);
            rollback(snapshot, &pending);
            Reconciliation::RolledBack(e)
        }
    }
}

/// Undo a failed move. When nothing else changed since the move was applied
/// the whole pre-move snapshot is restored; otherwise only the moved item is
/// put back so unrelated newer moves survive.
fn rollback(snapshot: &mut BoardSnapshot, pending: &PendingUpdate) {
    if *snapshot == pending.after {
        *snapshot = pending.before.clone();
        return;
    }
    let Some(original) = pending.before.find(pending.previous.item_id).cloned() else {
        return;
    };
    snapshot.remove(original.id);
    snapshot.insert(original);
}
