//! Board controller: one snapshot, one drag session, one dispatcher.

use crate::dispatcher::{PendingUpdate, PlacementApi, Reconciliation, UpdateDispatcher};
use crate::item::{Item, ItemId};
use crate::lane::Lane;
use crate::reorder::Placement;
use crate::resolver::{HeuristicResolver, Pointer, TargetResolver};
use crate::session::DragSession;
use crate::snapshot::BoardSnapshot;
use std::sync::Arc;
use taskboard_core::TaskboardResult;

/// What releasing a drag produced, before any network traffic.
#[derive(Debug)]
pub enum Release {
    /// No gesture was active, or the dragged item disappeared.
    Ignored,
    /// Dropped back into its own lane.
    Unchanged(Placement),
    /// Applied locally; awaiting [`Board::complete`].
    Pending(PendingUpdate),
}

#[derive(Debug)]
pub enum DropResult {
    Ignored,
    Unchanged(Placement),
    Dispatched(Reconciliation),
}

pub struct Board<A: ?Sized, R = HeuristicResolver> {
    snapshot: BoardSnapshot,
    session: DragSession,
    resolver: R,
    dispatcher: UpdateDispatcher<A>,
}

impl<A: PlacementApi + ?Sized> Board<A, HeuristicResolver> {
    pub fn new(snapshot: BoardSnapshot, api: Arc<A>) -> Self {
        Self::with_resolver(snapshot, HeuristicResolver::default(), api)
    }
}

impl<A: PlacementApi + ?Sized, R: TargetResolver> Board<A, R> {
    pub fn with_resolver(snapshot: BoardSnapshot, resolver: R, api: Arc<A>) -> Self {
        Self {
            snapshot,
            session: DragSession::new(),
            resolver,
            dispatcher: UpdateDispatcher::new(api),
        }
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Replace the board contents, e.g. after a refresh from the server.
    /// Any gesture in progress is abandoned.
    pub fn replace_snapshot(&mut self, snapshot: BoardSnapshot) {
        self.session.drag_cancel();
        self.snapshot = snapshot;
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn dispatcher(&self) -> &UpdateDispatcher<A> {
        &self.dispatcher
    }

    pub fn highlighted_lane(&self) -> Option<Lane> {
        self.session.highlighted_lane()
    }

    pub fn drag_start(&mut self, id: ItemId) -> bool {
        self.session.drag_start(&self.snapshot, id)
    }

    pub fn drag_over(
        &mut self,
        raw_target: Option<&str>,
        pointer: Option<Pointer>,
    ) -> Option<Lane> {
        self.session.drag_over(&self.resolver, &self.snapshot, raw_target, pointer)
    }

    pub fn drag_cancel(&mut self) {
        self.session.drag_cancel();
    }

    /// End the gesture and apply the move locally without waiting on the
    /// server. Persist the returned update with [`UpdateDispatcher::persist`]
    /// and fold the result back in with [`Board::complete`].
    pub fn release(&mut self, raw_target: Option<&str>, pointer: Option<Pointer>) -> Release {
        let Some(outcome) = self
            .session
            .drag_end(&self.resolver, &self.snapshot, raw_target, pointer)
        else {
            return Release::Ignored;
        };
        if outcome.is_noop() {
            return Release::Unchanged(outcome.to);
        }
        match self.dispatcher.begin(&mut self.snapshot, outcome) {
            Some(pending) => Release::Pending(pending),
            None => Release::Ignored,
        }
    }

    pub fn complete(
        &mut self,
        pending: PendingUpdate,
        result: TaskboardResult<Item>,
    ) -> Reconciliation {
        self.dispatcher.reconcile(&mut self.snapshot, pending, result)
    }

    /// End the gesture, persist the move and reconcile the response.
    pub async fn drag_end(
        &mut self,
        raw_target: Option<&str>,
        pointer: Option<Pointer>,
    ) -> DropResult {
        match self.release(raw_target, pointer) {
            Release::Ignored => DropResult::Ignored,
            Release::Unchanged(placement) => DropResult::Unchanged(placement),
            Release::Pending(pending) => {
                let result = self.dispatcher.persist(&pending).await;
                DropResult::Dispatched(self.complete(pending, result))
            }
        }
    }
}
