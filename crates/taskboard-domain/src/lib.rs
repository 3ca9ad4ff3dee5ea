pub mod board;
pub mod dispatcher;
pub mod item;
pub mod lane;
pub mod reorder;
pub mod resolver;
pub mod session;
pub mod snapshot;

pub use board::{Board, DropResult, Release};
pub use dispatcher::{
    PendingUpdate, PlacementApi, PlacementRequest, Reconciliation, UpdateDispatcher,
};
pub use item::{Item, ItemId, ProjectId, SprintId};
pub use lane::{is_valid_lane, Lane, StatusRegistry};
pub use reorder::{apply_move, compact_lane_positions, compute_position, MoveOutcome, Placement};
pub use resolver::{lane_for_pointer, DropQuery, HeuristicResolver, Pointer, TargetResolver};
pub use session::{DragSession, DragState};
pub use snapshot::BoardSnapshot;
