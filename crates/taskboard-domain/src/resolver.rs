//! Drop target resolution.
//!
//! Drop-target detection from the input layer is unreliable near empty lanes
//! and over other cards, so the raw target is resolved in tiers:
//!
//! 1. the raw target is a lane id
//! 2. the raw target is an item id; use that item's lane
//! 3. the pointer x coordinate falls into one of N equal viewport bands
//! 4. the active item's own lane (a no-op move)
//!
//! The [`TargetResolver`] trait is the seam for replacing this heuristic
//! with exact drop-zone detection.

use crate::item::ItemId;
use crate::lane::{Lane, StatusRegistry};
use crate::snapshot::BoardSnapshot;
use uuid::Uuid;

/// Pointer position reported by the UI during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub viewport_width: f64,
}

impl Pointer {
    pub fn new(x: f64, viewport_width: f64) -> Self {
        Self { x, viewport_width }
    }
}

/// Everything known about a drop at the moment it happens.
#[derive(Debug, Clone, Copy)]
pub struct DropQuery<'a> {
    pub active_id: ItemId,
    pub raw_target: Option<&'a str>,
    pub pointer: Option<Pointer>,
}

pub trait TargetResolver {
    /// Lane the active item should land in, or `None` when neither the
    /// target nor the active item can be found.
    fn resolve(&self, snapshot: &BoardSnapshot, query: &DropQuery<'_>) -> Option<Lane>;
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicResolver {
    registry: StatusRegistry,
}

impl HeuristicResolver {
    pub fn new(registry: StatusRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StatusRegistry {
        &self.registry
    }
}

impl TargetResolver for HeuristicResolver {
    fn resolve(&self, snapshot: &BoardSnapshot, query: &DropQuery<'_>) -> Option<Lane> {
        if let Some(raw) = query.raw_target {
            if let Some(lane) = self.registry.resolve(raw) {
                return Some(lane);
            }
            if let Some(item) = Uuid::parse_str(raw).ok().and_then(|id| snapshot.find(id)) {
                return Some(item.lane);
            }
        }

        if let Some(lane) = query
            .pointer
            .and_then(|pointer| lane_for_pointer(&self.registry, pointer))
        {
            tracing::debug!("Resolved drop target from pointer position: {}", lane);
            return Some(lane);
        }

        snapshot.find(query.active_id).map(|item| item.lane)
    }
}

/// Lane whose band contains `pointer.x` when the viewport is split into one
/// equal band per displayed lane. Out-of-range x clamps to the outer lanes.
pub fn lane_for_pointer(registry: &StatusRegistry, pointer: Pointer) -> Option<Lane> {
    let width = pointer.viewport_width;
    if !width.is_finite() || width <= 0.0 || !pointer.x.is_finite() || registry.is_empty() {
        return None;
    }
    let count = registry.len();
    let band = width / count as f64;
    let raw_index = (pointer.x / band).floor();
    let index = if raw_index < 0.0 {
        0
    } else {
        (raw_index as usize).min(count - 1)
    };
    registry.lane_at(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn board() -> (BoardSnapshot, Item, Item) {
        let project = Uuid::new_v4();
        let a = Item::new(project, "A".to_string(), Lane::Todo, 0);
        let b = Item::new(project, "B".to_string(), Lane::Review, 0);
        let snapshot = BoardSnapshot::from_items(vec![a.clone(), b.clone()]);
        (snapshot, a, b)
    }

    fn query(
        active_id: ItemId,
        raw_target: Option<&str>,
        pointer: Option<Pointer>,
    ) -> DropQuery<'_> {
        DropQuery {
            active_id,
            raw_target,
            pointer,
        }
    }

    #[test]
    fn lane_id_target_resolves_to_itself() {
        let (snapshot, a, _) = board();
        let resolver = HeuristicResolver::default();

        for lane in Lane::ALL {
            let resolved = resolver.resolve(&snapshot, &query(a.id, Some(lane.id()), None));
            assert_eq!(resolved, Some(lane));
        }
    }

    #[test]
    fn lane_id_wins_over_pointer() {
        let (snapshot, a, _) = board();
        let resolver = HeuristicResolver::default();
        let pointer = Some(Pointer::new(0.0, 400.0));

        let resolved = resolver.resolve(&snapshot, &query(a.id, Some("done"), pointer));
        assert_eq!(resolved, Some(Lane::Done));
    }

    #[test]
    fn item_target_resolves_to_its_lane() {
        let (snapshot, a, b) = board();
        let resolver = HeuristicResolver::default();
        let target = b.id.to_string();

        let resolved = resolver.resolve(&snapshot, &query(a.id, Some(target.as_str()), None));
        assert_eq!(resolved, Some(Lane::Review));
    }

    #[test]
    fn unknown_target_falls_back_to_pointer() {
        let (snapshot, a, _) = board();
        let resolver = HeuristicResolver::default();
        let pointer = Some(Pointer::new(350.0, 400.0));

        let resolved = resolver.resolve(&snapshot, &query(a.id, Some("card-shadow"), pointer));
        assert_eq!(resolved, Some(Lane::Done));

        let missing_item = Uuid::new_v4().to_string();
        let missing = query(a.id, Some(missing_item.as_str()), pointer);
        let resolved = resolver.resolve(&snapshot, &missing);
        assert_eq!(resolved, Some(Lane::Done));
    }

    #[test]
    fn no_target_no_pointer_is_noop() {
        let (snapshot, a, b) = board();
        let resolver = HeuristicResolver::default();

        assert_eq!(resolver.resolve(&snapshot, &query(a.id, None, None)), Some(Lane::Todo));
        assert_eq!(
            resolver.resolve(&snapshot, &query(b.id, Some("nowhere"), None)),
            Some(Lane::Review)
        );
    }

    #[test]
    fn unresolvable_everything_yields_none() {
        let (snapshot, _, _) = board();
        let resolver = HeuristicResolver::default();

        assert_eq!(resolver.resolve(&snapshot, &query(Uuid::new_v4(), None, None)), None);
    }

    #[test]
    fn pointer_bands_partition_viewport() {
        let registry = StatusRegistry::default();
        let width = 1000.0;
        let n = registry.len();
        let band = width / n as f64;

        for k in 0..n {
            let start = k as f64 * band;
            let inside = start + band / 2.0;
            let last = start + band - 0.001;
            for x in [start, inside, last] {
                assert_eq!(
                    lane_for_pointer(&registry, Pointer::new(x, width)),
                    registry.lane_at(k),
                    "x = {}",
                    x
                );
            }
        }
    }

    #[test]
    fn pointer_outside_viewport_clamps() {
        let registry = StatusRegistry::default();

        assert_eq!(lane_for_pointer(&registry, Pointer::new(-50.0, 800.0)), Some(Lane::Todo));
        assert_eq!(lane_for_pointer(&registry, Pointer::new(800.0, 800.0)), Some(Lane::Done));
        assert_eq!(lane_for_pointer(&registry, Pointer::new(5000.0, 800.0)), Some(Lane::Done));
    }

    #[test]
    fn pointer_with_unusable_width_is_ignored() {
        let registry = StatusRegistry::default();

        assert_eq!(lane_for_pointer(&registry, Pointer::new(10.0, 0.0)), None);
        assert_eq!(lane_for_pointer(&registry, Pointer::new(10.0, -1.0)), None);
        assert_eq!(lane_for_pointer(&registry, Pointer::new(10.0, f64::NAN)), None);
        assert_eq!(lane_for_pointer(&registry, Pointer::new(f64::NAN, 100.0)), None);
    }

    #[test]
    fn pointer_uses_display_order() {
        let registry = StatusRegistry::with_display_order(vec![Lane::Done, Lane::Todo]).unwrap();

        assert_eq!(lane_for_pointer(&registry, Pointer::new(10.0, 200.0)), Some(Lane::Done));
        assert_eq!(lane_for_pointer(&registry, Pointer::new(150.0, 200.0)), Some(Lane::Todo));
    }
}
