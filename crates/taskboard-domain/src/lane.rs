//! Status registry: the fixed, ordered set of lanes a board renders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use taskboard_core::{BoardConfig, TaskboardError, TaskboardResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Lane {
    Todo,
    InProgress,
    Review,
    Done,
}

impl Lane {
    /// Canonical lane order.
    pub const ALL: [Lane; 4] = [Lane::Todo, Lane::InProgress, Lane::Review, Lane::Done];

    pub fn id(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lane| lane.id() == id)
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Lane {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| TaskboardError::Validation(format!("Unknown lane: {}", s)))
    }
}

/// True when `id` names one of the canonical lanes.
pub fn is_valid_lane(id: &str) -> bool {
    Lane::from_id(id).is_some()
}

/// Lanes in display order.
///
/// Membership checks always use the canonical set; the display order only
/// drives pointer-band partitioning, so a board may render a subset of lanes
/// or reorder them without invalidating items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRegistry {
    display_order: Vec<Lane>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self {
            display_order: Lane::ALL.to_vec(),
        }
    }

    pub fn with_display_order(order: Vec<Lane>) -> TaskboardResult<Self> {
        if order.is_empty() {
            return Err(TaskboardError::Validation(
                "Lane display order must not be empty".to_string(),
            ));
        }
        for (i, lane) in order.iter().enumerate() {
            if order[..i].contains(lane) {
                return Err(TaskboardError::Validation(format!(
                    "Lane {} appears more than once in display order",
                    lane
                )));
            }
        }
        Ok(Self {
            display_order: order,
        })
    }

    /// Build from configuration, keeping the canonical order when the
    /// configured one is absent or invalid.
    pub fn from_config(config: &BoardConfig) -> Self {
        let Some(ids) = &config.lane_order else {
            return Self::new();
        };
        let parsed: TaskboardResult<Vec<Lane>> = ids.iter().map(|id| id.parse()).collect();
        match parsed.and_then(Self::with_display_order) {
            Ok(registry) => registry,
            Err(e) => {
                tracing::warn!("Ignoring configured lane order: {}", e);
                Self::new()
            }
        }
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.display_order
    }

    pub fn len(&self) -> usize {
        self.display_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display_order.is_empty()
    }

    pub fn lane_at(&self, index: usize) -> Option<Lane> {
        self.display_order.get(index).copied()
    }

    /// Any canonical lane resolves, whether or not it is in the display
    /// order.
    pub fn resolve(&self, id: &str) -> Option<Lane> {
        Lane::from_id(id)
    }
}

impl Default for StatusRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_ids_round_trip() {
        for lane in Lane::ALL {
            assert_eq!(Lane::from_id(lane.id()), Some(lane));
            assert_eq!(lane.to_string().parse::<Lane>().unwrap(), lane);
        }
    }

    #[test]
    fn test_is_valid_lane() {
        assert!(is_valid_lane("todo"));
        assert!(is_valid_lane("inProgress"));
        assert!(is_valid_lane("review"));
        assert!(is_valid_lane("done"));

        assert!(!is_valid_lane(""));
        assert!(!is_valid_lane("Todo"));
        assert!(!is_valid_lane("in_progress"));
        assert!(!is_valid_lane("archived"));
    }

    #[test]
    fn test_lane_serializes_as_id() {
        let json = serde_json::to_string(&Lane::InProgress).unwrap();
        assert_eq!(json, "\"inProgress\"");
        assert!(serde_json::from_str::<Lane>("\"blocked\"").is_err());
    }

    #[test]
    fn test_default_registry_is_canonical_order() {
        let registry = StatusRegistry::default();
        assert_eq!(registry.lanes(), &Lane::ALL);
        assert_eq!(registry.lane_at(0), Some(Lane::Todo));
        assert_eq!(registry.lane_at(3), Some(Lane::Done));
        assert_eq!(registry.lane_at(4), None);
    }

    #[test]
    fn test_display_order_rejects_empty_and_duplicates() {
        assert!(StatusRegistry::with_display_order(vec![]).is_err());
        assert!(StatusRegistry::with_display_order(vec![Lane::Todo, Lane::Todo]).is_err());
        assert!(StatusRegistry::with_display_order(vec![Lane::Done, Lane::Todo]).is_ok());
    }

    #[test]
    fn test_subset_registry_still_validates_all_lanes() {
        let registry = StatusRegistry::with_display_order(vec![Lane::Todo, Lane::Done]).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(!registry.lanes().contains(&Lane::Review));
        assert_eq!(registry.resolve("review"), Some(Lane::Review));
    }

    #[test]
    fn test_from_config() {
        let config = BoardConfig {
            lane_order: Some(vec!["done".to_string(), "review".to_string()]),
            default_viewport_width: None,
        };
        let registry = StatusRegistry::from_config(&config);
        assert_eq!(registry.lanes(), &[Lane::Done, Lane::Review]);

        let bad = BoardConfig {
            lane_order: Some(vec!["done".to_string(), "nope".to_string()]),
            default_viewport_width: None,
        };
        assert_eq!(StatusRegistry::from_config(&bad), StatusRegistry::new());
        assert_eq!(
            StatusRegistry::from_config(&BoardConfig::default()),
            StatusRegistry::new()
        );
    }
}
