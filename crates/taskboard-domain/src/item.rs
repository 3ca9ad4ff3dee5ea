use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::{LogEntry, Loggable};
use uuid::Uuid;

use crate::lane::Lane;
use crate::reorder::Placement;

pub type ItemId = Uuid;
pub type ProjectId = Uuid;
pub type SprintId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub project_id: ProjectId,
    #[serde(default)]
    pub sprint_id: Option<SprintId>,
    pub title: String,
    pub lane: Lane,
    pub position: u32,
    #[serde(default)]
    pub activity: Vec<LogEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(project_id: ProjectId, title: String, lane: Lane, position: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            sprint_id: None,
            title,
            lane,
            position,
            activity: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_sprint(mut self, sprint_id: Option<SprintId>) -> Self {
        self.sprint_id = sprint_id;
        self
    }

    pub fn move_to_lane(&mut self, lane: Lane, position: u32) {
        self.lane = lane;
        self.position = position;
        self.updated_at = Utc::now();
    }

    pub fn placement(&self) -> Placement {
        Placement {
            item_id: self.id,
            lane: self.lane,
            position: self.position,
        }
    }
}

impl Loggable for Item {
    fn add_log(&mut self, message: String) {
        self.activity.push(LogEntry::new(message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_to_lane_updates_placement() {
        let mut item = Item::new(Uuid::new_v4(), "Write docs".to_string(), Lane::Todo, 3);
        let created = item.updated_at;

        item.move_to_lane(Lane::Review, 0);

        assert_eq!(item.lane, Lane::Review);
        assert_eq!(item.position, 0);
        assert!(item.updated_at >= created);
        assert_eq!(
            item.placement(),
            Placement {
                item_id: item.id,
                lane: Lane::Review,
                position: 0
            }
        );
    }

    #[test]
    fn test_unknown_lane_is_a_data_error() {
        let json = format!(
            r#"{{"id":"{}","project_id":"{}","title":"x","lane":"archived","position":0,
            "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        assert!(serde_json::from_str::<Item>(&json).is_err());
    }

    #[test]
    fn test_activity_defaults_empty() {
        let json = format!(
            r#"{{"id":"{}","project_id":"{}","title":"x","lane":"done","position":2,
            "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let item: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item.lane, Lane::Done);
        assert!(item.sprint_id.is_none());
        assert!(item.get_logs().is_empty());
    }
}
