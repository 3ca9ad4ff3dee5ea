use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use taskboard_core::TaskboardResult;
use taskboard_domain::BoardSnapshot;
use uuid::Uuid;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// Metadata written alongside every saved board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Trait for abstract board storage
/// Implementations handle different backends (file, database, etc.)
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Save a board snapshot
    async fn save(&self, snapshot: &BoardSnapshot) -> TaskboardResult<PersistenceMetadata>;

    /// Load the stored board; a missing store loads as an empty board
    async fn load(&self) -> TaskboardResult<BoardSnapshot>;

    /// Check if the store exists
    async fn exists(&self) -> bool;

    /// Location of the store
    fn path(&self) -> &Path;
}
