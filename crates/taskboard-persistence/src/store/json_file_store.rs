use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{PersistenceMetadata, SnapshotStore, FORMAT_VERSION};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskboard_core::{Loggable, TaskboardError, TaskboardResult};
use taskboard_domain::{
    compact_lane_positions, BoardSnapshot, Item, Lane, PlacementApi, PlacementRequest, ProjectId,
    SprintId,
};
use tokio::sync::Mutex;
use uuid::Uuid;

/// JSON file-based board store.
///
/// Also serves as the placement endpoint for the command line: each
/// placement update is a locked load-modify-save cycle against the file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
    write_lock: Mutex<()>,
}

/// On-disk file format
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: BoardSnapshot,
}

impl JsonEnvelope {
    pub fn new(data: BoardSnapshot, metadata: PersistenceMetadata) -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata,
            data,
        }
    }

    pub fn empty() -> Self {
        Self::new(BoardSnapshot::new(), PersistenceMetadata::new(Uuid::new_v4()))
    }

    pub fn to_json_string(&self) -> TaskboardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TaskboardError::Serialization(e.to_string()))
    }
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_instance_id(path, Uuid::new_v4())
    }

    /// Create a store with a specific instance ID
    /// (useful for testing or coordinating across instances)
    pub fn with_instance_id(path: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
            write_lock: Mutex::new(()),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Append a new item to the end of `lane`.
    pub async fn add_item(
        &self,
        project_id: ProjectId,
        title: String,
        lane: Lane,
        sprint_id: Option<SprintId>,
    ) -> TaskboardResult<Item> {
        if title.trim().is_empty() {
            return Err(TaskboardError::Validation(
                "Item title must not be empty".to_string(),
            ));
        }
        self.modify(|snapshot| {
            let position = snapshot.next_position(lane).ok_or_else(|| {
                TaskboardError::Validation(format!("Lane {} has no free position", lane))
            })?;
            let mut item = Item::new(project_id, title, lane, position).with_sprint(sprint_id);
            item.add_log(format!("Created in {}", lane));
            snapshot.insert(item.clone());
            Ok(item)
        })
        .await
    }

    /// Resequence `lane` to contiguous positions.
    pub async fn compact_lane(&self, lane: Lane) -> TaskboardResult<BoardSnapshot> {
        self.modify(|snapshot| {
            *snapshot = compact_lane_positions(snapshot, lane);
            Ok(snapshot.clone())
        })
        .await
    }

    async fn modify<T>(
        &self,
        change: impl FnOnce(&mut BoardSnapshot) -> TaskboardResult<T>,
    ) -> TaskboardResult<T> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load().await?;
        let value = change(&mut snapshot)?;
        self.save(&snapshot).await?;
        Ok(value)
    }
}

fn apply_placement(
    snapshot: &mut BoardSnapshot,
    request: &PlacementRequest,
) -> TaskboardResult<Item> {
    let current = snapshot
        .find(request.item_id)
        .ok_or_else(|| TaskboardError::NotFound(format!("item {}", request.item_id)))?;
    if current.project_id != request.project_id {
        return Err(TaskboardError::Validation(format!(
            "Item {} does not belong to project {}",
            request.item_id, request.project_id
        )));
    }

    let mut item = snapshot
        .remove(request.item_id)
        .ok_or_else(|| TaskboardError::Internal("item vanished during update".to_string()))?;
    let from = item.lane;
    item.move_to_lane(request.lane, request.position);
    if request.sprint_id.is_some() {
        item.sprint_id = request.sprint_id;
    }
    if from == request.lane {
        item.add_log(format!("Repositioned in {}", from));
    } else {
        item.add_log(format!("Moved from {} to {}", from, request.lane));
    }
    snapshot.insert(item.clone());
    Ok(item)
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn save(&self, snapshot: &BoardSnapshot) -> TaskboardResult<PersistenceMetadata> {
        let metadata = PersistenceMetadata::new(self.instance_id);
        let envelope = JsonEnvelope::new(snapshot.clone(), metadata);
        let json_bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;

        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!("Saved {} bytes to {}", json_bytes.len(), self.path.display());
        Ok(envelope.metadata)
    }

    async fn load(&self) -> TaskboardResult<BoardSnapshot> {
        if !self.exists().await {
            return Ok(BoardSnapshot::new());
        }
        let file_bytes = AtomicWriter::read_all(&self.path).await?;

        let envelope: JsonEnvelope = serde_json::from_slice(&file_bytes)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        if envelope.version != FORMAT_VERSION {
            return Err(TaskboardError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }

        tracing::debug!("Loaded {} items from {}", envelope.data.len(), self.path.display());
        Ok(envelope.data)
    }

    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PlacementApi for JsonFileStore {
    async fn update_item_placement(&self, request: PlacementRequest) -> TaskboardResult<Item> {
        self.modify(|snapshot| apply_placement(snapshot, &request))
            .await
            .map_err(|e| match e {
                TaskboardError::Persistence(_) => e,
                other => TaskboardError::Persistence(other.to_string()),
            })
    }
}
