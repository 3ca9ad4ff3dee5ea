use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskboard_core::{BoardConfig, TaskboardResult};
use taskboard_domain::{Board, HeuristicResolver, Pointer, ProjectId, StatusRegistry};
use taskboard_persistence::{JsonFileStore, SnapshotStore};

pub struct CliContext {
    pub store: Arc<JsonFileStore>,
    pub config: BoardConfig,
    pub registry: StatusRegistry,
}

impl CliContext {
    pub fn new(file_path: &Path, config_path: Option<&PathBuf>) -> Self {
        let config = match config_path {
            Some(path) => BoardConfig::load_from(path),
            None => BoardConfig::load(),
        };
        let registry = StatusRegistry::from_config(&config);
        Self {
            store: Arc::new(JsonFileStore::new(file_path)),
            config,
            registry,
        }
    }

    /// Load the board into a controller wired to the file store.
    pub async fn board(&self) -> TaskboardResult<Board<JsonFileStore>> {
        let snapshot = self.store.load().await?;
        Ok(Board::with_resolver(
            snapshot,
            HeuristicResolver::new(self.registry.clone()),
            Arc::clone(&self.store),
        ))
    }

    /// Pointer for the drop, when an x coordinate and a usable width are known.
    pub fn pointer(&self, x: Option<f64>, viewport_width: Option<f64>) -> Option<Pointer> {
        let x = x?;
        let width = self.config.effective_viewport_width(viewport_width)?;
        Some(Pointer::new(x, width))
    }

    /// Project new items join when none is given: the first existing item's.
    pub async fn default_project(&self) -> TaskboardResult<ProjectId> {
        let snapshot = self.store.load().await?;
        let project = snapshot
            .items()
            .next()
            .map(|item| item.project_id)
            .unwrap_or_else(uuid::Uuid::new_v4);
        Ok(project)
    }
}
