use crate::domain::error::DomainError;
use crate::domain::ports::sample_repository::SampleRepository;
use crate::domain::ports::snapshot_store::SnapshotStore;
use std::sync::Arc;
use tracing::info;

/// Moves the whole sample store in and out of persistent storage.
pub struct SnapshotUseCase {
    repo: Arc<dyn SampleRepository>,
    store: Arc<dyn SnapshotStore>,
}

impl SnapshotUseCase {
    pub fn new(repo: Arc<dyn SampleRepository>, store: Arc<dyn SnapshotStore>) -> Self {
        Self { repo, store }
    }

    /// Replace in-memory contents with the stored snapshot.
    pub fn load(&self) -> Result<usize, DomainError> {
        let snapshot = self.store.load()?;
        let categories = snapshot.categories.len();
        let samples = self.repo.restore(snapshot)?;
        info!(categories, samples, "snapshot loaded");
        Ok(samples)
    }

    pub fn save(&self) -> Result<usize, DomainError> {
        let snapshot = self.repo.export()?;
        let samples = snapshot.samples.len();
        self.store.save(&snapshot)?;
        info!(categories = snapshot.categories.len(), samples, "snapshot saved");
        Ok(samples)
    }
}
