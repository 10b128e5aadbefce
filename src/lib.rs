pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::add_sample::AddSampleUseCase;
use crate::application::categories::CategoryUseCase;
use crate::application::retrieve::RetrieveUseCase;
use crate::application::snapshot::SnapshotUseCase;
use crate::config::{EncoderKind, VaultConfig};
use crate::domain::entities::exemplar::RetrievedExemplar;
use crate::domain::entities::sample::Sample;
use crate::domain::error::DomainError;
use crate::domain::ports::sample_repository::{CategoryStats, SampleRepository};
use crate::domain::ports::snapshot_store::SnapshotStore;
use crate::domain::ports::text_encoder::TextEncoder;
use crate::domain::values::category_kind::CategoryKind;
use crate::domain::values::lane::Lane;
use crate::infrastructure::encoding::cache::{CacheStats, VectorCache};
use crate::infrastructure::encoding::noop::NoopEncoder;
use crate::infrastructure::encoding::trigram::TrigramEncoder;
use crate::infrastructure::memory::sample_repo::InMemorySampleRepo;
use crate::infrastructure::sqlite::snapshot_store::SqliteSnapshotStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Exemplar store and retriever. Samples live in memory and are written to
/// the SQLite snapshot at `db_path` on `save()`.
pub struct VoiceVault {
    cache: Arc<VectorCache>,
    add_sample_uc: AddSampleUseCase,
    categories_uc: CategoryUseCase,
    retrieve_uc: RetrieveUseCase,
    snapshot_uc: SnapshotUseCase,
}

impl VoiceVault {
    pub fn new(db_path: &str, config: VaultConfig) -> Result<Self, DomainError> {
        let encoder: Arc<dyn TextEncoder> = match config.encoder {
            EncoderKind::Trigram => Arc::new(TrigramEncoder::new(config.ngram_width, config.dimensions)),
            EncoderKind::Noop => Arc::new(NoopEncoder),
        };
        Self::with_providers(db_path, config, encoder)
    }

    pub fn with_providers(
        db_path: &str,
        config: VaultConfig,
        encoder: Arc<dyn TextEncoder>,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let repo: Arc<dyn SampleRepository> = Arc::new(InMemorySampleRepo::new());
        let store: Arc<dyn SnapshotStore> = Arc::new(SqliteSnapshotStore::open(db_path)?);
        debug!(encoder = encoder.name(), dimension = encoder.dimension(), "encoder selected");
        let cache = Arc::new(VectorCache::new(encoder, config.cache_capacity));

        let snapshot_uc = SnapshotUseCase::new(repo.clone(), store);
        snapshot_uc.load()?;

        Ok(Self {
            add_sample_uc: AddSampleUseCase::new(repo.clone(), cache.clone(), config.max_sample_chars),
            categories_uc: CategoryUseCase::new(repo.clone()),
            retrieve_uc: RetrieveUseCase::new(
                repo,
                cache.clone(),
                config.lane_weights,
                Duration::from_millis(config.slow_retrieval_ms),
            ),
            snapshot_uc,
            cache,
        })
    }

    // Delegating methods
    pub fn add_sample(&self, kind: CategoryKind, category: &str, lane: Lane, text: &str) -> Result<Sample, DomainError> {
        self.add_sample_uc.execute(kind, category, lane, text)
    }

    pub fn create_category(&self, kind: CategoryKind, name: &str) -> Result<bool, DomainError> {
        self.categories_uc.create(kind, name)
    }

    pub fn list_categories(&self, kind: CategoryKind) -> Result<Vec<String>, DomainError> {
        self.categories_uc.list(kind)
    }

    pub fn list_samples(&self, kind: CategoryKind, category: &str, lane: Lane) -> Result<Vec<Sample>, DomainError> {
        self.categories_uc.samples(kind, category, lane)
    }

    pub fn retrieve(
        &self,
        kind: CategoryKind,
        category: &str,
        target: Lane,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedExemplar>, DomainError> {
        self.retrieve_uc.execute(kind, category, target, query, k)
    }

    pub fn retrieve_in_lane(
        &self,
        kind: CategoryKind,
        category: &str,
        lane: Lane,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedExemplar>, DomainError> {
        self.retrieve_uc.execute_in_lane(kind, category, lane, query, k)
    }

    pub fn stats(&self, kind: CategoryKind, category: &str) -> Result<CategoryStats, DomainError> {
        self.categories_uc.stats(kind, category)
    }

    pub fn delete_category(&self, kind: CategoryKind, category: &str) -> Result<bool, DomainError> {
        self.categories_uc.delete(kind, category)
    }

    pub fn rename_category(&self, kind: CategoryKind, from: &str, to: &str) -> Result<(), DomainError> {
        self.categories_uc.rename(kind, from, to)
    }

    pub fn delete_sample(
        &self,
        kind: CategoryKind,
        category: &str,
        lane: Lane,
        index_from_end: usize,
    ) -> Result<Option<Sample>, DomainError> {
        self.categories_uc.delete_sample(kind, category, lane, index_from_end)
    }

    /// Write the whole store to the snapshot database. Returns the sample count.
    pub fn save(&self) -> Result<usize, DomainError> {
        self.snapshot_uc.save()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
