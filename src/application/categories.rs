use crate::application::add_sample::clean_category_name;
use crate::domain::entities::sample::Sample;
use crate::domain::error::DomainError;
use crate::domain::ports::sample_repository::{CategoryStats, SampleRepository};
use crate::domain::values::category_kind::CategoryKind;
use crate::domain::values::lane::Lane;
use std::sync::Arc;
use tracing::info;

/// Category management: create, list, rename, delete, stats.
pub struct CategoryUseCase {
    repo: Arc<dyn SampleRepository>,
}

impl CategoryUseCase {
    pub fn new(repo: Arc<dyn SampleRepository>) -> Self {
        Self { repo }
    }

    pub fn create(&self, kind: CategoryKind, name: &str) -> Result<bool, DomainError> {
        let name = clean_category_name(name)?;
        let created = self.repo.create_category(kind, name)?;
        if created {
            info!(kind = %kind, category = name, "category created");
        }
        Ok(created)
    }

    pub fn list(&self, kind: CategoryKind) -> Result<Vec<String>, DomainError> {
        self.repo.categories(kind)
    }

    pub fn samples(&self, kind: CategoryKind, category: &str, lane: Lane) -> Result<Vec<Sample>, DomainError> {
        self.repo.list(kind, category.trim(), lane)
    }

    pub fn stats(&self, kind: CategoryKind, category: &str) -> Result<CategoryStats, DomainError> {
        self.repo.stats(kind, category.trim())
    }

    pub fn delete(&self, kind: CategoryKind, category: &str) -> Result<bool, DomainError> {
        let category = category.trim();
        let deleted = self.repo.delete_category(kind, category)?;
        if deleted {
            info!(kind = %kind, category, "category deleted");
        }
        Ok(deleted)
    }

    pub fn rename(&self, kind: CategoryKind, from: &str, to: &str) -> Result<(), DomainError> {
        let from = clean_category_name(from)?;
        let to = clean_category_name(to)?;
        self.repo.rename_category(kind, from, to)?;
        info!(kind = %kind, from, to, "category renamed");
        Ok(())
    }

    pub fn delete_sample(
        &self,
        kind: CategoryKind,
        category: &str,
        lane: Lane,
        index_from_end: usize,
    ) -> Result<Option<Sample>, DomainError> {
        let removed = self
            .repo
            .delete_sample(kind, category.trim(), lane, index_from_end)?;
        if let Some(sample) = &removed {
            info!(kind = %kind, category = %sample.category, lane = %lane, "sample deleted");
        }
        Ok(removed)
    }
}
