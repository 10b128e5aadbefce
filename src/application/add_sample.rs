use crate::domain::entities::sample::Sample;
use crate::domain::error::{DomainError, ValidationError};
use crate::domain::ports::sample_repository::SampleRepository;
use crate::domain::values::category_kind::CategoryKind;
use crate::domain::values::lane::Lane;
use crate::infrastructure::encoding::cache::VectorCache;
use std::sync::Arc;
use tracing::info;

/// Trim a category name and reject blanks.
pub fn clean_category_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    Ok(name)
}

pub struct AddSampleUseCase {
    repo: Arc<dyn SampleRepository>,
    cache: Arc<VectorCache>,
    max_chars: usize,
}

impl AddSampleUseCase {
    pub fn new(repo: Arc<dyn SampleRepository>, cache: Arc<VectorCache>, max_chars: usize) -> Self {
        Self {
            repo,
            cache,
            max_chars,
        }
    }

    pub fn validate_text<'a>(&self, text: &'a str) -> Result<&'a str, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let length = text.chars().count();
        if length > self.max_chars {
            return Err(ValidationError::TooLong {
                length,
                max: self.max_chars,
            });
        }
        Ok(text)
    }

    pub fn execute(
        &self,
        kind: CategoryKind,
        category: &str,
        lane: Lane,
        text: &str,
    ) -> Result<Sample, DomainError> {
        let category = clean_category_name(category)?;
        let text = self.validate_text(text)?;

        let sample = self.repo.add(Sample::new(
            kind,
            category.to_string(),
            lane,
            text.to_string(),
        ))?;

        // Warm the cache; the text will be scored on the next retrieval.
        self.cache.get_or_compute(&sample.text);

        info!(
            kind = %kind,
            category = %sample.category,
            lane = %lane,
            words = sample.word_count,
            "sample added"
        );
        Ok(sample)
    }
}
