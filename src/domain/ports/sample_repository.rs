use crate::domain::entities::sample::Sample;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_store::Snapshot;
use crate::domain::values::category_kind::CategoryKind;
use crate::domain::values::lane::Lane;
use serde::Serialize;
use std::collections::BTreeMap;

/// The four lane lists of one category, each in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySamples {
    lanes: [Vec<Sample>; 4],
}

impl CategorySamples {
    pub fn lane(&self, lane: Lane) -> &[Sample] {
        &self.lanes[lane.index()]
    }

    pub fn lane_mut(&mut self, lane: Lane) -> &mut Vec<Sample> {
        &mut self.lanes[lane.index()]
    }

    pub fn total(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.lanes.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub kind: CategoryKind,
    pub category: String,
    pub lanes: BTreeMap<Lane, usize>,
    pub total_samples: usize,
    pub total_words: usize,
}

impl CategoryStats {
    pub fn empty(kind: CategoryKind, category: &str) -> Self {
        Self {
            kind,
            category: category.to_string(),
            lanes: Lane::ALL.into_iter().map(|l| (l, 0)).collect(),
            total_samples: 0,
            total_words: 0,
        }
    }

    pub fn from_samples(kind: CategoryKind, category: &str, samples: &CategorySamples) -> Self {
        Self {
            kind,
            category: category.to_string(),
            lanes: Lane::ALL
                .into_iter()
                .map(|l| (l, samples.lane(l).len()))
                .collect(),
            total_samples: samples.total(),
            total_words: samples.iter().map(|s| s.word_count).sum(),
        }
    }

    pub fn count(&self, lane: Lane) -> usize {
        self.lanes.get(&lane).copied().unwrap_or(0)
    }
}

/// Category -> lane -> samples, namespaced by `CategoryKind`.
///
/// Category names are passed already trimmed and non-empty; sample text is
/// already validated. Missing categories read as empty.
pub trait SampleRepository: Send + Sync {
    /// Returns false if the category already exists.
    fn create_category(&self, kind: CategoryKind, name: &str) -> Result<bool, DomainError>;
    /// Appends to the sample's (category, lane), creating the category if
    /// needed. Returns the stored sample with its `seq` assigned.
    fn add(&self, sample: Sample) -> Result<Sample, DomainError>;
    fn list(&self, kind: CategoryKind, category: &str, lane: Lane) -> Result<Vec<Sample>, DomainError>;
    /// Consistent copy of all four lanes, `None` if the category is unknown.
    fn category(&self, kind: CategoryKind, category: &str) -> Result<Option<CategorySamples>, DomainError>;
    fn categories(&self, kind: CategoryKind) -> Result<Vec<String>, DomainError>;
    fn delete_category(&self, kind: CategoryKind, category: &str) -> Result<bool, DomainError>;
    fn rename_category(&self, kind: CategoryKind, from: &str, to: &str) -> Result<(), DomainError>;
    /// Removes one sample counted from the end of the lane (0 = newest).
    fn delete_sample(
        &self,
        kind: CategoryKind,
        category: &str,
        lane: Lane,
        index_from_end: usize,
    ) -> Result<Option<Sample>, DomainError>;
    fn stats(&self, kind: CategoryKind, category: &str) -> Result<CategoryStats, DomainError>;
    fn export(&self) -> Result<Snapshot, DomainError>;
    /// Replaces all contents. Returns the number of samples restored.
    fn restore(&self, snapshot: Snapshot) -> Result<usize, DomainError>;
}
