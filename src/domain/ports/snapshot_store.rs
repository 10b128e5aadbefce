use crate::domain::entities::sample::Sample;
use crate::domain::error::DomainError;
use crate::domain::values::category_kind::CategoryKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryKey {
    pub kind: CategoryKind,
    pub name: String,
}

/// Full image of the sample store. `categories` also lists empty ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub categories: Vec<CategoryKey>,
    pub samples: Vec<Sample>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.samples.is_empty()
    }
}

pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Snapshot, DomainError>;
    /// Replace whatever was stored with `snapshot`.
    fn save(&self, snapshot: &Snapshot) -> Result<(), DomainError>;
}
