use crate::domain::values::category_kind::CategoryKind;
use crate::domain::values::lane::Lane;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored writing sample. Immutable once added; `seq` is assigned by the
/// store and orders samples by creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: String,
    pub kind: CategoryKind,
    pub category: String,
    pub lane: Lane,
    pub text: String,
    pub word_count: usize,
    pub seq: u64,
    pub created_at: DateTime<Utc>,
}

impl Sample {
    /// `text` is expected to be already trimmed and validated.
    pub fn new(kind: CategoryKind, category: String, lane: Lane, text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            category,
            lane,
            word_count: text.split_whitespace().count(),
            text,
            seq: 0,
            created_at: Utc::now(),
        }
    }
}
