use crate::domain::entities::sample::Sample;
use crate::domain::values::lane::Lane;
use serde::Serialize;

/// One entry of a retrieval result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedExemplar {
    pub id: String,
    pub text: String,
    pub lane: Lane,
    pub score: f32,
    pub seq: u64,
}

impl RetrievedExemplar {
    pub fn from_sample(sample: &Sample, score: f32) -> Self {
        Self {
            id: sample.id.clone(),
            text: sample.text.clone(),
            lane: sample.lane,
            score,
            seq: sample.seq,
        }
    }
}
