use crate::domain::entities::exemplar::RetrievedExemplar;
use crate::domain::entities::sample::Sample;
use crate::domain::error::DomainError;
use crate::domain::ports::sample_repository::SampleRepository;
use crate::domain::values::category_kind::CategoryKind;
use crate::domain::values::lane::Lane;
use crate::domain::values::lane_mix::LaneWeights;
use crate::domain::values::vector::{similarity, Vector};
use crate::infrastructure::encoding::cache::VectorCache;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub struct RetrieveUseCase {
    repo: Arc<dyn SampleRepository>,
    cache: Arc<VectorCache>,
    weights: LaneWeights,
    slow_threshold: Duration,
}

impl RetrieveUseCase {
    pub fn new(
        repo: Arc<dyn SampleRepository>,
        cache: Arc<VectorCache>,
        weights: LaneWeights,
        slow_threshold: Duration,
    ) -> Self {
        Self {
            repo,
            cache,
            weights,
            slow_threshold,
        }
    }

    /// Lane-mixed top-k. Result is grouped target lane first, then Narration,
    /// then the remaining lanes; each group by score descending with earlier
    /// samples winning ties. Unknown or empty categories give an empty result.
    pub fn execute(
        &self,
        kind: CategoryKind,
        category: &str,
        target: Lane,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedExemplar>, DomainError> {
        if k == 0 {
            return Ok(vec![]);
        }
        let started = Instant::now();

        let Some(samples) = self.repo.category(kind, category.trim())? else {
            debug!(kind = %kind, category, "retrieve on unknown category");
            return Ok(vec![]);
        };
        if samples.total() == 0 {
            return Ok(vec![]);
        }

        let query_vec = self.cache.get_or_compute(query);
        let plan = self.weights.plan(target, k);

        let ranked: Vec<Vec<RetrievedExemplar>> = plan
            .slots()
            .iter()
            .map(|slot| self.rank(&query_vec, samples.lane(slot.lane)))
            .collect();
        let available: Vec<usize> = ranked.iter().map(Vec::len).collect();
        let granted = plan.grant(&available);

        let results: Vec<RetrievedExemplar> = ranked
            .into_iter()
            .zip(granted.iter())
            .flat_map(|(lane, &n)| lane.into_iter().take(n))
            .collect();

        self.record_timing(started, kind, category, results.len(), &granted);
        Ok(results)
    }

    /// Top-k from a single lane, same ordering rules.
    pub fn execute_in_lane(
        &self,
        kind: CategoryKind,
        category: &str,
        lane: Lane,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedExemplar>, DomainError> {
        if k == 0 {
            return Ok(vec![]);
        }
        let candidates = self.repo.list(kind, category.trim(), lane)?;
        if candidates.is_empty() {
            return Ok(vec![]);
        }

        let query_vec = self.cache.get_or_compute(query);
        let mut ranked = self.rank(&query_vec, &candidates);
        ranked.truncate(k);
        Ok(ranked)
    }

    fn rank(&self, query: &Vector, samples: &[Sample]) -> Vec<RetrievedExemplar> {
        let mut scored: Vec<RetrievedExemplar> = samples
            .iter()
            .map(|sample| {
                let vector = self.cache.get_or_compute(&sample.text);
                RetrievedExemplar::from_sample(sample, similarity(query, &vector))
            })
            .collect();
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.seq.cmp(&b.seq))
        });
        scored
    }

    fn record_timing(
        &self,
        started: Instant,
        kind: CategoryKind,
        category: &str,
        returned: usize,
        granted: &[usize],
    ) {
        let elapsed = started.elapsed();
        if elapsed > self.slow_threshold {
            warn!(
                kind = %kind,
                category,
                elapsed_ms = elapsed.as_millis() as u64,
                "slow retrieval"
            );
        } else {
            debug!(
                kind = %kind,
                category,
                returned,
                per_lane = ?granted,
                elapsed_us = elapsed.as_micros() as u64,
                "retrieval complete"
            );
        }
    }
}
