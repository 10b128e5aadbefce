use crate::domain::entities::sample::Sample;
use crate::domain::error::{DomainError, ValidationError};
use crate::domain::ports::sample_repository::{CategorySamples, CategoryStats, SampleRepository};
use crate::domain::ports::snapshot_store::{CategoryKey, Snapshot};
use crate::domain::values::category_kind::CategoryKind;
use crate::domain::values::lane::Lane;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct StoreState {
    namespaces: HashMap<CategoryKind, BTreeMap<String, CategorySamples>>,
    next_seq: u64,
}

impl StoreState {
    fn namespace(&self, kind: CategoryKind) -> Option<&BTreeMap<String, CategorySamples>> {
        self.namespaces.get(&kind)
    }

    fn namespace_mut(&mut self, kind: CategoryKind) -> &mut BTreeMap<String, CategorySamples> {
        self.namespaces.entry(kind).or_default()
    }

    fn get(&self, kind: CategoryKind, category: &str) -> Option<&CategorySamples> {
        self.namespace(kind).and_then(|ns| ns.get(category))
    }
}

/// Process-local sample store. One mutex guards every category, so readers
/// never observe a half-applied write.
#[derive(Default)]
pub struct InMemorySampleRepo {
    state: Mutex<StoreState>,
}

impl InMemorySampleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, DomainError> {
        self.state
            .lock()
            .map_err(|e| DomainError::Internal(format!("Sample store lock poisoned: {e}")))
    }
}

impl SampleRepository for InMemorySampleRepo {
    fn create_category(&self, kind: CategoryKind, name: &str) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        let ns = state.namespace_mut(kind);
        if ns.contains_key(name) {
            return Ok(false);
        }
        ns.insert(name.to_string(), CategorySamples::default());
        Ok(true)
    }

    fn add(&self, mut sample: Sample) -> Result<Sample, DomainError> {
        let mut state = self.lock()?;
        sample.seq = state.next_seq;
        state.next_seq += 1;
        state
            .namespace_mut(sample.kind)
            .entry(sample.category.clone())
            .or_default()
            .lane_mut(sample.lane)
            .push(sample.clone());
        Ok(sample)
    }

    fn list(&self, kind: CategoryKind, category: &str, lane: Lane) -> Result<Vec<Sample>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .get(kind, category)
            .map(|c| c.lane(lane).to_vec())
            .unwrap_or_default())
    }

    fn category(&self, kind: CategoryKind, category: &str) -> Result<Option<CategorySamples>, DomainError> {
        let state = self.lock()?;
        Ok(state.get(kind, category).cloned())
    }

    fn categories(&self, kind: CategoryKind) -> Result<Vec<String>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .namespace(kind)
            .map(|ns| ns.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn delete_category(&self, kind: CategoryKind, category: &str) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        Ok(state.namespace_mut(kind).remove(category).is_some())
    }

    fn rename_category(&self, kind: CategoryKind, from: &str, to: &str) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        let ns = state.namespace_mut(kind);
        if !ns.contains_key(from) {
            return Err(DomainError::NotFound(format!("{kind} '{from}'")));
        }
        if from == to {
            return Ok(());
        }
        if ns.contains_key(to) {
            return Err(ValidationError::CategoryExists(to.to_string()).into());
        }

        let mut samples = ns.remove(from).unwrap_or_default();
        for lane in Lane::ALL {
            for sample in samples.lane_mut(lane).iter_mut() {
                sample.category = to.to_string();
            }
        }
        ns.insert(to.to_string(), samples);
        Ok(())
    }

    fn delete_sample(
        &self,
        kind: CategoryKind,
        category: &str,
        lane: Lane,
        index_from_end: usize,
    ) -> Result<Option<Sample>, DomainError> {
        let mut state = self.lock()?;
        let Some(samples) = state.namespace_mut(kind).get_mut(category) else {
            return Ok(None);
        };
        let list = samples.lane_mut(lane);
        if index_from_end >= list.len() {
            return Ok(None);
        }
        let idx = list.len() - 1 - index_from_end;
        Ok(Some(list.remove(idx)))
    }

    fn stats(&self, kind: CategoryKind, category: &str) -> Result<CategoryStats, DomainError> {
        let state = self.lock()?;
        Ok(match state.get(kind, category) {
            Some(samples) => CategoryStats::from_samples(kind, category, samples),
            None => CategoryStats::empty(kind, category),
        })
    }

    fn export(&self) -> Result<Snapshot, DomainError> {
        let state = self.lock()?;
        let mut snapshot = Snapshot::default();
        for kind in CategoryKind::ALL {
            let Some(ns) = state.namespace(kind) else {
                continue;
            };
            for (name, samples) in ns {
                snapshot.categories.push(CategoryKey {
                    kind,
                    name: name.clone(),
                });
                snapshot.samples.extend(samples.iter().cloned());
            }
        }
        snapshot.samples.sort_by_key(|s| s.seq);
        Ok(snapshot)
    }

    fn restore(&self, snapshot: Snapshot) -> Result<usize, DomainError> {
        let mut fresh = StoreState::default();
        for key in &snapshot.categories {
            fresh.namespace_mut(key.kind).entry(key.name.clone()).or_default();
        }

        let mut samples = snapshot.samples;
        samples.sort_by_key(|s| s.seq);
        let count = samples.len();
        for sample in samples {
            fresh.next_seq = fresh.next_seq.max(sample.seq + 1);
            fresh
                .namespace_mut(sample.kind)
                .entry(sample.category.clone())
                .or_default()
                .lane_mut(sample.lane)
                .push(sample);
        }

        *self.lock()? = fresh;
        Ok(count)
    }
}
