//! Lane mixing policy.
//!
//! Splits a top-K request across the four lanes by fixed weights. The target
//! lane gets its share rounded up; the auxiliary lanes split what is left by
//! the largest-remainder method. Shortfalls are refilled target-first, then by
//! descending weight.

use crate::domain::values::lane::Lane;
use serde::{Deserialize, Serialize};

/// Percent weights for the target lane, the Narration lane, and the pool the
/// remaining lanes share equally. Proportions only; they need not sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneWeights {
    #[serde(default = "default_target")]
    pub target: u32,
    #[serde(default = "default_narration")]
    pub narration: u32,
    #[serde(default = "default_other")]
    pub other: u32,
}

fn default_target() -> u32 {
    60
}
fn default_narration() -> u32 {
    20
}
fn default_other() -> u32 {
    20
}

impl Default for LaneWeights {
    fn default() -> Self {
        Self {
            target: default_target(),
            narration: default_narration(),
            other: default_other(),
        }
    }
}

/// One lane's place in a plan. `weight` is scaled so every share is integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneSlot {
    pub lane: Lane,
    pub weight: u64,
    pub quota: usize,
}

/// Slot allocation for one retrieval, in emission order: target lane first,
/// then Narration (unless it is the target), then the rest in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixPlan {
    k: usize,
    slots: Vec<LaneSlot>,
}

impl LaneWeights {
    pub fn plan(&self, target: Lane, k: usize) -> MixPlan {
        let others: Vec<Lane> = Lane::ALL
            .into_iter()
            .filter(|&l| l != target && l != Lane::Narration)
            .collect();
        let n_others = others.len() as u64;

        // Scale target and narration by the number of sharing lanes so the
        // `other` pool splits without fractions.
        let mut target_weight = self.target as u64 * n_others;
        if target == Lane::Narration {
            target_weight += self.narration as u64 * n_others;
        }

        let mut slots = vec![LaneSlot {
            lane: target,
            weight: target_weight,
            quota: 0,
        }];
        if target != Lane::Narration {
            slots.push(LaneSlot {
                lane: Lane::Narration,
                weight: self.narration as u64 * n_others,
                quota: 0,
            });
        }
        slots.extend(others.into_iter().map(|lane| LaneSlot {
            lane,
            weight: self.other as u64,
            quota: 0,
        }));

        allocate(&mut slots, k);
        MixPlan { k, slots }
    }
}

fn allocate(slots: &mut [LaneSlot], k: usize) {
    if k == 0 {
        return;
    }
    let k_wide = k as u128;
    let total: u128 = slots.iter().map(|s| s.weight as u128).sum();
    let aux_total = total - slots[0].weight as u128;

    if total == 0 || aux_total == 0 {
        slots[0].quota = k;
        return;
    }

    let target_quota = (k_wide * slots[0].weight as u128).div_ceil(total).min(k_wide);
    slots[0].quota = target_quota as usize;

    let rest = k_wide - target_quota;
    let mut remainders: Vec<(usize, u128)> = Vec::with_capacity(slots.len() - 1);
    let mut assigned = 0u128;
    for (i, slot) in slots.iter_mut().enumerate().skip(1) {
        let share = rest * slot.weight as u128;
        slot.quota = (share / aux_total) as usize;
        assigned += share / aux_total;
        remainders.push((i, share % aux_total));
    }

    // Largest remainder wins a leftover slot; earlier lane on ties.
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let leftover = (rest - assigned) as usize;
    for &(i, _) in remainders.iter().take(leftover) {
        slots[i].quota += 1;
    }
}

impl MixPlan {
    pub fn slots(&self) -> &[LaneSlot] {
        &self.slots
    }

    pub fn quotas(&self) -> Vec<usize> {
        self.slots.iter().map(|s| s.quota).collect()
    }

    /// Final per-slot counts given how many candidates each lane holds
    /// (indexed like `slots()`). Never exceeds availability; the total is
    /// `min(k, sum(available))`.
    pub fn grant(&self, available: &[usize]) -> Vec<usize> {
        let avail = |i: usize| available.get(i).copied().unwrap_or(0);

        let mut granted: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, s)| s.quota.min(avail(i)))
            .collect();
        let mut spare = self.k - granted.iter().sum::<usize>();

        let mut refill: Vec<usize> = (1..self.slots.len()).collect();
        refill.sort_by(|&a, &b| self.slots[b].weight.cmp(&self.slots[a].weight));
        refill.insert(0, 0);

        for i in refill {
            if spare == 0 {
                break;
            }
            let extra = (avail(i) - granted[i]).min(spare);
            granted[i] += extra;
            spare -= extra;
        }
        granted
    }
}
