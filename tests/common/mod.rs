//! Shared test helpers.
#![allow(dead_code)]

use std::sync::Arc;
use voicevault::config::VaultConfig;
use voicevault::domain::values::category_kind::CategoryKind;
use voicevault::domain::values::lane::Lane;
use voicevault::infrastructure::encoding::noop::NoopEncoder;
use voicevault::infrastructure::encoding::trigram::TrigramEncoder;
use voicevault::VoiceVault;

pub fn setup() -> VoiceVault {
    setup_with(VaultConfig::default())
}

pub fn setup_with(config: VaultConfig) -> VoiceVault {
    VoiceVault::with_providers(":memory:", config, Arc::new(TrigramEncoder::default())).unwrap()
}

pub fn setup_noop() -> VoiceVault {
    VoiceVault::with_providers(":memory:", VaultConfig::default(), Arc::new(NoopEncoder)).unwrap()
}

/// Add `n` distinct samples to `lane` of voice category `category`.
pub fn fill_lane(vault: &VoiceVault, category: &str, lane: Lane, n: usize) {
    for i in 0..n {
        let text = format!("{} sample number {i} for the {category} voice", lane.as_str());
        vault.add_sample(CategoryKind::Voice, category, lane, &text).unwrap();
    }
}

pub fn lane_counts(lanes: &[Lane]) -> [usize; 4] {
    let mut counts = [0; 4];
    for lane in lanes {
        counts[lane.index()] += 1;
    }
    counts
}
