use crate::domain::ports::text_encoder::TextEncoder;
use crate::domain::values::vector::Vector;
use std::collections::BTreeMap;
use xxhash_rust::xxh3::xxh3_64;

pub const DEFAULT_NGRAM_WIDTH: usize = 3;
pub const DEFAULT_DIMENSIONS: usize = 256;

/// Case-fold and collapse every whitespace run to a single space.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Character n-gram hashing encoder.
///
/// Overlapping n-grams of the normalized text are hashed with xxh3 into
/// `dimension` buckets; bucket counts are L2-normalized. Text shorter than
/// one n-gram encodes to the zero vector.
#[derive(Debug, Clone)]
pub struct TrigramEncoder {
    width: usize,
    dimension: usize,
}

impl TrigramEncoder {
    pub fn new(width: usize, dimension: usize) -> Self {
        Self { width, dimension }
    }

    fn bucket(&self, gram: &str) -> u32 {
        (xxh3_64(gram.as_bytes()) % self.dimension as u64) as u32
    }
}

impl Default for TrigramEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_NGRAM_WIDTH, DEFAULT_DIMENSIONS)
    }
}

impl TextEncoder for TrigramEncoder {
    fn encode(&self, text: &str) -> Vector {
        let normalized = normalize_text(text);
        let chars: Vec<char> = normalized.chars().collect();
        if self.width == 0 || self.dimension == 0 || chars.len() < self.width {
            return Vector::zero(self.dimension);
        }

        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        let mut gram = String::with_capacity(self.width * 4);
        for window in chars.windows(self.width) {
            gram.clear();
            gram.extend(window);
            *counts.entry(self.bucket(&gram)).or_insert(0) += 1;
        }

        let counts: Vec<(u32, u32)> = counts.into_iter().collect();
        Vector::from_counts(self.dimension, &counts)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "trigram"
    }
}
