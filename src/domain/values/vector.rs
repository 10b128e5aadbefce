//! Sparse hashed text vectors and cosine scoring.

use std::cmp::Ordering;

/// Sparse vector over a fixed number of hash buckets.
///
/// Entries are `(bucket, value)` pairs sorted by bucket with no zero values.
/// Vectors produced by an encoder are L2-normalized, or empty (the zero vector)
/// when the text yielded no n-grams.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    dimension: usize,
    entries: Vec<(u32, f32)>,
}

impl Vector {
    pub fn zero(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Build a unit vector from per-bucket counts. Zero counts are dropped.
    /// All-zero counts give the zero vector.
    pub fn from_counts(dimension: usize, counts: &[(u32, u32)]) -> Self {
        let norm = counts
            .iter()
            .map(|&(_, c)| (c as f64) * (c as f64))
            .sum::<f64>()
            .sqrt();
        if norm == 0.0 {
            return Self::zero(dimension);
        }

        let mut entries: Vec<(u32, f32)> = counts
            .iter()
            .filter(|&&(_, c)| c > 0)
            .map(|&(bucket, c)| (bucket, (c as f64 / norm) as f32))
            .collect();
        entries.sort_by_key(|&(bucket, _)| bucket);
        Self { dimension, entries }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f32 {
        self.entries
            .iter()
            .map(|&(_, v)| v * v)
            .sum::<f32>()
            .sqrt()
    }

}

/// Cosine similarity of two encoder vectors, in `[-1.0, 1.0]`.
///
/// Returns exactly `0.0` if either side is the zero vector or the
/// dimensions differ. Inputs are unit length, so this is a merge-join
/// dot product over the shared buckets.
pub fn similarity(a: &Vector, b: &Vector) -> f32 {
    if a.dimension != b.dimension || a.is_zero() || b.is_zero() {
        return 0.0;
    }

    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0_f64;
    while i < a.entries.len() && j < b.entries.len() {
        let (ba, va) = a.entries[i];
        let (bb, vb) = b.entries[j];
        match ba.cmp(&bb) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dot += va as f64 * vb as f64;
                i += 1;
                j += 1;
            }
        }
    }

    (dot as f32).clamp(-1.0, 1.0)
}
