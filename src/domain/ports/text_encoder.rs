use crate::domain::values::vector::Vector;

/// Maps text to a vector. Implementations must be pure: the same
/// normalized text always yields a bit-identical vector.
pub trait TextEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Vector;
    fn dimension(&self) -> usize;
    /// Encoder name for logging
    fn name(&self) -> &str;
}
