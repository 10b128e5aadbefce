use crate::domain::ports::text_encoder::TextEncoder;
use crate::domain::values::vector::Vector;

/// Encoder that yields the zero vector for everything. Every score is 0.0, so
/// retrieval degrades to insertion order.
pub struct NoopEncoder;

impl TextEncoder for NoopEncoder {
    fn encode(&self, _text: &str) -> Vector {
        Vector::zero(0)
    }

    fn dimension(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "noop"
    }
}
