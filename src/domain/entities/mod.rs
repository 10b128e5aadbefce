pub mod exemplar;
pub mod sample;
