pub mod sample_repository;
pub mod snapshot_store;
pub mod text_encoder;
