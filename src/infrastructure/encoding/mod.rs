pub mod cache;
pub mod noop;
pub mod trigram;
