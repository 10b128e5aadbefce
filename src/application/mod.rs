pub mod add_sample;
pub mod categories;
pub mod retrieve;
pub mod snapshot;
