pub mod encoding;
pub mod memory;
pub mod sqlite;
