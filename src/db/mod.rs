//! Database layer (in-memory collections with JSON snapshots).

pub mod memory;

pub use memory::MemoryDb;

/// Collection names as constants. Each collection is snapshotted to
/// `<data_dir>/<name>.json`.
pub mod collections {
    pub const PLAYERS: &str = "players";
    pub const MATCHES: &str = "matches";
}
