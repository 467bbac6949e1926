//! Save/restore of game state across suspension
//!
//! Features:
//! - Key-value container abstraction supplied by the host
//! - Fixed-layout numeric records per entity
//! - JSON-file-backed in-memory store

pub mod snapshot;
pub mod store;

pub use snapshot::{BallRecord, PaddleRecord, RestoreError, Snapshot, keys};
pub use store::{MemoryStore, PersistenceError, StateStore};
