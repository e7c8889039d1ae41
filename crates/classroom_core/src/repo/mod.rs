//! Association store contract and its adapters.
//!
//! # Responsibility
//! - Define the storage operations the classroom services depend on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Adapters report missing entities as `None`/absent rows, never as errors.
//! - Persistence failures surface as `StoreError` and are not retried here.

pub mod association_store;
pub mod memory_store;
pub mod sqlite_store;
