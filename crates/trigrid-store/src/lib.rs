//! Game record storage for Trigrid.
//!
//! The engine persists sessions through the narrow [`GameStore`] contract:
//! load by id, full-record save, and two lookup queries. Every save is
//! guarded by the record's version field, which is how concurrent
//! read-modify-write cycles against the same session are kept from losing
//! updates (the slower writer fails and retries).
//!
//! [`MemoryStore`] is the in-process reference implementation; a durable
//! backend implements the same trait.

mod error;
mod memory;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::GameStore;
