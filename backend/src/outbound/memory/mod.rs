//! Process-local storage adapter.
//!
//! [`InMemoryStore`] implements every driven port against a single mutex
//! guarded state. Writes are staged on a copy and swapped in on success, so a
//! failed recipe write leaves nothing behind, matching the transactional
//! behaviour of the PostgreSQL adapters.

mod in_memory_store;

pub use in_memory_store::InMemoryStore;
