//! Presence registry implementations.

pub mod inmemory;

pub use inmemory::InMemoryPresenceRegistry;
