//! Persistence adapters for the registry.

pub mod in_memory;

pub use in_memory::InMemoryRegistryStore;
