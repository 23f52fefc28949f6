//! Infrastructure layer: storage adapters for the customer/document registry.

pub mod store;

pub use store::InMemoryRegistryStore;
