// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod local_storage;

pub use local_storage::LocalStorage;
