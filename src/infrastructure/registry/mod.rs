//! Registry store implementations

mod file_store;
mod in_memory;

pub use file_store::FileRegistryStore;
pub use in_memory::InMemoryRegistryStore;
