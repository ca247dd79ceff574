//! Registry domain - the persisted record naming the active model version

mod entity;
mod repository;

pub use entity::{RegistryMetrics, RegistryRecord};
pub use repository::RegistryStore;

#[cfg(test)]
pub use repository::mock;
