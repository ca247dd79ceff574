//! Model version domain - closed version catalog and resolution outcomes

mod entity;
mod validation;

pub use entity::{ModelVersion, Provenance, ResolvedVersion};
pub use validation::{validate_version_key, VersionValidationError, MAX_VERSION_KEY_LENGTH};
