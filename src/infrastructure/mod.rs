//! Infrastructure layer - storage backends and services

pub mod artifact;
pub mod logging;
pub mod registry;
pub mod services;
