//! Prediction domain - labels and the metadata attached to every answer

mod entity;

pub use entity::{AccuracyReport, PredictionLabel, PredictionResult, Species, VersionMetadata};
