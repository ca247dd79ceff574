//! Prediction result types

use std::fmt;

use serde::{Serialize, Serializer};

use crate::domain::registry::RegistryRecord;
use crate::domain::version::{ModelVersion, Provenance};

/// Iris species, indexed the way the classifiers are trained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Setosa),
            1 => Some(Self::Versicolor),
            2 => Some(Self::Virginica),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setosa => "setosa",
            Self::Versicolor => "versicolor",
            Self::Virginica => "virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label returned to the caller: a species name, or the raw index when unmapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PredictionLabel {
    Species(Species),
    Index(i64),
}

impl From<i64> for PredictionLabel {
    fn from(index: i64) -> Self {
        Species::from_index(index).map_or(Self::Index(index), Self::Species)
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Species(species) => write!(f, "{}", species),
            Self::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Declared accuracy, serialized as a number or the string `"unknown"`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccuracyReport {
    Known(f64),
    Unknown,
}

impl From<Option<f64>> for AccuracyReport {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl Serialize for AccuracyReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(value) => serializer.serialize_f64(*value),
            Self::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// Accuracy and classifier family reported for one version
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionMetadata {
    pub accuracy: AccuracyReport,
    #[serde(rename = "model_type")]
    pub model_kind: String,
}

impl VersionMetadata {
    /// Metadata for `version` given the current registry record.
    ///
    /// Registry metrics are only attributed to the version the record describes;
    /// any other version reports its static family label and an unknown accuracy.
    pub fn from_registry(record: Option<&RegistryRecord>, version: &str) -> Self {
        match record {
            Some(record) if record.describes(version) => Self {
                accuracy: record.accuracy().into(),
                model_kind: record.model_kind().to_string(),
            },
            _ => Self {
                accuracy: AccuracyReport::Unknown,
                model_kind: ModelVersion::from_key(version)
                    .map_or("unknown", |v| v.model_kind())
                    .to_string(),
            },
        }
    }
}

/// A label plus the metadata describing which model produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Version whose artifact actually answered
    #[serde(rename = "model")]
    pub effective_version: String,
    pub requested_version: String,
    #[serde(rename = "source")]
    pub provenance: Provenance,
    pub fallback: bool,
    pub prediction: PredictionLabel,
    pub accuracy: AccuracyReport,
    #[serde(rename = "model_type")]
    pub model_kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_indices_map_to_species() {
        assert_eq!(PredictionLabel::from(0), PredictionLabel::Species(Species::Setosa));
        assert_eq!(PredictionLabel::from(1), PredictionLabel::Species(Species::Versicolor));
        assert_eq!(PredictionLabel::from(2), PredictionLabel::Species(Species::Virginica));
    }

    #[test]
    fn test_unknown_index_passes_through() {
        assert_eq!(PredictionLabel::from(7), PredictionLabel::Index(7));
        assert_eq!(PredictionLabel::from(-1), PredictionLabel::Index(-1));
        assert_eq!(serde_json::to_string(&PredictionLabel::from(7)).unwrap(), "7");
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(
            serde_json::to_string(&PredictionLabel::from(2)).unwrap(),
            "\"virginica\""
        );
    }

    #[test]
    fn test_accuracy_serialization() {
        assert_eq!(serde_json::to_string(&AccuracyReport::Known(0.95)).unwrap(), "0.95");
        assert_eq!(
            serde_json::to_string(&AccuracyReport::Unknown).unwrap(),
            "\"unknown\""
        );
        assert_eq!(AccuracyReport::from(None), AccuracyReport::Unknown);
    }

    #[test]
    fn test_metadata_from_matching_record() {
        let record = RegistryRecord::for_version(ModelVersion::V2, Some(0.95));

        let metadata = VersionMetadata::from_registry(Some(&record), "v2");
        assert_eq!(metadata.accuracy, AccuracyReport::Known(0.95));
        assert_eq!(metadata.model_kind, "RandomForestClassifier");
    }

    #[test]
    fn test_metadata_for_other_version() {
        let record = RegistryRecord::for_version(ModelVersion::V2, Some(0.95));

        let metadata = VersionMetadata::from_registry(Some(&record), "v1");
        assert_eq!(metadata.accuracy, AccuracyReport::Unknown);
        assert_eq!(metadata.model_kind, "DummyClassifier");
    }

    #[test]
    fn test_metadata_without_registry() {
        let metadata = VersionMetadata::from_registry(None, "v7");
        assert_eq!(metadata.accuracy, AccuracyReport::Unknown);
        assert_eq!(metadata.model_kind, "unknown");
    }

    #[test]
    fn test_result_field_names() {
        let result = PredictionResult {
            effective_version: "v1".to_string(),
            requested_version: "v2".to_string(),
            provenance: Provenance::Registry,
            fallback: true,
            prediction: PredictionLabel::from(0),
            accuracy: AccuracyReport::Unknown,
            model_kind: "DummyClassifier".to_string(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["model"], "v1");
        assert_eq!(json["requested_version"], "v2");
        assert_eq!(json["source"], "registry");
        assert_eq!(json["fallback"], true);
        assert_eq!(json["prediction"], "setosa");
        assert_eq!(json["accuracy"], "unknown");
        assert_eq!(json["model_type"], "DummyClassifier");
    }
}
