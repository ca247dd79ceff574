//! JSON artifact codec and the classifier families it can produce

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{ArtifactCodec, Classifier, DomainError, IrisFeatures, ModelHandle};

/// One class centre in feature space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub class_index: i64,
    pub center: [f64; 4],
}

/// Serialized form of a trained artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactDocument {
    /// Always predicts the same class
    Constant {
        #[serde(default)]
        family: Option<String>,
        class_index: i64,
    },
    /// Predicts the class of the nearest centroid
    NearestCentroid {
        #[serde(default)]
        family: Option<String>,
        centroids: Vec<Centroid>,
    },
}

impl ArtifactDocument {
    pub fn into_handle(self) -> Result<ModelHandle, DomainError> {
        match self {
            Self::Constant {
                family,
                class_index,
            } => Ok(Arc::new(ConstantClassifier::new(
                class_index,
                family.unwrap_or_else(|| "ConstantClassifier".to_string()),
            ))),
            Self::NearestCentroid { family, centroids } => {
                let classifier = NearestCentroidClassifier::new(
                    centroids,
                    family.unwrap_or_else(|| "NearestCentroid".to_string()),
                )?;
                Ok(Arc::new(classifier))
            }
        }
    }
}

/// Decodes [`ArtifactDocument`] JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonArtifactCodec;

impl ArtifactCodec for JsonArtifactCodec {
    fn decode(&self, bytes: &[u8]) -> Result<ModelHandle, DomainError> {
        let document: ArtifactDocument = serde_json::from_slice(bytes)
            .map_err(|e| DomainError::internal(format!("Undecodable artifact: {}", e)))?;

        document.into_handle()
    }
}

#[derive(Debug)]
pub struct ConstantClassifier {
    class_index: i64,
    family: String,
}

impl ConstantClassifier {
    pub fn new(class_index: i64, family: impl Into<String>) -> Self {
        Self {
            class_index,
            family: family.into(),
        }
    }
}

impl Classifier for ConstantClassifier {
    fn predict(&self, _features: &IrisFeatures) -> i64 {
        self.class_index
    }

    fn family(&self) -> &str {
        &self.family
    }
}

#[derive(Debug)]
pub struct NearestCentroidClassifier {
    centroids: Vec<Centroid>,
    family: String,
}

impl NearestCentroidClassifier {
    pub fn new(centroids: Vec<Centroid>, family: impl Into<String>) -> Result<Self, DomainError> {
        if centroids.is_empty() {
            return Err(DomainError::internal("Artifact has no centroids"));
        }

        if centroids
            .iter()
            .any(|c| c.center.iter().any(|v| !v.is_finite()))
        {
            return Err(DomainError::internal("Artifact centroid is not finite"));
        }

        Ok(Self {
            centroids,
            family: family.into(),
        })
    }

    fn squared_distance(a: &[f64; 4], b: &[f64; 4]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
    }
}

impl Classifier for NearestCentroidClassifier {
    fn predict(&self, features: &IrisFeatures) -> i64 {
        let point = features.as_array();

        // Non-empty by construction; ties resolve to the first centroid.
        let mut best = &self.centroids[0];
        let mut best_distance = Self::squared_distance(&best.center, &point);

        for centroid in &self.centroids[1..] {
            let distance = Self::squared_distance(&centroid.center, &point);
            if distance < best_distance {
                best = centroid;
                best_distance = distance;
            }
        }

        best.class_index
    }

    fn family(&self) -> &str {
        &self.family
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iris_centroids() -> Vec<Centroid> {
        vec![
            Centroid {
                class_index: 0,
                center: [5.006, 3.428, 1.462, 0.246],
            },
            Centroid {
                class_index: 1,
                center: [5.936, 2.770, 4.260, 1.326],
            },
            Centroid {
                class_index: 2,
                center: [6.588, 2.974, 5.552, 2.026],
            },
        ]
    }

    #[test]
    fn test_decode_constant() {
        let raw = br#"{"kind": "constant", "family": "DummyClassifier", "class_index": 0}"#;

        let handle = JsonArtifactCodec.decode(raw).unwrap();
        let features = IrisFeatures::new(6.7, 3.0, 5.2, 2.3).unwrap();
        assert_eq!(handle.predict(&features), 0);
        assert_eq!(handle.family(), "DummyClassifier");
    }

    #[test]
    fn test_decode_nearest_centroid() {
        let document = ArtifactDocument::NearestCentroid {
            family: Some("RandomForestClassifier".to_string()),
            centroids: iris_centroids(),
        };
        let raw = serde_json::to_vec(&document).unwrap();

        let handle = JsonArtifactCodec.decode(&raw).unwrap();
        assert_eq!(handle.predict(&IrisFeatures::new(5.1, 3.5, 1.4, 0.2).unwrap()), 0);
        assert_eq!(handle.predict(&IrisFeatures::new(5.9, 2.8, 4.3, 1.3).unwrap()), 1);
        assert_eq!(handle.predict(&IrisFeatures::new(6.7, 3.0, 5.6, 2.2).unwrap()), 2);
    }

    #[test]
    fn test_default_family_names() {
        let raw = br#"{"kind": "constant", "class_index": 2}"#;
        let handle = JsonArtifactCodec.decode(raw).unwrap();
        assert_eq!(handle.family(), "ConstantClassifier");
    }

    #[test]
    fn test_garbage_is_internal_error() {
        let err = JsonArtifactCodec.decode(b"\x80\x04pickle").unwrap_err();
        assert!(matches!(err, DomainError::Internal { .. }));
    }

    #[test]
    fn test_empty_centroids_rejected() {
        let raw = br#"{"kind": "nearest_centroid", "centroids": []}"#;
        assert!(JsonArtifactCodec.decode(raw).is_err());
    }
}
