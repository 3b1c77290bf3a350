use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{PresetError, read_document, write_document};

/// A batch of object-space points with optional painted weights.
///
/// Points without a matching weight are treated as weight 1.0 by the deformer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    pub points: Vec<DVec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
}

impl PointSet {
    pub fn new(points: Vec<DVec3>) -> Self {
        Self {
            points,
            weights: None,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let set: Self = read_document(path.as_ref())?;
        let mismatched = set
            .weights
            .as_ref()
            .filter(|w| w.len() != set.points.len());
        if let Some(weights) = mismatched {
            tracing::warn!(
                points = set.points.len(),
                weights = weights.len(),
                "weight count differs from point count"
            );
        }
        Ok(set)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        write_document(path.as_ref(), self)
    }

    /// The painted weights, empty when none were given.
    pub fn weights(&self) -> &[f64] {
        self.weights.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
