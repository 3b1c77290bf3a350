use std::path::Path;

use glam::{DMat4, DQuat, DVec3, EulerRot};
use noisedeform_common::NoiseParameters;
use noisedeform_kernel::{DEFAULT_NUM_TASKS, NoiseDeformer};
use serde::{Deserialize, Serialize};

use crate::{PresetError, read_document, write_document};

/// Placement of the locator that defines the deformation space.
///
/// Rotation is in degrees about the fixed X, then Y, then Z axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorPose {
    pub translation: DVec3,
    pub rotation_degrees: DVec3,
    pub scale: DVec3,
}

impl Default for LocatorPose {
    fn default() -> Self {
        Self {
            translation: DVec3::ZERO,
            rotation_degrees: DVec3::ZERO,
            scale: DVec3::ONE,
        }
    }
}

impl LocatorPose {
    /// The locator's world matrix.
    pub fn to_matrix(&self) -> DMat4 {
        let r = self.rotation_degrees;
        let rotation = DQuat::from_euler(
            EulerRot::ZYX,
            r.z.to_radians(),
            r.y.to_radians(),
            r.x.to_radians(),
        );
        DMat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

/// Everything a deformer needs besides the points: noise settings, envelope,
/// task count and locator placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeformerPreset {
    pub params: NoiseParameters,
    pub envelope: f64,
    pub num_tasks: usize,
    pub locator: LocatorPose,
}

impl Default for DeformerPreset {
    fn default() -> Self {
        Self {
            params: NoiseParameters::default(),
            envelope: 1.0,
            num_tasks: DEFAULT_NUM_TASKS,
            locator: LocatorPose::default(),
        }
    }
}

impl DeformerPreset {
    /// Load and validate a preset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let preset: Self = read_document(path.as_ref())?;
        preset.validate()?;
        Ok(preset)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        write_document(path.as_ref(), self)
    }

    pub fn validate(&self) -> Result<(), PresetError> {
        self.params.validate()?;
        if self.num_tasks < 1 {
            return Err(PresetError::InvalidTaskCount(self.num_tasks));
        }
        Ok(())
    }

    pub fn deformer(&self) -> NoiseDeformer {
        NoiseDeformer::new(self.params)
            .with_envelope(self.envelope)
            .with_num_tasks(self.num_tasks)
    }
}
