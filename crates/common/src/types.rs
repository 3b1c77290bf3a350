use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Gate values at or below this leave a vertex untouched.
pub const GATE_EPSILON: f64 = 1e-7;

/// Combined strength of the deformer on one vertex: global envelope times
/// painted weight.
#[inline]
pub fn gate(envelope: f64, weight: f64) -> f64 {
    envelope * weight
}

/// Whether a gate value is small enough to skip the vertex (or the pass).
#[inline]
pub fn is_gated_off(value: f64) -> bool {
    value <= GATE_EPSILON
}

/// Errors from validating noise parameters that came from outside the
/// program (preset files, command line).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("octaves must be at least 1, got {0}")]
    OctavesBelowMinimum(u32),
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
}

/// Noise settings for one deform pass.
///
/// Immutable for the duration of a pass. `octaves` is always at least 1 when
/// built through [`NoiseParameters::with_octaves`]; decoded values should be
/// checked with [`NoiseParameters::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParameters {
    /// Displacement scale per output axis.
    pub amplitude: DVec3,
    /// Sampling frequency per deformation-space axis.
    pub frequency: DVec3,
    /// Subtracted from the scaled coordinate; animating it scrolls the field.
    pub offset: DVec3,
    pub octaves: u32,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            amplitude: DVec3::ONE,
            frequency: DVec3::ONE,
            offset: DVec3::ZERO,
            octaves: 1,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

impl NoiseParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amplitude(mut self, amplitude: DVec3) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_frequency(mut self, frequency: DVec3) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_offset(mut self, offset: DVec3) -> Self {
        self.offset = offset;
        self
    }

    /// Set the octave count, clamped to the minimum of 1.
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves.max(1);
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Check the invariants that decoded values may violate.
    ///
    /// Zero or negative lacunarity and persistence are accepted; they only
    /// degenerate the octave series.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.octaves < 1 {
            return Err(ParamError::OctavesBelowMinimum(self.octaves));
        }
        let vectors = [
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
            ("offset", self.offset),
        ];
        for (field, v) in vectors {
            if !v.is_finite() {
                return Err(ParamError::NonFinite { field });
            }
        }
        if !self.lacunarity.is_finite() {
            return Err(ParamError::NonFinite {
                field: "lacunarity",
            });
        }
        if !self.persistence.is_finite() {
            return Err(ParamError::NonFinite {
                field: "persistence",
            });
        }
        Ok(())
    }
}
