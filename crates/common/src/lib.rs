//! Shared types for the noise deformer: parameter bundle and gating rules.

mod types;

pub use types::{GATE_EPSILON, NoiseParameters, ParamError, gate, is_gated_off};
