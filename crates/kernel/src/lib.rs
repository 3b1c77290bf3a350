//! Displacement kernel: moves mesh points by per-axis fBm noise sampled in a
//! locator-defined deformation space.
//!
//! # Invariants
//! - Each vertex is a pure function of its position, weight, the pass
//!   parameters and the two world matrices; vertex order and task count never
//!   change the result.
//! - A gate (envelope times weight) at or below `GATE_EPSILON` leaves a vertex
//!   bit-for-bit unchanged.
//! - Host inputs are never mutated; only the point slice handed to a pass is.

pub mod deformer;
pub mod displace;
pub mod space;

pub use deformer::{DEFAULT_NUM_TASKS, DeformStats, NoiseDeformer, Vertex, task_width};
pub use displace::{AXIS_OFFSETS, axis_samples, displace_point, displacement, noise_coordinates};
pub use space::{SpaceTransforms, TransformMemo};

pub fn crate_info() -> &'static str {
    "noisedeform-kernel v0.1.0"
}
