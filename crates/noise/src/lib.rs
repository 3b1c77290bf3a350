//! Noise primitive and fBm evaluator.
//!
//! # Invariants
//! - Every field is a pure function of its coordinates; no seed, no mutable state.
//! - Fields are `Send + Sync` so a deform pass can share one across threads.

mod fbm;
mod simplex;

pub use fbm::{Fbm, fbm};
pub use simplex::{Simplex, noise3};

/// A scalar 3D noise field.
///
/// This is the seam for swapping the primitive at build time. [`Simplex`] is
/// the implementation the deformer uses.
pub trait NoiseField: Send + Sync {
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64;

    #[inline]
    fn sample(&self, p: glam::DVec3) -> f64 {
        self.noise3(p.x, p.y, p.z)
    }
}

impl<N: NoiseField + ?Sized> NoiseField for &N {
    #[inline]
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).noise3(x, y, z)
    }
}
