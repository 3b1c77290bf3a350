//! Fractional Brownian motion: octaves of a noise field summed together.
//!
//! The sum is deliberately left unnormalized. Its magnitude grows with the
//! octave count and persistence, bounded by [`Fbm::amplitude_bound`] times the
//! range of the underlying field.

use glam::DVec3;

use crate::NoiseField;

/// Layer `octaves` samples of `noise`, each at `lacunarity` times the previous
/// frequency and `persistence` times the previous amplitude.
///
/// `octaves == 1` is exactly one raw sample. `octaves == 0` yields 0.0.
pub fn fbm<N: NoiseField + ?Sized>(
    noise: &N,
    x: f64,
    y: f64,
    z: f64,
    octaves: u32,
    lacunarity: f64,
    persistence: f64,
) -> f64 {
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut sum = 0.0;
    for _ in 0..octaves {
        sum += amplitude * noise.noise3(x * frequency, y * frequency, z * frequency);
        amplitude *= persistence;
        frequency *= lacunarity;
    }
    sum
}

/// The octave settings of an fBm series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fbm {
    pub octaves: u32,
    pub lacunarity: f64,
    pub persistence: f64,
}

impl Default for Fbm {
    fn default() -> Self {
        Self {
            octaves: 1,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

impl Fbm {
    pub fn new(octaves: u32, lacunarity: f64, persistence: f64) -> Self {
        Self {
            octaves,
            lacunarity,
            persistence,
        }
    }

    #[inline]
    pub fn sample<N: NoiseField + ?Sized>(&self, noise: &N, p: DVec3) -> f64 {
        fbm(
            noise,
            p.x,
            p.y,
            p.z,
            self.octaves,
            self.lacunarity,
            self.persistence,
        )
    }

    /// Sum of the absolute per-octave amplitudes.
    pub fn amplitude_bound(&self) -> f64 {
        let mut amplitude = 1.0_f64;
        let mut total = 0.0;
        for _ in 0..self.octaves {
            total += amplitude.abs();
            amplitude *= self.persistence;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Simplex, noise3};

    const POINTS: [(f64, f64, f64); 4] = [
        (0.3, -1.7, 2.5),
        (1.25, 2.5, -0.75),
        (-3.1, 0.45, 7.9),
        (10.0, 20.5, -30.25),
    ];

    #[test]
    fn single_octave_is_raw_noise() {
        for (x, y, z) in POINTS {
            for (lac, per) in [(2.0, 0.5), (0.0, 0.0), (3.7, 1.9), (-1.0, -2.0)] {
                assert_eq!(fbm(&Simplex, x, y, z, 1, lac, per), noise3(x, y, z));
            }
        }
    }

    #[test]
    fn zero_octaves_is_zero() {
        assert_eq!(fbm(&Simplex, 0.3, -1.7, 2.5, 0, 2.0, 0.5), 0.0);
    }

    #[test]
    fn golden_four_octaves() {
        let v = fbm(&Simplex, 0.3, -1.7, 2.5, 4, 2.0, 0.5);
        assert!((v - 0.8890699278765426).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn zero_persistence_keeps_first_octave_only() {
        for (x, y, z) in POINTS {
            assert_eq!(fbm(&Simplex, x, y, z, 5, 2.0, 0.0), noise3(x, y, z));
        }
    }

    #[test]
    fn zero_lacunarity_collapses_to_origin_sample() {
        // After the first octave every layer samples noise3(0, 0, 0) == 0.
        for (x, y, z) in POINTS {
            let v = fbm(&Simplex, x, y, z, 6, 0.0, 0.5);
            assert!((v - noise3(x, y, z)).abs() < 1e-15);
        }
    }

    #[test]
    fn output_is_not_normalized() {
        // With persistence 1 every octave adds a full-strength layer, so the
        // sum can leave [-1, 1]. Two identical layers double the value.
        let (x, y, z) = POINTS[0];
        let v = fbm(&Simplex, x, y, z, 2, 1.0, 1.0);
        assert_eq!(v, 2.0 * noise3(x, y, z));
        assert!(v.abs() > 1.0);
    }

    #[test]
    fn amplitude_bound_grows_with_octaves() {
        for per in [0.25, 0.5, 1.0, 1.5] {
            let mut last = 0.0;
            for octaves in 1..10 {
                let bound = Fbm::new(octaves, 2.0, per).amplitude_bound();
                assert!(bound >= last);
                last = bound;
            }
        }
        assert_eq!(Fbm::new(3, 2.0, 0.5).amplitude_bound(), 1.75);
    }

    #[test]
    fn samples_respect_amplitude_bound() {
        let series = Fbm::new(6, 2.0, 0.5);
        let bound = series.amplitude_bound();
        for (x, y, z) in POINTS {
            let v = series.sample(&Simplex, DVec3::new(x, y, z));
            assert!(v.abs() <= bound);
        }
    }

    #[test]
    fn sample_matches_free_function() {
        let series = Fbm::new(4, 2.0, 0.5);
        let p = DVec3::new(0.3, -1.7, 2.5);
        assert_eq!(
            series.sample(&Simplex, p),
            fbm(&Simplex, p.x, p.y, p.z, 4, 2.0, 0.5)
        );
    }
}
