//! Per-vertex displacement.

use glam::DVec3;
use noisedeform_common::{NoiseParameters, is_gated_off};
use noisedeform_noise::{Fbm, NoiseField};

use crate::space::SpaceTransforms;

/// Added to the shared noise coordinate before sampling each output axis.
///
/// One sample reused for all three axes would push every point along the same
/// diagonal; sampling far-apart regions of the field decorrelates them.
pub const AXIS_OFFSETS: [DVec3; 3] = [
    DVec3::ZERO,
    DVec3::new(123.0, 456.0, 789.0),
    DVec3::new(234.0, 567.0, 890.0),
];

/// Noise-space coordinate for a point already in deformation space.
#[inline]
pub fn noise_coordinates(params: &NoiseParameters, p_locator: DVec3) -> DVec3 {
    params.frequency * p_locator - params.offset
}

/// The three per-axis fBm samples at `coords`, before amplitude and gate.
pub fn axis_samples<N: NoiseField + ?Sized>(
    noise: &N,
    params: &NoiseParameters,
    coords: DVec3,
) -> DVec3 {
    let series = Fbm::new(params.octaves, params.lacunarity, params.persistence);
    DVec3::new(
        series.sample(noise, coords + AXIS_OFFSETS[0]),
        series.sample(noise, coords + AXIS_OFFSETS[1]),
        series.sample(noise, coords + AXIS_OFFSETS[2]),
    )
}

/// Displacement vector in deformation space for a point in deformation space.
pub fn displacement<N: NoiseField + ?Sized>(
    noise: &N,
    params: &NoiseParameters,
    p_locator: DVec3,
    gate: f64,
) -> DVec3 {
    let coords = noise_coordinates(params, p_locator);
    params.amplitude * axis_samples(noise, params, coords) * gate
}

/// Move one object-space point through the deformer.
///
/// `gate` is envelope times weight. At or below the gate epsilon the point is
/// returned unchanged, without the transform round trip.
pub fn displace_point<N: NoiseField + ?Sized>(
    noise: &N,
    params: &NoiseParameters,
    transforms: &SpaceTransforms,
    gate: f64,
    p_object: DVec3,
) -> DVec3 {
    if is_gated_off(gate) {
        return p_object;
    }
    let local = transforms.to_locator(p_object);
    let displaced = local + displacement(noise, params, local, gate);
    transforms.to_object(displaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DMat4, DQuat};
    use noisedeform_noise::{Simplex, noise3};

    fn close(a: DVec3, b: DVec3, tol: f64) -> bool {
        (a - b).abs().max_element() <= tol
    }

    fn identity() -> SpaceTransforms {
        SpaceTransforms::new(DMat4::IDENTITY, DMat4::IDENTITY)
    }

    fn general_transforms() -> SpaceTransforms {
        let object = DMat4::from_scale_rotation_translation(
            DVec3::new(1.0, 2.0, 0.5),
            DQuat::from_euler(glam::EulerRot::XYZ, 0.2, 0.9, -0.4),
            DVec3::new(3.0, -1.0, 2.0),
        );
        let locator = DMat4::from_scale_rotation_translation(
            DVec3::splat(1.7),
            DQuat::from_euler(glam::EulerRot::XYZ, -0.6, 0.1, 1.3),
            DVec3::new(-2.0, 4.0, 0.25),
        );
        SpaceTransforms::new(object, locator)
    }

    #[test]
    fn coordinates_scale_then_subtract_offset() {
        let params = NoiseParameters::new()
            .with_frequency(DVec3::new(2.0, 0.5, -1.0))
            .with_offset(DVec3::new(1.0, 1.0, 1.0));
        let c = noise_coordinates(&params, DVec3::new(3.0, 4.0, 5.0));
        assert_eq!(c, DVec3::new(5.0, 1.0, -6.0));
    }

    #[test]
    fn zero_gate_is_exact_identity() {
        let params = NoiseParameters::new().with_octaves(4);
        let t = general_transforms();
        let p = DVec3::new(0.4, -2.2, 7.1);
        assert_eq!(displace_point(&Simplex, &params, &t, 0.0, p), p);
        assert_eq!(displace_point(&Simplex, &params, &t, 1e-8, p), p);
    }

    #[test]
    fn zero_amplitude_round_trips_within_tolerance() {
        let params = NoiseParameters::new()
            .with_amplitude(DVec3::ZERO)
            .with_octaves(3);
        let t = general_transforms();
        for p in [
            DVec3::ZERO,
            DVec3::new(0.4, -2.2, 7.1),
            DVec3::new(-15.0, 3.5, 22.0),
        ] {
            let out = displace_point(&Simplex, &params, &t, 1.0, p);
            assert!(close(out, p, 1e-9), "{out:?} drifted from {p:?}");
        }
    }

    #[test]
    fn axes_are_decorrelated() {
        let params = NoiseParameters::new().with_octaves(4);
        for p in [
            DVec3::new(0.3, -1.7, 2.5),
            DVec3::new(1.25, 2.5, -0.75),
            DVec3::new(-3.1, 0.45, 7.9),
        ] {
            let s = axis_samples(&Simplex, &params, p);
            assert_ne!(s.x, s.y);
            assert_ne!(s.y, s.z);
            assert_ne!(s.x, s.z);
        }
    }

    #[test]
    fn origin_scenario_golden() {
        let params = NoiseParameters::new().with_octaves(4);
        let out = displace_point(&Simplex, &params, &identity(), 1.0, DVec3::ZERO);
        // The X and Y samples land on lattice vertices, where the field is 0.
        let expected = DVec3::new(0.0, 0.0, 0.34757587448553806);
        assert!(close(out, expected, 1e-12), "got {out:?}");
    }

    #[test]
    fn single_octave_is_amplitude_times_raw_noise() {
        let params = NoiseParameters::new().with_amplitude(DVec3::new(0.5, 2.0, -3.0));
        let p = DVec3::new(0.3, -1.7, 2.5);
        let d = displacement(&Simplex, &params, p, 1.0);
        assert_eq!(d.x, 0.5 * noise3(p.x, p.y, p.z));
        assert_eq!(d.y, 2.0 * noise3(p.x + 123.0, p.y + 456.0, p.z + 789.0));
        assert_eq!(d.z, -3.0 * noise3(p.x + 234.0, p.y + 567.0, p.z + 890.0));

        let out = displace_point(&Simplex, &NoiseParameters::new(), &identity(), 1.0, DVec3::ZERO);
        let expected = DVec3::new(
            noise3(0.0, 0.0, 0.0),
            noise3(123.0, 456.0, 789.0),
            noise3(234.0, 567.0, 890.0),
        );
        assert!(close(out, expected, 1e-15));
        assert!((out.z - -0.039094650205894636).abs() < 1e-12);
    }

    #[test]
    fn locator_space_golden() {
        // Locator at (1, 2, 3) with uniform scale 2; object sits at the world origin.
        let locator = DMat4::from_scale_rotation_translation(
            DVec3::splat(2.0),
            DQuat::IDENTITY,
            DVec3::new(1.0, 2.0, 3.0),
        );
        let t = SpaceTransforms::new(DMat4::IDENTITY, locator);
        let params = NoiseParameters::new()
            .with_amplitude(DVec3::new(0.5, 1.0, 2.0))
            .with_octaves(4);
        let out = displace_point(&Simplex, &params, &t, 0.8 * 0.5, DVec3::new(1.6, -1.4, 8.0));
        let expected = DVec3::new(1.9556279711506173, -1.6221232530240854, 6.913546768420561);
        assert!(close(out, expected, 1e-9), "got {out:?}");
    }

    #[test]
    fn gate_scales_displacement_linearly() {
        let params = NoiseParameters::new().with_octaves(2);
        let p = DVec3::new(-3.1, 0.45, 7.9);
        let full = displacement(&Simplex, &params, p, 1.0);
        let half = displacement(&Simplex, &params, p, 0.5);
        assert!(close(half * 2.0, full, 1e-15));
    }

    #[test]
    fn offset_scrolls_the_field() {
        let p = DVec3::new(0.3, -1.7, 2.5);
        let shifted = NoiseParameters::new().with_offset(DVec3::new(1.0, 0.0, 0.0));
        let plain = NoiseParameters::new();
        let a = displacement(&Simplex, &shifted, p + DVec3::X, 1.0);
        let b = displacement(&Simplex, &plain, p, 1.0);
        assert!(close(a, b, 1e-12));
    }
}
