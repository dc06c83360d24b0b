//! Directional ground slope from four-point central differences

use serde::{Deserialize, Serialize};

use super::terrain::Elevation;
use crate::consts::SLOPE_SAMPLE_DISTANCE;

/// Samples terrain around a point to find the slope along a heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeSampler {
    /// Offset of the front/back/left/right samples
    pub sample_distance: f32,
}

impl Default for SlopeSampler {
    fn default() -> Self {
        Self {
            sample_distance: SLOPE_SAMPLE_DISTANCE,
        }
    }
}

impl SlopeSampler {
    pub fn new(sample_distance: f32) -> Self {
        Self { sample_distance }
    }

    /// Rise per unit distance when travelling along `heading` from (x, z).
    ///
    /// Negative is downhill, positive uphill. Heading 0 travels toward -Z.
    pub fn slope<E: Elevation + ?Sized>(&self, terrain: &E, x: f32, z: f32, heading: f32) -> f32 {
        let d = self.sample_distance;
        let front = terrain.height(x, z - d);
        let back = terrain.height(x, z + d);
        let left = terrain.height(x - d, z);
        let right = terrain.height(x + d, z);

        // Rise toward -Z and toward +X
        let rise_forward = (front - back) / (2.0 * d);
        let rise_right = (right - left) / (2.0 * d);

        // Travel direction is (-sin h, -cos h) in (x, z)
        rise_forward * heading.cos() - rise_right * heading.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::{Heightfield, TerrainProfile};
    use std::f32::consts::{FRAC_PI_2, PI};

    /// Tilted plane: h = gx * x + gz * z
    struct Plane {
        gx: f32,
        gz: f32,
    }

    impl Elevation for Plane {
        fn height(&self, x: f32, z: f32) -> f32 {
            self.gx * x + self.gz * z
        }
    }

    #[test]
    fn test_flat_ground_has_no_slope() {
        let field = Heightfield::generate(100.0, 32, TerrainProfile::FLAT);
        let sampler = SlopeSampler::default();
        for heading in [0.0, 1.0, -2.5, PI] {
            assert_eq!(sampler.slope(&field, 5.0, -3.0, heading), 0.0);
        }
    }

    #[test]
    fn test_descending_toward_negative_z_is_downhill_at_heading_zero() {
        // Elevation rises with z, so the -Z-facing vehicle drives downhill
        let plane = Plane { gx: 0.0, gz: 0.5 };
        let slope = SlopeSampler::default().slope(&plane, 0.0, 0.0, 0.0);
        assert!(slope < 0.0);
        assert!((slope + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_reversing_heading_flips_sign() {
        let plane = Plane { gx: 0.0, gz: 0.5 };
        let sampler = SlopeSampler::default();
        let ahead = sampler.slope(&plane, 3.0, 4.0, 0.0);
        let behind = sampler.slope(&plane, 3.0, 4.0, PI);
        assert!((ahead + behind).abs() < 1e-5);
        assert!(behind > 0.0);
    }

    #[test]
    fn test_matches_directional_derivative() {
        let plane = Plane { gx: -0.3, gz: 0.2 };
        let sampler = SlopeSampler::new(0.5);
        for heading in [0.0, FRAC_PI_2, -FRAC_PI_2, 0.7, 2.9, -1.3] {
            let expected = plane.gx * -heading.sin() + plane.gz * -heading.cos();
            let got = sampler.slope(&plane, 1.0, 1.0, heading);
            assert!(
                (got - expected).abs() < 1e-4,
                "heading {heading}: got {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_turning_left_faces_negative_x() {
        // Elevation falls toward -X; heading π/2 travels toward -X
        let plane = Plane { gx: 1.0, gz: 0.0 };
        let slope = SlopeSampler::default().slope(&plane, 0.0, 0.0, FRAC_PI_2);
        assert!((slope + 1.0).abs() < 1e-5);
    }
}
