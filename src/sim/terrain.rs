//! Rolling-hill terrain: closed-form elevation and the sampled height grid
//!
//! The grid is built once and never mutated. Lookups inside the terrain
//! extent snap to the grid cell the point falls into; everything else
//! (points beyond the edge, cells no vertex landed in) evaluates the same
//! closed form the grid was sampled from, so `height` is total.

use serde::{Deserialize, Serialize};

use crate::tuning::TerrainTuning;

/// Anything that can report ground elevation at a world (x, z)
pub trait Elevation {
    fn height(&self, x: f32, z: f32) -> f32;
}

/// Closed-form hill shape: `sin(x * freq_x) * amp_x + cos(z * freq_z) * amp_z`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainProfile {
    pub freq_x: f32,
    pub amp_x: f32,
    pub freq_z: f32,
    pub amp_z: f32,
}

impl TerrainProfile {
    /// A profile with no relief at all
    pub const FLAT: Self = Self {
        freq_x: 0.0,
        amp_x: 0.0,
        freq_z: 0.0,
        amp_z: 0.0,
    };

    #[inline]
    pub fn elevation(&self, x: f32, z: f32) -> f32 {
        (x * self.freq_x).sin() * self.amp_x + (z * self.freq_z).cos() * self.amp_z
    }
}

impl From<&TerrainTuning> for TerrainProfile {
    fn from(t: &TerrainTuning) -> Self {
        Self {
            freq_x: t.freq_x,
            amp_x: t.amp_x,
            freq_z: t.freq_z,
            amp_z: t.amp_z,
        }
    }
}

impl Elevation for TerrainProfile {
    fn height(&self, x: f32, z: f32) -> f32 {
        self.elevation(x, z)
    }
}

/// Square height grid centred on the origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heightfield {
    size: f32,
    resolution: u32,
    profile: TerrainProfile,
    /// Row-major by z: `cells[gz * resolution + gx]`
    cells: Vec<Option<f32>>,
}

impl Heightfield {
    /// Sample `profile` at every vertex of a `resolution`² grid spanning
    /// `[-size/2, size/2]` on both axes.
    ///
    /// `resolution` below 2 is raised to 2 (a single vertex has no extent).
    pub fn generate(size: f32, resolution: u32, profile: TerrainProfile) -> Self {
        let resolution = resolution.max(2);
        let n = resolution as usize;
        let mut field = Self {
            size,
            resolution,
            profile,
            cells: vec![None; n * n],
        };

        let half = size / 2.0;
        let step = size / (resolution - 1) as f32;
        for j in 0..n {
            let z = -half + j as f32 * step;
            for i in 0..n {
                let x = -half + i as f32 * step;
                // Bucket each vertex through the query mapping so lookups
                // land on exactly what generation wrote.
                let gx = field.cell_index(x);
                let gz = field.cell_index(z);
                field.cells[gz * n + gx] = Some(profile.elevation(x, z));
            }
        }

        let filled = field.cells.iter().filter(|c| c.is_some()).count();
        log::debug!(
            "Heightfield {}x{} over {} units: {} of {} cells sampled",
            resolution,
            resolution,
            size,
            filled,
            n * n
        );
        field
    }

    pub fn from_tuning(tuning: &TerrainTuning) -> Self {
        Self::generate(tuning.size, tuning.resolution, TerrainProfile::from(tuning))
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    #[inline]
    pub fn profile(&self) -> &TerrainProfile {
        &self.profile
    }

    /// Whether (x, z) lies within the gridded extent (edges included)
    #[inline]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let half = self.size / 2.0;
        (-half..=half).contains(&x) && (-half..=half).contains(&z)
    }

    /// Floor-bucket one world coordinate into a grid index, clamped to the grid
    pub fn cell_index(&self, coord: f32) -> usize {
        let max = (self.resolution - 1) as f32;
        let t = ((coord + self.size / 2.0) / self.size) * max;
        t.floor().clamp(0.0, max) as usize
    }

    /// Raw grid sample, `None` if out of bounds or never populated
    pub fn sample(&self, gx: usize, gz: usize) -> Option<f32> {
        let n = self.resolution as usize;
        if gx >= n || gz >= n {
            return None;
        }
        self.cells[gz * n + gx]
    }

    /// Ground elevation at world (x, z). Total: never fails.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        if !self.contains(x, z) {
            return self.profile.elevation(x, z);
        }
        self.sample(self.cell_index(x), self.cell_index(z))
            .unwrap_or_else(|| self.profile.elevation(x, z))
    }
}

impl Elevation for Heightfield {
    fn height(&self, x: f32, z: f32) -> f32 {
        Heightfield::height(self, x, z)
    }
}

impl<E: Elevation + ?Sized> Elevation for &E {
    fn height(&self, x: f32, z: f32) -> f32 {
        (**self).height(x, z)
    }
}
