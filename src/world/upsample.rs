//! Sparse density grid and its trilinear reconstruction

use crate::config::ChunkDimensions;
use crate::constants::{SAMPLE_RATE_HOR, SAMPLE_RATE_VERT};

/// Per-call density scratch buffer, one larger than the chunk on every axis
/// so the far corners of the last cells exist.
pub struct DensityMap {
    size_x: usize,
    size_y: usize,
    size_z: usize,
    values: Vec<f32>,
}

impl DensityMap {
    pub fn new(dims: ChunkDimensions) -> Self {
        let (size_x, size_y, size_z) = (
            dims.x as usize + 1,
            dims.y as usize + 1,
            dims.z as usize + 1,
        );
        DensityMap {
            size_x,
            size_y,
            size_z,
            values: vec![0.0; size_x * size_y * size_z],
        }
    }

    /// Buffer extent on each axis.
    pub fn size(&self) -> (usize, usize, usize) {
        (self.size_x, self.size_y, self.size_z)
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.size_x && y < self.size_y && z < self.size_z);
        (x * self.size_y + y) * self.size_z + z
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.values[self.index(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: f32) {
        let i = self.index(x, y, z);
        self.values[i] = value;
    }

    /// Fill every sample point (multiples of the strides, far faces included)
    /// from `sample(x, y, z)` in local coordinates.
    pub fn fill_samples<F>(&mut self, mut sample: F)
    where
        F: FnMut(usize, usize, usize) -> f32,
    {
        let (hor, vert) = (SAMPLE_RATE_HOR as usize, SAMPLE_RATE_VERT as usize);
        for x in (0..self.size_x).step_by(hor) {
            for z in (0..self.size_z).step_by(hor) {
                for y in (0..self.size_y).step_by(vert) {
                    let value = sample(x, y, z);
                    self.set(x, y, z, value);
                }
            }
        }
    }

    /// Interpolate every non-sample point that lies inside the chunk.
    pub fn upsample(&mut self) {
        let (hor, vert) = (SAMPLE_RATE_HOR as usize, SAMPLE_RATE_VERT as usize);
        for x in 0..self.size_x - 1 {
            for y in 0..self.size_y - 1 {
                for z in 0..self.size_z - 1 {
                    if is_sample_point(x, y, z) {
                        continue;
                    }

                    let x0 = (x / hor) * hor;
                    let y0 = (y / vert) * vert;
                    let z0 = (z / hor) * hor;
                    let (x1, y1, z1) = (x0 + hor, y0 + vert, z0 + hor);

                    let corners = [
                        self.get(x0, y0, z0),
                        self.get(x1, y0, z0),
                        self.get(x0, y1, z0),
                        self.get(x1, y1, z0),
                        self.get(x0, y0, z1),
                        self.get(x1, y0, z1),
                        self.get(x0, y1, z1),
                        self.get(x1, y1, z1),
                    ];

                    let tx = (x - x0) as f32 / hor as f32;
                    let ty = (y - y0) as f32 / vert as f32;
                    let tz = (z - z0) as f32 / hor as f32;

                    let value = tri_lerp(tx, ty, tz, corners);
                    self.set(x, y, z, value);
                }
            }
        }
    }
}

#[inline]
pub fn is_sample_point(x: usize, y: usize, z: usize) -> bool {
    x % SAMPLE_RATE_HOR as usize == 0
        && y % SAMPLE_RATE_VERT as usize == 0
        && z % SAMPLE_RATE_HOR as usize == 0
}

#[inline]
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Trilinear blend of a cell's corners, lerping along x, then y, then z.
///
/// Corner order is `c[x + 2y + 4z]` for the bit pattern of each corner.
#[inline]
pub fn tri_lerp(tx: f32, ty: f32, tz: f32, c: [f32; 8]) -> f32 {
    let x00 = lerp(tx, c[0], c[1]);
    let x10 = lerp(tx, c[2], c[3]);
    let x01 = lerp(tx, c[4], c[5]);
    let x11 = lerp(tx, c[6], c[7]);

    let y0 = lerp(ty, x00, x10);
    let y1 = lerp(ty, x01, x11);

    lerp(tz, y0, y1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_form(tx: f32, ty: f32, tz: f32, c: [f32; 8]) -> f32 {
        let mut sum = 0.0;
        for (i, value) in c.iter().enumerate() {
            let wx = if i & 1 == 0 { 1.0 - tx } else { tx };
            let wy = if i & 2 == 0 { 1.0 - ty } else { ty };
            let wz = if i & 4 == 0 { 1.0 - tz } else { tz };
            sum += value * wx * wy * wz;
        }
        sum
    }

    fn sample_fn(x: usize, y: usize, z: usize) -> f32 {
        ((x * 31 + y * 17 + z * 7) % 23) as f32 * 0.01 - 0.1
    }

    #[test]
    fn test_tri_lerp_matches_closed_form() {
        let c = [0.3, -0.2, 1.5, 0.0, 0.7, 0.25, -1.0, 2.0];
        for &(tx, ty, tz) in &[
            (0.0, 0.0, 0.0),
            (0.5, 0.5, 0.5),
            (0.125, 0.75, 0.875),
            (1.0, 0.25, 0.0),
        ] {
            let a = tri_lerp(tx, ty, tz, c);
            let b = closed_form(tx, ty, tz, c);
            assert!((a - b).abs() < 1e-5, "{a} != {b}");
        }
    }

    #[test]
    fn test_tri_lerp_corners() {
        let c = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(tri_lerp(0.0, 0.0, 0.0, c), 1.0);
        assert_eq!(tri_lerp(1.0, 0.0, 0.0, c), 2.0);
        assert_eq!(tri_lerp(0.0, 1.0, 0.0, c), 3.0);
        assert_eq!(tri_lerp(0.0, 0.0, 1.0, c), 5.0);
        assert_eq!(tri_lerp(1.0, 1.0, 1.0, c), 8.0);
    }

    #[test]
    fn test_buffer_is_one_larger() {
        let map = DensityMap::new(ChunkDimensions::new(16, 128, 16));
        assert_eq!(map.size(), (17, 129, 17));
    }

    #[test]
    fn test_sample_points_are_exact_after_upsampling() {
        let mut map = DensityMap::new(ChunkDimensions::new(16, 128, 16));
        map.fill_samples(sample_fn);
        map.upsample();

        let (sx, sy, sz) = map.size();
        for x in (0..sx).step_by(8) {
            for y in (0..sy).step_by(4) {
                for z in (0..sz).step_by(8) {
                    assert_eq!(map.get(x, y, z), sample_fn(x, y, z));
                }
            }
        }
    }

    #[test]
    fn test_linear_field_is_reproduced() {
        let field = |x: usize, y: usize, z: usize| x as f32 * 0.5 - y as f32 * 0.25 + z as f32;
        let mut map = DensityMap::new(ChunkDimensions::new(16, 32, 8));
        map.fill_samples(field);
        map.upsample();

        for x in 0..16 {
            for y in 0..32 {
                for z in 0..8 {
                    assert!((map.get(x, y, z) - field(x, y, z)).abs() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_interior_point_uses_enclosing_cell() {
        let mut map = DensityMap::new(ChunkDimensions::new(8, 4, 8));
        map.fill_samples(|x, _, _| if x == 8 { 1.0 } else { 0.0 });
        map.upsample();
        assert!((map.get(2, 1, 3) - 0.25).abs() < 1e-6);
        assert!((map.get(6, 3, 7) - 0.75).abs() < 1e-6);
    }
}
