//! Terrain density field
//!
//! Combines three noise handles into a single scalar per world position.
//! Larger values are more solid; the field thins out with height.

use crate::world::noise::{NoiseSource, PerlinSource};

/// Relative frequencies of the mountain octaves.
const MOUNTAIN_FREQUENCIES: [f32; 6] = [256.038729, 128.37821, 92.313, 48.96, 24.48, 1.0];
/// Weights of the mountain octaves.
const MOUNTAIN_WEIGHTS: [f32; 6] = [0.075, 0.125, 0.25, 0.5, 0.75, 1.0];

/// Samples the terrain density field from three independent noise handles.
pub struct DensityFieldSampler<N: NoiseSource = PerlinSource> {
    gen1: N,
    gen2: N,
    gen3: N,
}

impl DensityFieldSampler<PerlinSource> {
    /// Seed the three handles from `seed`, `seed + 1` and `seed + 2`.
    pub fn from_seed(seed: u32) -> Self {
        DensityFieldSampler::new(
            PerlinSource::new(seed),
            PerlinSource::new(seed.wrapping_add(1)),
            PerlinSource::new(seed.wrapping_add(2)),
        )
    }
}

impl<N: NoiseSource> DensityFieldSampler<N> {
    pub fn new(gen1: N, gen2: N, gen3: N) -> Self {
        DensityFieldSampler { gen1, gen2, gen3 }
    }

    /// Density at a world position. `y` is used as-is (no offset
    /// normalization), so the `(y + 1)` falloff is a world-height falloff.
    pub fn density(&self, x: f32, y: f32, z: f32) -> f32 {
        let height = (self.terrain_elevation(x, z) + self.lake_intensity(x, z) * 0.3) * 0.3
            + self.terrain_roughness(x, z) * 0.2
            + self.terrain_detail(x, z) * 0.2;

        let density = height + self.mountain_density(x, y, z);
        density / ((y + 1.0) * 1.7)
    }

    /// Base elevation in `[0, 1]`.
    pub fn terrain_elevation(&self, x: f32, z: f32) -> f32 {
        (self.gen1.noise(0.001 * x, 0.001, 0.001 * z) + 1.0) / 2.0
    }

    pub fn terrain_roughness(&self, x: f32, z: f32) -> f32 {
        self.gen2
            .multi_fractal_noise(0.0004 * x, 0.0004, 0.0004 * z, 16, 2.151421)
    }

    pub fn terrain_detail(&self, x: f32, z: f32) -> f32 {
        self.gen3
            .ridged_multi_fractal_noise(0.002 * x, 0.002, 0.002 * z, 8, 2.2631, 2.0, 0.8)
    }

    pub fn lake_intensity(&self, x: f32, z: f32) -> f32 {
        self.gen3
            .multi_fractal_noise(0.01 * x, 0.01, 0.01 * z, 3, 1.9836171)
            .abs()
            .sqrt()
    }

    /// Turbulence-warped sum of six octaves of the second handle.
    pub fn mountain_density(&self, x: f32, y: f32, z: f32) -> f32 {
        let turb = self.gen3.noise(x * 0.1, y * 0.1, z * 0.1) * 2.0;
        let x = (x + turb) * 0.0004;
        let y = (y + turb) * 0.0005;
        let z = (z + turb) * 0.0004;

        MOUNTAIN_FREQUENCIES
            .iter()
            .zip(MOUNTAIN_WEIGHTS.iter())
            .map(|(f, w)| self.gen2.noise(x * f, y * f, z * f) * w)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f32);

    impl NoiseSource for Constant {
        fn noise(&self, _x: f32, _y: f32, _z: f32) -> f32 {
            self.0
        }
    }

    fn constant_sampler(value: f32) -> DensityFieldSampler<Constant> {
        DensityFieldSampler::new(Constant(value), Constant(value), Constant(value))
    }

    #[test]
    fn test_zero_noise_components() {
        let sampler = constant_sampler(0.0);
        assert_eq!(sampler.terrain_elevation(10.0, 20.0), 0.5);
        assert_eq!(sampler.terrain_roughness(10.0, 20.0), 0.0);
        assert_eq!(sampler.lake_intensity(10.0, 20.0), 0.0);
        assert_eq!(sampler.mountain_density(1.0, 2.0, 3.0), 0.0);
    }

    #[test]
    fn test_mountain_weights_sum() {
        let sampler = constant_sampler(1.0);
        let expected: f32 = MOUNTAIN_WEIGHTS.iter().sum();
        assert!((sampler.mountain_density(5.0, 6.0, 7.0) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_height_falloff() {
        let sampler = constant_sampler(0.0);
        // Only elevation and detail contribute with zero noise.
        let detail = sampler.terrain_detail(0.0, 0.0);
        let height = 0.5 * 0.3 + detail * 0.2;
        for y in [0.0f32, 1.0, 15.0, 127.0] {
            let expected = height / ((y + 1.0) * 1.7);
            assert!((sampler.density(0.0, y, 0.0) - expected).abs() < 1e-6);
        }
        assert!(sampler.density(0.0, 0.0, 0.0) > sampler.density(0.0, 64.0, 0.0));
    }

    #[test]
    fn test_negative_noise_keeps_density_below_surface_band() {
        let sampler = constant_sampler(-1.0);
        for y in 0..128 {
            assert!(sampler.density(3.0, y as f32, -9.0) < 0.0);
        }
    }

    #[test]
    fn test_perlin_density_is_deterministic() {
        let a = DensityFieldSampler::from_seed(2137);
        let b = DensityFieldSampler::from_seed(2137);
        for i in 0..32 {
            let p = i as f32 * 13.0;
            assert_eq!(a.density(p, i as f32, -p), b.density(p, i as f32, -p));
        }
    }
}
