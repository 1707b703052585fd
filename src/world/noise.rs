//! Seeded, stateless noise primitives
//!
//! The density sampler only relies on [`NoiseSource::noise`]; the fractal
//! sums are derived from it so any backend gets them for free.

use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Spectral exponent for the fractal sums. Octave `i` is weighted by
/// `lacunarity^(-H * i)`.
pub const SPECTRAL_EXPONENT: f32 = 0.9;

/// Deterministic 3D noise. Implementations must be pure: the same seed and
/// coordinate always give the same value, with no memory of earlier calls.
pub trait NoiseSource: Send + Sync {
    /// Base noise in `[-1, 1]`.
    fn noise(&self, x: f32, y: f32, z: f32) -> f32;

    /// Weighted sum of `octaves` octaves of [`NoiseSource::noise`], the
    /// frequency growing by `lacunarity` each octave.
    fn multi_fractal_noise(&self, x: f32, y: f32, z: f32, octaves: u32, lacunarity: f32) -> f32 {
        let (mut x, mut y, mut z) = (x, y, z);
        let step = lacunarity.powf(-SPECTRAL_EXPONENT);
        let mut weight = 1.0;
        let mut result = 0.0;

        for _ in 0..octaves {
            result += self.noise(x, y, z) * weight;
            weight *= step;
            x *= lacunarity;
            y *= lacunarity;
            z *= lacunarity;
        }

        result
    }

    /// Ridged multifractal: each octave is folded through `offset - |n|` and
    /// squared, then damped by the previous octave's signal times `gain`.
    fn ridged_multi_fractal_noise(
        &self,
        x: f32,
        y: f32,
        z: f32,
        octaves: u32,
        lacunarity: f32,
        gain: f32,
        offset: f32,
    ) -> f32 {
        if octaves == 0 {
            return 0.0;
        }

        let (mut x, mut y, mut z) = (x, y, z);
        let step = lacunarity.powf(-SPECTRAL_EXPONENT);

        let mut signal = offset - self.noise(x, y, z).abs();
        signal *= signal;
        let mut result = signal;
        let mut spectral = 1.0;

        for _ in 1..octaves {
            x *= lacunarity;
            y *= lacunarity;
            z *= lacunarity;
            spectral *= step;

            let weight = (signal * gain).clamp(0.0, 1.0);
            signal = offset - self.noise(x, y, z).abs();
            signal *= signal;
            signal *= weight;
            result += signal * spectral;
        }

        result
    }
}

/// Perlin noise backed by FastNoiseLite. Frequency is fixed at 1.0 so callers
/// control scale through the coordinates they pass.
pub struct PerlinSource {
    noise: FastNoiseLite,
}

impl PerlinSource {
    pub fn new(seed: u32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(1.0));
        PerlinSource { noise }
    }
}

impl NoiseSource for PerlinSource {
    #[inline]
    fn noise(&self, x: f32, y: f32, z: f32) -> f32 {
        self.noise.get_noise_3d(x, y, z)
    }
}
