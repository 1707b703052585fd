//! Immutable generator configuration
//!
//! Chunk shape and world seed are fixed when a generator is built and are
//! validated once here, never per chunk.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ChunkDimensions {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl ChunkDimensions {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        ChunkDimensions { x, y, z }
    }

    pub fn volume(&self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Check the chunk shape against the density sample strides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value, stride) in [
            ('x', self.x, SAMPLE_RATE_HOR),
            ('y', self.y, SAMPLE_RATE_VERT),
            ('z', self.z, SAMPLE_RATE_HOR),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension { axis });
            }
            if value % stride != 0 {
                return Err(ConfigError::NotDivisible {
                    axis,
                    value,
                    stride,
                });
            }
        }
        Ok(())
    }
}

impl Default for ChunkDimensions {
    fn default() -> Self {
        ChunkDimensions::new(DEFAULT_CHUNK_WIDTH, DEFAULT_CHUNK_HEIGHT, DEFAULT_CHUNK_WIDTH)
    }
}

/// World seed. Parsed from text: plain integers are used directly, anything
/// else is hashed so worlds can be named.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldSeed(pub u32);

impl WorldSeed {
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        match text.parse::<u32>() {
            Ok(value) => WorldSeed(value),
            Err(_) => WorldSeed(fnv1a(text.as_bytes())),
        }
    }

    /// Seed for the `index`-th noise handle.
    pub fn derive(self, index: u32) -> u32 {
        self.0.wrapping_add(index)
    }
}

impl FromStr for WorldSeed {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WorldSeed::from_text(s))
    }
}

impl fmt::Display for WorldSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for &b in bytes {
        hash ^= b as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub seed: WorldSeed,
    pub dimensions: ChunkDimensions,
}

impl GeneratorConfig {
    pub fn new(seed: WorldSeed, dimensions: ChunkDimensions) -> Self {
        GeneratorConfig { seed, dimensions }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dimensions.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions_are_valid() {
        assert_eq!(ChunkDimensions::default(), ChunkDimensions::new(16, 128, 16));
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_divisible_dimensions() {
        assert_eq!(
            ChunkDimensions::new(12, 128, 16).validate(),
            Err(ConfigError::NotDivisible {
                axis: 'x',
                value: 12,
                stride: 8
            })
        );
        assert_eq!(
            ChunkDimensions::new(16, 126, 16).validate(),
            Err(ConfigError::NotDivisible {
                axis: 'y',
                value: 126,
                stride: 4
            })
        );
        assert_eq!(
            ChunkDimensions::new(16, 128, 20).validate(),
            Err(ConfigError::NotDivisible {
                axis: 'z',
                value: 20,
                stride: 8
            })
        );
    }

    #[test]
    fn test_rejects_zero_dimension() {
        assert_eq!(
            ChunkDimensions::new(16, 0, 16).validate(),
            Err(ConfigError::ZeroDimension { axis: 'y' })
        );
    }

    #[test]
    fn test_seed_parsing() {
        assert_eq!(WorldSeed::from_text("2137"), WorldSeed(2137));
        assert_eq!(WorldSeed::from_text(" 42 "), WorldSeed(42));
        let named = WorldSeed::from_text("blockmania");
        assert_eq!(named, WorldSeed::from_text("blockmania"));
        assert_ne!(named, WorldSeed::from_text("blockmanib"));
        assert_eq!(WorldSeed(u32::MAX).derive(1), 0);
    }
}
