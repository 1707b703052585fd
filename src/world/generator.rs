//! Thread-safe chunk generators
//!
//! Generators are immutable after construction and can be shared between
//! worker threads. Each call to [`TerrainGenerator::generate`] only touches
//! its own scratch buffers and the chunk it was handed.

use std::time::Instant;

use crate::config::GeneratorConfig;
use crate::constants::*;
use crate::core::block::VoxelKind;
use crate::core::chunk::ChunkAccess;
use crate::error::ConfigError;
use crate::world::density::DensityFieldSampler;
use crate::world::materialize::ColumnMaterializer;
use crate::world::noise::{NoiseSource, PerlinSource};
use crate::world::upsample::DensityMap;

/// Something that fills a chunk with terrain.
pub trait TerrainGenerator: Send + Sync {
    fn config(&self) -> &GeneratorConfig;

    fn generate(&self, chunk: &mut dyn ChunkAccess);
}

/// Density-field terrain: sparse noise sampling, trilinear upsampling, then
/// column materialization.
pub struct ChunkGenerator<N: NoiseSource = PerlinSource> {
    config: GeneratorConfig,
    sampler: DensityFieldSampler<N>,
}

impl ChunkGenerator<PerlinSource> {
    /// Create a generator with Perlin noise seeded from the config.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        let seed = config.seed;
        ChunkGenerator::with_sources(
            config,
            PerlinSource::new(seed.derive(0)),
            PerlinSource::new(seed.derive(1)),
            PerlinSource::new(seed.derive(2)),
        )
    }
}

impl<N: NoiseSource> ChunkGenerator<N> {
    /// Create a generator from three injected noise handles.
    pub fn with_sources(
        config: GeneratorConfig,
        gen1: N,
        gen2: N,
        gen3: N,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(ChunkGenerator {
            config,
            sampler: DensityFieldSampler::new(gen1, gen2, gen3),
        })
    }

    pub fn sampler(&self) -> &DensityFieldSampler<N> {
        &self.sampler
    }

    /// Sample the density field at every stride point of the chunk and
    /// interpolate the rest.
    pub fn density_map(&self, chunk: &dyn ChunkAccess) -> DensityMap {
        let offset = chunk.offset();
        let mut map = DensityMap::new(self.config.dimensions);

        map.fill_samples(|x, y, z| {
            self.sampler.density(
                (x as i32 + offset.x) as f32,
                (y as i32 + offset.y) as f32,
                (z as i32 + offset.z) as f32,
            )
        });
        map.upsample();

        map
    }
}

impl<N: NoiseSource> TerrainGenerator for ChunkGenerator<N> {
    fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn generate(&self, chunk: &mut dyn ChunkAccess) {
        debug_assert_eq!(chunk.dimensions(), self.config.dimensions);
        let start = Instant::now();

        let density = self.density_map(chunk);
        ColumnMaterializer::materialize(&density, chunk);

        let offset = chunk.offset();
        tracing::debug!(
            "Generated terrain chunk at ({}, {}, {}) in {:?}",
            offset.x,
            offset.y,
            offset.z,
            start.elapsed()
        );
    }
}

/// Flat world: bedrock floor, rock, a few layers of dirt and a grass top.
pub struct FlatGenerator {
    config: GeneratorConfig,
    surface_y: i32,
}

impl FlatGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_surface(config, FLAT_SURFACE_Y)
    }

    pub fn with_surface(config: GeneratorConfig, surface_y: i32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(FlatGenerator { config, surface_y })
    }

    fn kind_at(&self, world_y: i32) -> VoxelKind {
        if world_y == 0 {
            VoxelKind::BEDROCK
        } else if world_y < 0 || world_y > self.surface_y {
            VoxelKind::AIR
        } else if world_y == self.surface_y {
            VoxelKind::GRASS
        } else if world_y > self.surface_y - FLAT_DIRT_DEPTH - 1 {
            VoxelKind::DIRT
        } else {
            VoxelKind::ROCK
        }
    }
}

impl TerrainGenerator for FlatGenerator {
    fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn generate(&self, chunk: &mut dyn ChunkAccess) {
        let dims = chunk.dimensions();
        let offset = chunk.offset();

        for y in 0..dims.y {
            let kind = self.kind_at(y as i32 + offset.y);
            if kind.is_air() {
                continue;
            }
            for x in 0..dims.x {
                for z in 0..dims.z {
                    chunk.set_voxel(x, y, z, kind);
                }
            }
        }

        tracing::debug!(
            "Generated flat chunk at ({}, {}, {})",
            offset.x,
            offset.y,
            offset.z
        );
    }
}
