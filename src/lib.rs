// Core module with voxel codes and chunk storage
pub mod core;

// World module with the density pipeline and generators
pub mod world;

// Other modules
pub mod config;
pub mod constants;
pub mod error;
pub mod save;
pub mod utils;

// Re-exports
pub use config::{ChunkDimensions, GeneratorConfig, WorldSeed};
pub use constants::*;
pub use crate::core::{Chunk, ChunkAccess, VoxelKind, WorldOffset};
pub use error::{ConfigError, LoaderError, SaveError, SettingsError};
pub use save::{DEFAULT_REGION_FILE, SavedChunk, SavedRegion, load_region, save_region};
pub use utils::settings::{GeneratorSettings, load_settings, save_settings};
pub use world::{
    ChunkGenResult, ChunkGenerator, ChunkLoader, ChunkPos, DensityFieldSampler, FlatGenerator,
    NoiseSource, PerlinSource, TerrainGenerator,
};
