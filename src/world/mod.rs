//! World generation modules
//! Contains noise sources, the density pipeline, generators and the loader.

pub mod density;
pub mod generator;
pub mod loader;
pub mod materialize;
pub mod noise;
pub mod upsample;

// Re-export commonly used types
pub use density::DensityFieldSampler;
pub use generator::{ChunkGenerator, FlatGenerator, TerrainGenerator};
pub use loader::{ChunkGenResult, ChunkLoader, ChunkPos};
pub use materialize::{ColumnMaterializer, tailpiece, type_for};
pub use noise::{NoiseSource, PerlinSource};
pub use upsample::DensityMap;
