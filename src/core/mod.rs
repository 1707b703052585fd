//! Core data structures for generated terrain
//! Contains voxel codes and chunk storage.

pub mod block;
pub mod chunk;

// Re-export commonly used types
pub use block::VoxelKind;
pub use chunk::{Chunk, ChunkAccess, WorldOffset};
