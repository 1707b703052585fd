use serde::{Deserialize, Serialize};

use crate::config::ChunkDimensions;
use crate::core::block::VoxelKind;

/// World-space coordinate of a chunk's local origin.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct WorldOffset {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl WorldOffset {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        WorldOffset { x, y, z }
    }

    /// Offset of the chunk at grid coordinates `(cx, cy, cz)`.
    pub fn of_chunk(cx: i32, cy: i32, cz: i32, dims: ChunkDimensions) -> Self {
        WorldOffset {
            x: cx * dims.x as i32,
            y: cy * dims.y as i32,
            z: cz * dims.z as i32,
        }
    }
}

/// What a generator needs from chunk storage: its shape, where it sits in the
/// world, and a way to write a voxel.
pub trait ChunkAccess {
    fn dimensions(&self) -> ChunkDimensions;
    fn offset(&self) -> WorldOffset;
    fn set_voxel(&mut self, x: u32, y: u32, z: u32, kind: VoxelKind);
}

/// Dense voxel storage for one chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    dims: ChunkDimensions,
    offset: WorldOffset,
    voxels: Vec<VoxelKind>,
}

impl Chunk {
    pub fn new(dims: ChunkDimensions, offset: WorldOffset) -> Self {
        Chunk {
            dims,
            offset,
            voxels: vec![VoxelKind::AIR; dims.volume()],
        }
    }

    /// Rebuild a chunk from stored voxels. Returns `None` when the voxel count
    /// does not match the dimensions.
    pub fn from_voxels(
        dims: ChunkDimensions,
        offset: WorldOffset,
        voxels: Vec<VoxelKind>,
    ) -> Option<Self> {
        if voxels.len() != dims.volume() {
            return None;
        }
        Some(Chunk {
            dims,
            offset,
            voxels,
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32, z: u32) -> Option<usize> {
        if x < self.dims.x && y < self.dims.y && z < self.dims.z {
            let (dy, dz) = (self.dims.y as usize, self.dims.z as usize);
            Some((x as usize * dy + y as usize) * dz + z as usize)
        } else {
            None
        }
    }

    pub fn get_voxel(&self, x: u32, y: u32, z: u32) -> VoxelKind {
        match self.index(x, y, z) {
            Some(i) => self.voxels[i],
            None => VoxelKind::AIR,
        }
    }

    pub fn voxels(&self) -> &[VoxelKind] {
        &self.voxels
    }

    /// Number of voxels holding `kind`.
    pub fn count_of(&self, kind: VoxelKind) -> usize {
        self.voxels.iter().filter(|v| **v == kind).count()
    }
}

impl ChunkAccess for Chunk {
    fn dimensions(&self) -> ChunkDimensions {
        self.dims
    }

    fn offset(&self) -> WorldOffset {
        self.offset
    }

    fn set_voxel(&mut self, x: u32, y: u32, z: u32, kind: VoxelKind) {
        if let Some(i) = self.index(x, y, z) {
            self.voxels[i] = kind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_is_air() {
        let chunk = Chunk::new(ChunkDimensions::new(8, 4, 8), WorldOffset::default());
        assert_eq!(chunk.voxels().len(), 256);
        assert_eq!(chunk.count_of(VoxelKind::AIR), 256);
    }

    #[test]
    fn test_set_and_get_voxel() {
        let mut chunk = Chunk::new(ChunkDimensions::new(8, 4, 8), WorldOffset::default());
        chunk.set_voxel(7, 3, 7, VoxelKind::SAND);
        chunk.set_voxel(0, 1, 2, VoxelKind::ROCK);
        assert_eq!(chunk.get_voxel(7, 3, 7), VoxelKind::SAND);
        assert_eq!(chunk.get_voxel(0, 1, 2), VoxelKind::ROCK);
        assert_eq!(chunk.get_voxel(0, 2, 1), VoxelKind::AIR);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut chunk = Chunk::new(ChunkDimensions::new(8, 4, 8), WorldOffset::default());
        chunk.set_voxel(8, 0, 0, VoxelKind::ROCK);
        chunk.set_voxel(0, 4, 0, VoxelKind::ROCK);
        assert_eq!(chunk.count_of(VoxelKind::ROCK), 0);
        assert_eq!(chunk.get_voxel(0, 0, 8), VoxelKind::AIR);
    }

    #[test]
    fn test_offset_of_chunk() {
        let dims = ChunkDimensions::new(16, 128, 16);
        assert_eq!(
            WorldOffset::of_chunk(-2, 0, 3, dims),
            WorldOffset::new(-32, 0, 48)
        );
    }

    #[test]
    fn test_from_voxels_checks_length() {
        let dims = ChunkDimensions::new(8, 4, 8);
        assert!(Chunk::from_voxels(dims, WorldOffset::default(), vec![VoxelKind::AIR; 3]).is_none());
        assert!(
            Chunk::from_voxels(dims, WorldOffset::default(), vec![VoxelKind::ROCK; 256]).is_some()
        );
    }
}
