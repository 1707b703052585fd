use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::config::{ChunkDimensions, WorldSeed};
use crate::core::block::VoxelKind;
use crate::core::chunk::{Chunk, ChunkAccess, WorldOffset};
use crate::error::SaveError;

const MAGIC_HEADER: &[u8; 4] = b"BTCK";
const VERSION: u32 = 1;
const HEADER_LEN: u64 = 16;

#[derive(Serialize, Deserialize)]
pub struct SavedChunk {
    pub offset: WorldOffset,
    pub dimensions: ChunkDimensions,
    pub voxels: Vec<VoxelKind>,
}

impl SavedChunk {
    pub fn from_chunk(chunk: &Chunk) -> Self {
        SavedChunk {
            offset: chunk.offset(),
            dimensions: chunk.dimensions(),
            voxels: chunk.voxels().to_vec(),
        }
    }

    pub fn into_chunk(self) -> Result<Chunk, SaveError> {
        let found = self.voxels.len();
        let offset = self.offset;
        Chunk::from_voxels(self.dimensions, offset, self.voxels).ok_or(SaveError::VoxelCount {
            x: offset.x,
            y: offset.y,
            z: offset.z,
            found,
        })
    }
}

#[derive(Serialize, Deserialize)]
pub struct SavedRegion {
    pub seed: WorldSeed,
    pub chunks: Vec<SavedChunk>,
}

impl SavedRegion {
    pub fn from_chunks<'a, I>(seed: WorldSeed, chunks: I) -> Self
    where
        I: IntoIterator<Item = &'a Chunk>,
    {
        SavedRegion {
            seed,
            chunks: chunks.into_iter().map(SavedChunk::from_chunk).collect(),
        }
    }

    pub fn into_chunks(self) -> Result<Vec<Chunk>, SaveError> {
        self.chunks.into_iter().map(SavedChunk::into_chunk).collect()
    }
}

pub fn save_region<P: AsRef<Path>>(path: P, region: &SavedRegion) -> Result<(), SaveError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(MAGIC_HEADER)?;
    writer.write_all(&VERSION.to_le_bytes())?;

    let data = bincode::serialize(region)?;

    let size = data.len() as u64;
    writer.write_all(&size.to_le_bytes())?;

    writer.write_all(&data)?;
    writer.flush()?;

    Ok(())
}

pub fn load_region<P: AsRef<Path>>(path: P) -> Result<SavedRegion, SaveError> {
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();
    let mut reader = BufReader::new(file);
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC_HEADER {
        return Err(SaveError::BadMagic);
    }

    let mut version_bytes = [0u8; 4];
    reader.read_exact(&mut version_bytes)?;
    let version = u32::from_le_bytes(version_bytes);
    if version != VERSION {
        return Err(SaveError::UnsupportedVersion(version));
    }

    let mut size_bytes = [0u8; 8];
    reader.read_exact(&mut size_bytes)?;
    let size = u64::from_le_bytes(size_bytes);

    let available = file_len.saturating_sub(HEADER_LEN);
    if size > available {
        return Err(SaveError::Truncated {
            declared: size,
            available,
        });
    }

    let mut data = vec![0u8; size as usize];
    reader.read_exact(&mut data)?;

    Ok(bincode::deserialize(&data)?)
}

pub const DEFAULT_REGION_FILE: &str = "region.btr";

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("blockterrain-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_region_file_keeps_voxels() {
        let dims = ChunkDimensions::new(8, 8, 8);
        let mut chunk = Chunk::new(dims, WorldOffset::new(8, 0, -8));
        chunk.set_voxel(1, 0, 1, VoxelKind::BEDROCK);
        chunk.set_voxel(2, 5, 3, VoxelKind::SAND);

        let path = temp_path("region.btr");
        save_region(&path, &SavedRegion::from_chunks(WorldSeed(5), [&chunk])).unwrap();
        let loaded = load_region(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.seed, WorldSeed(5));
        assert_eq!(loaded.into_chunks().unwrap(), vec![chunk]);
    }

    #[test]
    fn test_rejects_foreign_file() {
        let path = temp_path("foreign.btr");
        std::fs::write(&path, b"R3DW\x01\x00\x00\x00").unwrap();
        let result = load_region(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(SaveError::BadMagic)));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let path = temp_path("future.btr");
        let mut bytes = MAGIC_HEADER.to_vec();
        bytes.extend_from_slice(&7u32.to_le_bytes());
        std::fs::write(&path, bytes).unwrap();
        let result = load_region(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(SaveError::UnsupportedVersion(7))));
    }

    #[test]
    fn test_rejects_oversized_length() {
        let path = temp_path("oversized.btr");
        let mut bytes = MAGIC_HEADER.to_vec();
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 4]);
        std::fs::write(&path, bytes).unwrap();
        let result = load_region(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            result,
            Err(SaveError::Truncated {
                declared: u64::MAX,
                available: 4
            })
        ));
    }

    #[test]
    fn test_rejects_cut_off_payload() {
        let chunk = Chunk::new(ChunkDimensions::new(8, 8, 8), WorldOffset::default());
        let path = temp_path("cut.btr");
        save_region(&path, &SavedRegion::from_chunks(WorldSeed(1), [&chunk])).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 10]).unwrap();
        let result = load_region(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(SaveError::Truncated { .. })));
    }

    #[test]
    fn test_voxel_count_mismatch() {
        let saved = SavedChunk {
            offset: WorldOffset::default(),
            dimensions: ChunkDimensions::new(8, 8, 8),
            voxels: vec![VoxelKind::AIR; 10],
        };
        assert!(matches!(
            saved.into_chunk(),
            Err(SaveError::VoxelCount { found: 10, .. })
        ));
    }
}
