//! Column-wise conversion of a density field into voxels

use crate::constants::*;
use crate::core::block::VoxelKind;
use crate::core::chunk::ChunkAccess;
use crate::world::upsample::DensityMap;

/// Voxel type for a solid block at height `y`.
pub fn type_for(y: i32, height_percentage: f32) -> VoxelKind {
    // Sand
    if (BEACH_MIN_Y..=BEACH_MAX_Y).contains(&y) {
        return VoxelKind::SAND;
    }

    if height_percentage <= ROCK_HEIGHT_PERCENTAGE {
        return VoxelKind::ROCK;
    }

    VoxelKind::SECONDARY_SURFACE
}

/// Surface dressing for the topmost solid block of a column.
pub fn tailpiece(kind: VoxelKind, y: i32) -> VoxelKind {
    if kind == VoxelKind::SAND || kind == VoxelKind::ROCK {
        return kind;
    }

    // FIXME: the intent was "no grass below the water surface", yet blocks
    // above y=32 get dirt and lower ones get grass. Kept until the intended
    // mapping is confirmed.
    if y > TAILPIECE_GRASS_MAX_Y {
        VoxelKind::DIRT
    } else {
        VoxelKind::GRASS
    }
}

/// Walks each `(x, z)` column of an interpolated density map from the top
/// voxel down and writes voxel codes into the chunk.
///
/// The column extent comes from the density map, never from the chunk, so a
/// mismatched chunk cannot drive reads past the buffer.
pub struct ColumnMaterializer;

impl ColumnMaterializer {
    pub fn materialize<C: ChunkAccess + ?Sized>(density: &DensityMap, chunk: &mut C) {
        let (size_x, size_y, size_z) = density.size();
        for x in 0..(size_x - 1) as u32 {
            for z in 0..(size_z - 1) as u32 {
                Self::materialize_column(density, chunk, x, z, (size_y - 1) as u32);
            }
        }
    }

    fn materialize_column<C: ChunkAccess + ?Sized>(
        density: &DensityMap,
        chunk: &mut C,
        x: u32,
        z: u32,
        height: u32,
    ) {
        let mut surface_applied = false;

        // Starts at the top voxel. The far-face sample row at `height` is not
        // part of the chunk and never marks the surface as applied.
        for y in (0..height).rev() {
            let fy = y as i32;

            // Bedrock floor ends the column
            if y == 0 {
                chunk.set_voxel(x, y, z, VoxelKind::BEDROCK);
                break;
            }

            if fy < OCEAN_LEVEL {
                chunk.set_voxel(x, y, z, VoxelKind::OCEAN);
            }

            let d = density.get(x as usize, y as usize, z as usize);

            if d > SURFACE_DENSITY_MIN && d < SOLID_DENSITY_MIN {
                let kind = type_for(fy, SURFACE_HEIGHT_PERCENTAGE);
                if surface_applied {
                    chunk.set_voxel(x, y, z, kind);
                } else {
                    chunk.set_voxel(x, y, z, tailpiece(kind, fy));
                }
                surface_applied = true;
            } else if d >= SOLID_DENSITY_MIN {
                let kind = type_for(fy, INTERIOR_HEIGHT_PERCENTAGE);
                chunk.set_voxel(x, y, z, tailpiece(kind, fy));
                surface_applied = true;
            }
        }
    }
}
