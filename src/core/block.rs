use std::fmt;

use serde::{Deserialize, Serialize};

/// Voxel type code as stored in a chunk.
///
/// The numeric values are the storage contract shared with every consumer of
/// generated chunks and must never be renumbered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoxelKind(u8);

impl VoxelKind {
    pub const AIR: VoxelKind = VoxelKind(0x0);
    pub const DIRT: VoxelKind = VoxelKind(0x1);
    pub const GRASS: VoxelKind = VoxelKind(0x2);
    pub const ROCK: VoxelKind = VoxelKind(0x3);
    pub const OCEAN: VoxelKind = VoxelKind(0x4);
    pub const SAND: VoxelKind = VoxelKind(0x7);
    pub const BEDROCK: VoxelKind = VoxelKind(0x8);

    /// Surface type chosen for high blocks outside the beach band. It has no
    /// name of its own; the code happens to equal [`VoxelKind::GRASS`].
    pub const SECONDARY_SURFACE: VoxelKind = VoxelKind(0x2);

    /// Every code the generators can write, in code order.
    pub const ALL: [VoxelKind; 7] = [
        VoxelKind::AIR,
        VoxelKind::DIRT,
        VoxelKind::GRASS,
        VoxelKind::ROCK,
        VoxelKind::OCEAN,
        VoxelKind::SAND,
        VoxelKind::BEDROCK,
    ];

    pub const fn from_code(code: u8) -> Self {
        VoxelKind(code)
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    pub fn is_air(self) -> bool {
        self == VoxelKind::AIR
    }

    pub fn is_solid(self) -> bool {
        !matches!(self, VoxelKind::AIR | VoxelKind::OCEAN)
    }

    /// Human-readable label. Code `0x2` is shared by grass and the secondary
    /// surface type, so its label names both.
    pub fn name(self) -> &'static str {
        match self {
            VoxelKind::AIR => "air",
            VoxelKind::DIRT => "dirt",
            VoxelKind::GRASS => "grass/secondary",
            VoxelKind::ROCK => "rock",
            VoxelKind::OCEAN => "ocean",
            VoxelKind::SAND => "sand",
            VoxelKind::BEDROCK => "bedrock",
            _ => "unknown",
        }
    }
}

impl fmt::Display for VoxelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:x})", self.name(), self.0)
    }
}
