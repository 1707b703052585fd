use thiserror::Error;

/// Rejected generator configuration. Raised once, before any chunk is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("chunk dimension {axis} must be non-zero")]
    ZeroDimension { axis: char },
    #[error("chunk dimension {axis}={value} is not divisible by the sample stride {stride}")]
    NotDivisible { axis: char, value: u32, stride: u32 },
    #[error("worker count must be at least 1")]
    NoWorkers,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings encoding error: {0}")]
    Encoding(#[from] bincode::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("region file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a region file")]
    BadMagic,
    #[error("unsupported region file version: {0}")]
    UnsupportedVersion(u32),
    #[error("region payload claims {declared} bytes but only {available} remain")]
    Truncated { declared: u64, available: u64 },
    #[error("region encoding error: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("stored chunk at {x},{y},{z} has {found} voxels")]
    VoxelCount { x: i32, y: i32, z: i32, found: usize },
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn chunk generation worker: {0}")]
    Spawn(#[from] std::io::Error),
}
