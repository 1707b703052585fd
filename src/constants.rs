// Chunk defaults
pub const DEFAULT_CHUNK_WIDTH: u32 = 16;
pub const DEFAULT_CHUNK_HEIGHT: u32 = 128;

// Density sampling strides
pub const SAMPLE_RATE_HOR: u32 = 8;
pub const SAMPLE_RATE_VERT: u32 = 4;

// Column placement rules
pub const OCEAN_LEVEL: i32 = 30;
pub const BEACH_MIN_Y: i32 = 28;
pub const BEACH_MAX_Y: i32 = 32;
// Topmost solid blocks above this height are dressed as dirt
pub const TAILPIECE_GRASS_MAX_Y: i32 = 32;
pub const SURFACE_DENSITY_MIN: f32 = 0.01;
pub const SOLID_DENSITY_MIN: f32 = 0.02;
pub const SURFACE_HEIGHT_PERCENTAGE: f32 = 1.0;
pub const INTERIOR_HEIGHT_PERCENTAGE: f32 = 0.2;
pub const ROCK_HEIGHT_PERCENTAGE: f32 = 0.8;

// Flat world layout
pub const FLAT_SURFACE_Y: i32 = 40;
pub const FLAT_DIRT_DEPTH: i32 = 3;

// Worker pool
pub const REQUEST_QUEUE_CAPACITY: usize = 256;
pub const RESULT_QUEUE_CAPACITY: usize = 64;
