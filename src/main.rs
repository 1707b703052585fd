//! Terrain region generator
//!
//! Generates a square of chunks around the origin and writes them to a
//! region file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use blockterrain::utils::settings::DEFAULT_SETTINGS_FILE;
use blockterrain::{
    Chunk, ChunkGenerator, ChunkLoader, ChunkPos, FlatGenerator, GeneratorSettings, SavedRegion,
    TerrainGenerator, VoxelKind, WorldSeed, load_settings, save_region, save_settings,
};

/// Density-field terrain generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World seed; numbers are used as-is, other text is hashed
    #[arg(long)]
    seed: Option<String>,

    /// Settings file to read (created with --write-settings)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long, default_value_t = false)]
    write_settings: bool,

    /// Chunks generated in each direction from the origin
    #[arg(long)]
    radius: Option<u32>,

    /// Number of generation worker threads
    #[arg(long)]
    workers: Option<usize>,

    /// Region file to write
    #[arg(long)]
    output: Option<String>,

    /// Use the flat generator instead of density terrain
    #[arg(long, default_value_t = false)]
    flat: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

    let mut settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => GeneratorSettings::default(),
    };

    if let Some(seed) = &args.seed {
        settings.generator.seed = WorldSeed::from_text(seed);
    }
    if let Some(radius) = args.radius {
        settings.output.radius = radius;
    }
    if let Some(workers) = args.workers {
        settings.loader.workers = workers;
    }
    if let Some(output) = &args.output {
        settings.output.region_file = output.clone();
    }

    // Rejects bad chunk dimensions before any chunk is generated
    settings.validate()?;

    if args.write_settings {
        save_settings(&settings_path, &settings)?;
        tracing::info!("Settings written to {}", settings_path.display());
    }

    let config = settings.generator;
    let generator: Arc<dyn TerrainGenerator> = if args.flat {
        Arc::new(FlatGenerator::new(config)?)
    } else {
        Arc::new(ChunkGenerator::new(config)?)
    };

    tracing::info!(
        "Generating region with seed {} and chunk size {}x{}x{}",
        config.seed,
        config.dimensions.x,
        config.dimensions.y,
        config.dimensions.z
    );

    let radius = settings.output.radius as i32;
    let positions: Vec<ChunkPos> = (-radius..=radius)
        .flat_map(|cx| (-radius..=radius).map(move |cz| (cx, 0, cz)))
        .collect();

    let start = Instant::now();
    let mut chunks = generate_all(&positions, settings.loader.workers, generator)?;
    chunks.sort_by_key(|(pos, _)| *pos);
    tracing::info!("Generated {} chunks in {:?}", chunks.len(), start.elapsed());

    for kind in VoxelKind::ALL {
        let count: usize = chunks.iter().map(|(_, chunk)| chunk.count_of(kind)).sum();
        tracing::info!("{:>8} voxels of {}", count, kind);
    }

    let region = SavedRegion::from_chunks(config.seed, chunks.iter().map(|(_, chunk)| chunk));
    save_region(&settings.output.region_file, &region)?;
    tracing::info!("Region saved to {}", settings.output.region_file);

    Ok(())
}

fn generate_all(
    positions: &[ChunkPos],
    workers: usize,
    generator: Arc<dyn TerrainGenerator>,
) -> Result<Vec<(ChunkPos, Chunk)>, Box<dyn std::error::Error>> {
    let mut loader = ChunkLoader::with_worker_count(workers, generator)?;
    let mut chunks = Vec::with_capacity(positions.len());
    let mut next = 0;

    while chunks.len() < positions.len() {
        // Keep the request queue topped up; it is bounded
        if next < positions.len() {
            next += loader.request_chunks(&positions[next..]);
        }

        match loader.wait_next() {
            Some(result) => chunks.push((result.pos, result.chunk)),
            None => return Err("chunk workers stopped before the region was complete".into()),
        }
    }

    Ok(chunks)
}
