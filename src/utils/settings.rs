use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::{ChunkDimensions, GeneratorConfig, WorldSeed};
use crate::error::SettingsError;
use crate::save::DEFAULT_REGION_FILE;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.bin";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneratorSettings {
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub loader: LoaderSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::new(WorldSeed(2137), ChunkDimensions::default()),
            loader: LoaderSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.generator.validate()?;
        if self.loader.workers == 0 {
            return Err(crate::error::ConfigError::NoWorkers.into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoaderSettings {
    pub workers: usize,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().max(1),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputSettings {
    pub region_file: String,
    pub radius: u32,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            region_file: DEFAULT_REGION_FILE.to_string(),
            radius: 2,
        }
    }
}

pub fn save_settings<P: AsRef<Path>>(
    path: P,
    settings: &GeneratorSettings,
) -> Result<(), SettingsError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, settings)?;
    writer.flush()?;
    Ok(())
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<GeneratorSettings, SettingsError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let settings: GeneratorSettings = bincode::deserialize_from(&mut reader)?;
    settings.validate()?;
    Ok(settings)
}
