use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/sample_data.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "plots/";

const DATA_PATH_VAR: &str = "SHEET_EXPLORER_DATA_PATH";
const OUTPUT_DIR_VAR: &str = "SHEET_EXPLORER_OUTPUT_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    pub fn new(data_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Defaults, overridden by a `.env` file or the process environment.
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let defaults = Self::default();
        Ok(Config {
            data_path: path_override(DATA_PATH_VAR)?.unwrap_or(defaults.data_path),
            output_dir: path_override(OUTPUT_DIR_VAR)?.unwrap_or(defaults.output_dir),
        })
    }
}

fn path_override(var: &str) -> Result<Option<PathBuf>> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => {
            tracing::warn!("{} is set but empty, using the default", var);
            Ok(None)
        }
        Ok(value) => Ok(Some(PathBuf::from(value))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(anyhow::anyhow!("Failed to read {}: {}", var, e)),
    }
}
