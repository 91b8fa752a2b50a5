use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Where the input tables live and how the window opens.
///
/// Read from `medal-board.json` in the working directory; every field is
/// optional and falls back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory containing the three input files.
    pub data_dir: PathBuf,
    pub medals_file: String,
    pub competitions_file: String,
    pub historical_file: String,
    /// Image shown at the top of the side panel, if set.
    pub logo: Option<PathBuf>,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            medals_file: "Olympics_2024_Medals_Table.csv".into(),
            competitions_file: "Olympics_2024.csv".into(),
            historical_file: "Olympics_Historical_Data.csv".into(),
            logo: None,
            window_size: [1280.0, 860.0],
        }
    }
}

impl DashboardConfig {
    pub const FILE_NAME: &'static str = "medal-board.json";

    /// Load `path` if it exists, otherwise use the defaults.
    /// A file that exists but does not parse is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("{} not found, using default configuration", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
