// ⚙️ Configuration - hardcoded relative paths
// The seeder takes no flags and reads no environment; everything lives here.

use std::path::PathBuf;

/// GeoJSON feature collection the names are read from
pub const INPUT_PATH: &str = "Neighborhoods.geojson";

/// Seeded demographics document
pub const OUTPUT_PATH: &str = "demographics.json";

/// Optional neighborhood groupings used by the map
pub const GROUPS_PATH: &str = "groups.json";

/// Server bind address
pub const SERVER_ADDR: &str = "0.0.0.0:3000";

/// Paths for one seed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl SeedConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        SeedConfig {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig::new(INPUT_PATH, OUTPUT_PATH)
    }
}
