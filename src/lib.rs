// Neighborhood Demographics - Core Library
// Seeds demographics.json from a GeoJSON feature collection and summarizes
// populated files for the CLI, the map server and tests

pub mod config;
pub mod error;
pub mod templates;
pub mod geojson;
pub mod demographics;
pub mod seed;
pub mod groups;
pub mod stats;

// REST API for the map (optional - server mode)
#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::SeedConfig;
pub use error::{ParseCause, Result, SeedError};
pub use templates::{
    BucketValue, Buckets, CategoryTemplate,
    AGE_TEMPLATE, INCOME_TEMPLATE, OVER_65_LABEL,
};
pub use geojson::{FeatureCollection, NAME_PROPERTY};
pub use demographics::{Demographics, EntityRecord};
pub use seed::{SeedReport, run as run_seed};
pub use groups::{GroupEntry, GroupedView, Groups};
pub use stats::{
    BucketShare, ColorMode, LegendEntry, Summary,
    merge, resolve, median_income_bucket, percent_over_65, summarize,
    age_color, income_color, legend,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
