// 🗺️ Feature Collection reader
// Loads a GeoJSON document and pulls properties.NAME out of every feature.
// Geometry and every other property are ignored.

use crate::error::{Result, SeedError};
use log::debug;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Property holding the feature's identifying name
pub const NAME_PROPERTY: &str = "NAME";

/// Parsed feature collection, held fully in memory for the run
#[derive(Debug, Clone)]
pub struct FeatureCollection {
    document: Value,
}

impl FeatureCollection {
    /// Read and parse the whole file; the handle is dropped before returning
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SeedError::parse(path, e))?;
        let reader = BufReader::new(file);
        let document: Value =
            serde_json::from_reader(reader).map_err(|e| SeedError::parse(path, e))?;

        debug!("Parsed feature collection from {}", path.display());
        Ok(FeatureCollection { document })
    }

    pub fn from_value(document: Value) -> Self {
        FeatureCollection { document }
    }

    fn features(&self) -> Result<&[Value]> {
        self.document
            .get("features")
            .ok_or_else(|| SeedError::missing(None, "features"))?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| SeedError::wrong_type(None, "features", "a sequence"))
    }

    /// Number of features, or a SchemaError if "features" is unusable
    pub fn len(&self) -> Result<usize> {
        Ok(self.features()?.len())
    }

    /// Names of every feature in document order
    ///
    /// Stops at the first feature lacking `properties` or `properties.NAME`.
    pub fn names(&self) -> Result<Vec<String>> {
        let features = self.features()?;
        let mut names = Vec::with_capacity(features.len());

        for (idx, feature) in features.iter().enumerate() {
            names.push(feature_name(idx, feature)?.to_string());
        }

        debug!("Extracted {} feature names", names.len());
        Ok(names)
    }
}

fn feature_name(idx: usize, feature: &Value) -> Result<&str> {
    let properties = feature
        .get("properties")
        .filter(|p| !p.is_null())
        .ok_or_else(|| SeedError::missing(Some(idx), "properties"))?;

    properties
        .get(NAME_PROPERTY)
        .ok_or_else(|| SeedError::missing(Some(idx), NAME_PROPERTY))?
        .as_str()
        .ok_or_else(|| SeedError::wrong_type(Some(idx), NAME_PROPERTY, "a string"))
}
