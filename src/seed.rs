// 🌱 Seeder - Neighborhoods.geojson → demographics.json
//
// Single pass: parse, extract names, build records, write. Names are fully
// extracted before the output is opened, so parse and schema failures never
// touch the destination file.

use crate::config::SeedConfig;
use crate::demographics::Demographics;
use crate::error::Result;
use crate::geojson::FeatureCollection;
use log::{debug, info};
use std::collections::HashSet;
use std::path::PathBuf;

/// Outcome of a successful seed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub output_path: PathBuf,
    pub features: usize,
    pub entities: usize,
    /// Names seen more than once (each collapses to one record)
    pub duplicates: Vec<String>,
}

impl SeedReport {
    /// The one line printed on success
    pub fn confirmation(&self) -> String {
        let name = self
            .output_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("output");
        format!("{} created with empty bins", name)
    }
}

/// Build the seeded document from a feature collection
pub fn build(collection: &FeatureCollection) -> Result<(Demographics, Vec<String>)> {
    let names = collection.names()?;

    let mut seen = HashSet::with_capacity(names.len());
    let mut duplicates = Vec::new();
    for name in &names {
        if !seen.insert(name.as_str()) && !duplicates.contains(name) {
            duplicates.push(name.clone());
        }
    }

    for name in &duplicates {
        info!("Duplicate feature name '{}': keeping the last occurrence", name);
    }

    Ok((Demographics::seed(names), duplicates))
}

/// Run the whole transform for `config`
pub fn run(config: &SeedConfig) -> Result<SeedReport> {
    info!(
        "Seeding {} from {}",
        config.output_path.display(),
        config.input_path.display()
    );

    let collection = FeatureCollection::load(&config.input_path)?;
    let features = collection.len()?;
    let (doc, duplicates) = build(&collection)?;
    debug!("Built {} records from {} features", doc.len(), features);

    doc.write(&config.output_path)?;

    Ok(SeedReport {
        output_path: config.output_path.clone(),
        features,
        entities: doc.len(),
        duplicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(names: &[&str]) -> FeatureCollection {
        let features: Vec<_> = names
            .iter()
            .map(|n| json!({ "type": "Feature", "properties": { "NAME": n } }))
            .collect();
        FeatureCollection::from_value(json!({ "type": "FeatureCollection", "features": features }))
    }

    #[test]
    fn test_build_one_record_per_unique_name() {
        let (doc, duplicates) = build(&collection(&["Alpha", "Beta", "Gamma"])).unwrap();
        assert_eq!(doc.len(), 3);
        assert!(duplicates.is_empty());
        assert!(doc.iter().all(|(_, r)| r.is_pristine()));
    }

    #[test]
    fn test_build_reports_duplicates_once() {
        let (doc, duplicates) = build(&collection(&["Alpha", "Beta", "Alpha", "Alpha"])).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(duplicates, vec!["Alpha".to_string()]);
    }

    #[test]
    fn test_confirmation_uses_output_file_name() {
        let report = SeedReport {
            output_path: PathBuf::from("out/demographics.json"),
            features: 2,
            entities: 2,
            duplicates: Vec::new(),
        };
        assert_eq!(report.confirmation(), "demographics.json created with empty bins");
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Neighborhoods.geojson");
        let output = dir.path().join("demographics.json");
        std::fs::write(
            &input,
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"NAME":"Alpha"},"geometry":null},
                {"type":"Feature","properties":{"NAME":"Beta"},"geometry":null}
            ]}"#,
        )
        .unwrap();

        let report = run(&SeedConfig::new(&input, &output)).unwrap();
        assert_eq!(report.features, 2);
        assert_eq!(report.entities, 2);

        let doc = Demographics::load(&output).unwrap();
        assert_eq!(doc.names().collect::<Vec<_>>(), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_schema_error_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Neighborhoods.geojson");
        let output = dir.path().join("demographics.json");
        std::fs::write(&input, r#"{"features":[{"properties":{"NAME":"Alpha"}},{"geometry":null}]}"#)
            .unwrap();

        let err = run(&SeedConfig::new(&input, &output)).unwrap_err();
        assert_eq!(err.kind(), "SchemaError");
        assert!(!output.exists());
    }
}
