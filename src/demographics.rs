// 📊 Demographics document - name → { income, age }
//
// Written once by the seeder, then filled in by hand and read back by the
// summary command and the map server.

use crate::error::{Result, SeedError};
use crate::templates::{Buckets, AGE_TEMPLATE, INCOME_TEMPLATE};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

// ============================================================================
// ENTITY RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityRecord {
    pub income: Buckets,
    pub age: Buckets,
}

impl EntityRecord {
    /// Record with fresh copies of both templates
    pub fn seeded() -> Self {
        EntityRecord {
            income: INCOME_TEMPLATE.instantiate(),
            age: AGE_TEMPLATE.instantiate(),
        }
    }

    pub fn is_pristine(&self) -> bool {
        self.income.is_pristine(&INCOME_TEMPLATE) && self.age.is_pristine(&AGE_TEMPLATE)
    }
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// Ordered mapping of entity name to record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Demographics {
    records: IndexMap<String, EntityRecord>,
}

impl Demographics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one record per name, in order
    ///
    /// A repeated name replaces the earlier record but keeps its position.
    pub fn seed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Demographics::new();
        for name in names {
            doc.insert(name, EntityRecord::seeded());
        }
        doc
    }

    /// Insert or replace; returns the replaced record if the name existed
    pub fn insert(&mut self, name: impl Into<String>, record: EntityRecord) -> Option<EntityRecord> {
        self.records.insert(name.into(), record)
    }

    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut EntityRecord> {
        self.records.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityRecord)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read a (possibly populated) demographics file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SeedError::parse(path, e))?;
        let doc: Demographics = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SeedError::parse(path, e))?;

        debug!("Loaded {} records from {}", doc.len(), path.display());
        Ok(doc)
    }

    /// Pretty-print (2-space indent) to `path`, creating or truncating it
    ///
    /// Not atomic: a failure mid-write can leave a truncated file behind.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| SeedError::write(path, e))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| SeedError::write(path, e.into()))?;
        writer.flush().map_err(|e| SeedError::write(path, e))?;

        debug!("Wrote {} records to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::BucketValue;

    #[test]
    fn test_seed_keeps_order() {
        let doc = Demographics::seed(["Alpha", "Beta", "Gamma"]);
        assert_eq!(doc.names().collect::<Vec<_>>(), vec!["Alpha", "Beta", "Gamma"]);
        assert!(doc.iter().all(|(_, record)| record.is_pristine()));
    }

    #[test]
    fn test_duplicate_name_last_write_wins_in_place() {
        let mut doc = Demographics::seed(["Alpha", "Beta"]);

        let mut marked = EntityRecord::seeded();
        marked.age.set("Under 5", BucketValue::Count(3.0));
        let replaced = doc.insert("Alpha", marked.clone());

        assert!(replaced.is_some());
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.names().collect::<Vec<_>>(), vec!["Alpha", "Beta"]);
        assert_eq!(doc.get("Alpha"), Some(&marked));
    }

    #[test]
    fn test_seed_with_duplicates_yields_one_record() {
        let doc = Demographics::seed(["Alpha", "Alpha"]);
        assert_eq!(doc.len(), 1);
        assert!(doc.get("Alpha").unwrap().is_pristine());
    }

    #[test]
    fn test_records_do_not_alias() {
        let mut doc = Demographics::seed(["Alpha", "Beta"]);
        doc.get_mut("Alpha")
            .unwrap()
            .income
            .set("Less than $50,000", BucketValue::Flag(true));

        assert!(!doc.get("Alpha").unwrap().is_pristine());
        assert!(doc.get("Beta").unwrap().is_pristine());
    }

    #[test]
    fn test_record_field_order() {
        let json = serde_json::to_string(&EntityRecord::seeded()).unwrap();
        let income_at = json.find("\"income\"").unwrap();
        let age_at = json.find("\"age\"").unwrap();
        assert!(income_at < age_at);
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demographics.json");

        let doc = Demographics::seed(["Alpha", "Beta"]);
        doc.write(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"Alpha\": {\n    \"income\": {\n      \"Less than $50,000\": false,"));

        let loaded = Demographics::load(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("demographics.json");

        let err = Demographics::seed(["Alpha"]).write(&path).unwrap_err();
        assert_eq!(err.kind(), "WriteError");
    }
}
