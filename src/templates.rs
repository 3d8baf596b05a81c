// 🪣 Category Templates - income and age bucket blueprints
//
// A template is a fixed, ordered list of bucket labels. Every entity gets its
// own Buckets instance built from it; nothing is shared between entities.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// TEMPLATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTemplate {
    pub name: &'static str,
    pub labels: &'static [&'static str],
}

pub const INCOME_TEMPLATE: CategoryTemplate = CategoryTemplate {
    name: "income",
    labels: &[
        "Less than $50,000",
        "$50,000 to $74,999",
        "$75,000 to $99,999",
        "$100,000 to $149,999",
        "150,000 to $199,999",
        "200,000 or more",
    ],
};

pub const AGE_TEMPLATE: CategoryTemplate = CategoryTemplate {
    name: "age",
    labels: &["Under 5", "5 to 19", "20 to 34", "35 to 64", "Over 65"],
};

/// Age bucket the "% over 65" statistic is read from
pub const OVER_65_LABEL: &str = "Over 65";

impl CategoryTemplate {
    /// Fresh, independently owned copy with every bucket unpopulated
    pub fn instantiate(&self) -> Buckets {
        Buckets(
            self.labels
                .iter()
                .map(|label| (label.to_string(), BucketValue::default()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ============================================================================
// BUCKET VALUES
// ============================================================================

/// A single bucket slot
///
/// Seeding writes `Flag(false)`. Once the file is filled in by hand a bucket
/// holds a population count instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketValue {
    Flag(bool),
    Count(f64),
}

impl BucketValue {
    /// Population in this bucket; placeholders count as zero
    pub fn count(&self) -> f64 {
        match self {
            BucketValue::Flag(_) => 0.0,
            BucketValue::Count(n) => *n,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, BucketValue::Flag(false))
    }
}

impl Default for BucketValue {
    fn default() -> Self {
        BucketValue::Flag(false)
    }
}

// ============================================================================
// BUCKETS
// ============================================================================

/// Ordered label → value mapping for one distribution
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Buckets(IndexMap<String, BucketValue>);

impl Buckets {
    pub fn get(&self, label: &str) -> Option<&BucketValue> {
        self.0.get(label)
    }

    pub fn set(&mut self, label: &str, value: BucketValue) {
        self.0.insert(label.to_string(), value);
    }

    pub fn count(&self, label: &str) -> f64 {
        self.get(label).map(BucketValue::count).unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.0.values().map(BucketValue::count).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BucketValue)> {
        self.0.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when labels and order match the template and nothing is populated
    pub fn is_pristine(&self, template: &CategoryTemplate) -> bool {
        self.len() == template.len()
            && self
                .iter()
                .zip(template.labels)
                .all(|((label, value), expected)| label == *expected && value.is_placeholder())
    }
}
