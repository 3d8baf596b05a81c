// 📈 Distribution statistics
// What the map shows for a neighborhood, a group or a selection:
// median income bucket, share of residents over 65, totals per bucket.

use crate::demographics::{Demographics, EntityRecord};
use crate::groups::Groups;
use crate::templates::{BucketValue, Buckets, INCOME_TEMPLATE, OVER_65_LABEL};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// MERGING
// ============================================================================

/// Sum several records bucket by bucket
///
/// Labels and their order come from the first record; labels the first record
/// lacks are ignored. Returns None for an empty input.
pub fn merge<'a, I>(records: I) -> Option<EntityRecord>
where
    I: IntoIterator<Item = &'a EntityRecord>,
{
    let records: Vec<&EntityRecord> = records.into_iter().collect();
    let first = records.first()?;

    let sum = |pick: fn(&EntityRecord) -> &Buckets| {
        let mut merged = Buckets::default();
        for label in pick(first).labels() {
            let total = records.iter().map(|r| pick(r).count(label)).sum();
            merged.set(label, BucketValue::Count(total));
        }
        merged
    };

    Some(EntityRecord {
        income: sum(|r| &r.income),
        age: sum(|r| &r.age),
    })
}

/// Record for a neighborhood, or the merged record of a group's members
///
/// Group members missing from the document are skipped; a member listed twice
/// is counted once.
pub fn resolve(name: &str, demographics: &Demographics, groups: &Groups) -> Option<EntityRecord> {
    match groups.members(name) {
        Some(members) => {
            let unique: IndexSet<&str> = members.iter().map(String::as_str).collect();
            merge(unique.into_iter().filter_map(|m| demographics.get(m)))
        }
        None => demographics.get(name).cloned(),
    }
}

const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// DERIVED FIGURES
// ============================================================================

/// Income bucket holding the median household
///
/// Walks the income buckets in template order and returns the first bucket
/// where the running total reaches half of the overall total. An unpopulated
/// distribution therefore reports the lowest bucket; "N/A" when none of the
/// income buckets are present at all.
pub fn median_income_bucket(income: &Buckets) -> &'static str {
    if !INCOME_TEMPLATE.labels.iter().any(|l| income.get(l).is_some()) {
        return NOT_AVAILABLE;
    }

    let total: f64 = INCOME_TEMPLATE.labels.iter().map(|l| income.count(l)).sum();

    let mut cumulative = 0.0;
    for label in INCOME_TEMPLATE.labels.iter() {
        cumulative += income.count(label);
        if cumulative >= total / 2.0 {
            return *label;
        }
    }
    NOT_AVAILABLE
}

/// Percent of the age total in the "Over 65" bucket; None when nobody is counted
pub fn percent_over_65(age: &Buckets) -> Option<f64> {
    percent(age.count(OVER_65_LABEL), age.total())
}

fn percent(part: f64, total: f64) -> Option<f64> {
    if total > 0.0 {
        Some(part * 100.0 / total)
    } else {
        None
    }
}

// ============================================================================
// COLOR CLASSES
// ============================================================================

/// Which figure the choropleth is shaded by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Age,
    Income,
}

impl ColorMode {
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.to_lowercase().as_str() {
            "age" => Some(ColorMode::Age),
            "income" => Some(ColorMode::Income),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Age => "age",
            ColorMode::Income => "income",
        }
    }
}

/// (% over 65 strictly above, color), darkest first
const AGE_SCALE: [(f64, &str, &str); 6] = [
    (30.0, "#08306b", "30%+"),
    (20.0, "#2171b5", "20–30%"),
    (15.0, "#4292c6", "15–20%"),
    (10.0, "#6baed6", "10–15%"),
    (5.0, "#9ecae1", "5–10%"),
    (2.0, "#c6dbef", "2–5%"),
];
const AGE_FLOOR: (&str, &str) = ("#d9ecff", "<2%");

/// One color per income bucket, aligned with INCOME_TEMPLATE.labels
const INCOME_SCALE: [(&str, &str); 6] = [
    ("#fff5d6", "< $50,000"),
    ("#fde7a3", "$50,000–$74,999"),
    ("#fbc75d", "$75,000–$99,999"),
    ("#f5a623", "$100,000–$149,999"),
    ("#e18c0d", "$150,000–$199,999"),
    ("#b05e00", "$200,000+"),
];
const NO_DATA_COLOR: &str = "#f2efe7";

/// Fill color for a share of residents over 65; unknown shares get the lightest class
pub fn age_color(percent_over_65: Option<f64>) -> &'static str {
    let Some(percent) = percent_over_65 else {
        return AGE_FLOOR.0;
    };
    AGE_SCALE
        .iter()
        .find(|(threshold, _, _)| percent > *threshold)
        .map(|(_, color, _)| *color)
        .unwrap_or(AGE_FLOOR.0)
}

/// Fill color for a median income bucket
pub fn income_color(bucket: &str) -> &'static str {
    INCOME_TEMPLATE
        .labels
        .iter()
        .position(|label| *label == bucket)
        .map(|idx| INCOME_SCALE[idx].0)
        .unwrap_or(NO_DATA_COLOR)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: &'static str,
}

/// Legend rows for a color mode, darkest class first
pub fn legend(mode: ColorMode) -> Vec<LegendEntry> {
    match mode {
        ColorMode::Age => AGE_SCALE
            .iter()
            .map(|&(_, color, label)| LegendEntry { color, label })
            .chain(std::iter::once(LegendEntry {
                color: AGE_FLOOR.0,
                label: AGE_FLOOR.1,
            }))
            .collect(),
        ColorMode::Income => INCOME_SCALE
            .iter()
            .rev()
            .map(|&(color, label)| LegendEntry { color, label })
            .collect(),
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketShare {
    pub label: String,
    pub count: f64,
    pub percent: Option<f64>,
}

fn shares(buckets: &Buckets) -> Vec<BucketShare> {
    let total = buckets.total();
    buckets
        .iter()
        .map(|(label, value)| BucketShare {
            label: label.to_string(),
            count: value.count(),
            percent: percent(value.count(), total),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub names: Vec<String>,
    pub median_income: String,
    pub percent_over_65: Option<f64>,
    pub total_population: f64,
    pub income: Vec<BucketShare>,
    pub age: Vec<BucketShare>,
    pub income_color: &'static str,
    pub age_color: &'static str,
}

impl Summary {
    pub fn from_record(names: Vec<String>, record: &EntityRecord) -> Self {
        let median = median_income_bucket(&record.income);
        let over_65 = percent_over_65(&record.age);
        Summary {
            names,
            median_income: median.to_string(),
            percent_over_65: over_65,
            total_population: record.age.total(),
            income: shares(&record.income),
            age: shares(&record.age),
            income_color: income_color(median),
            age_color: age_color(over_65),
        }
    }

    pub fn fill_color(&self, mode: ColorMode) -> &'static str {
        match mode {
            ColorMode::Age => self.age_color,
            ColorMode::Income => self.income_color,
        }
    }
}

/// Combined summary for a selection of neighborhoods and/or groups
///
/// Unknown names are skipped and repeated names count once; None when
/// nothing resolves.
pub fn summarize<S: AsRef<str>>(
    names: &[S],
    demographics: &Demographics,
    groups: &Groups,
) -> Option<Summary> {
    let unique: IndexSet<&str> = names.iter().map(|n| n.as_ref()).collect();
    let mut resolved_names = Vec::new();
    let mut records = Vec::new();

    for name in unique {
        if let Some(record) = resolve(name, demographics, groups) {
            resolved_names.push(name.to_string());
            records.push(record);
        }
    }

    let merged = merge(&records)?;
    Some(Summary::from_record(resolved_names, &merged))
}

fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(p) => format!("{:.1}%", p),
        None => "N/A".to_string(),
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.names.join(", "))?;
        writeln!(f, "  Median Income:     {}", self.median_income)?;
        writeln!(f, "  % Over Age 65:     {}", fmt_percent(self.percent_over_65))?;
        writeln!(f, "  Total Population:  {}", self.total_population)?;
        writeln!(f, "  Income")?;
        for share in &self.income {
            writeln!(f, "    {}: {} ≈ {}", share.label, share.count, fmt_percent(share.percent))?;
        }
        writeln!(f, "  Age")?;
        for share in &self.age {
            writeln!(f, "    {}: {} ≈ {}", share.label, share.count, fmt_percent(share.percent))?;
        }
        Ok(())
    }
}
