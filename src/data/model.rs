use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

use super::DataError;

// ---------------------------------------------------------------------------
// Outcome – binary launch result
// ---------------------------------------------------------------------------

/// Launch outcome, encoded in the source `class` column (success = 1, failure = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Decode the 0/1 `class` column. Anything else is out of domain.
    pub fn from_class(class: i64) -> Result<Self, DataError> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(DataError::InvalidOutcome(other)),
        }
    }

    /// The numeric class value, used as the scatter y-coordinate.
    pub fn as_class(self) -> i64 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site name.
    pub site: String,
    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,
    /// Binary success/failure outcome.
    pub outcome: Outcome,
    /// Booster version category (used for scatter colouring).
    pub booster_category: String,
}

/// Deserialization shape matching the source column names, before the
/// `class` column is decoded into an [`Outcome`].
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub class: i64,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
}

impl TryFrom<RawRecord> for LaunchRecord {
    type Error = DataError;

    fn try_from(raw: RawRecord) -> Result<Self, DataError> {
        Ok(LaunchRecord {
            site: raw.launch_site,
            payload_mass_kg: raw.payload_mass_kg,
            outcome: Outcome::from_class(raw.class)?,
            booster_category: raw.booster_category,
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with load-time derived summaries.
/// Immutable once built; every query is a pure function of it.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches (rows), in source order.
    pub records: Vec<LaunchRecord>,
    /// Sorted unique launch site names.
    pub sites: Vec<String>,
    /// Sorted unique booster version categories.
    pub booster_categories: Vec<String>,
    /// Smallest payload mass observed at load time.
    pub payload_min: f64,
    /// Largest payload mass observed at load time.
    pub payload_max: f64,
}

impl LaunchDataset {
    /// Build the derived summaries from the loaded rows.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut site_set: BTreeSet<String> = BTreeSet::new();
        let mut booster_set: BTreeSet<String> = BTreeSet::new();
        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;

        for rec in &records {
            site_set.insert(rec.site.clone());
            booster_set.insert(rec.booster_category.clone());
            payload_min = payload_min.min(rec.payload_mass_kg);
            payload_max = payload_max.max(rec.payload_mass_kg);
        }

        if records.is_empty() {
            payload_min = 0.0;
            payload_max = 0.0;
        }

        LaunchDataset {
            records,
            sites: site_set.into_iter().collect(),
            booster_categories: booster_set.into_iter().collect(),
            payload_min,
            payload_max,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
