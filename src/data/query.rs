use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Filter values supplied by the UI
// ---------------------------------------------------------------------------

/// Site selection: the all-sites sentinel or one specific launch site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteFilter {
    AllSites,
    Site(String),
}

impl SiteFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, SiteFilter::AllSites)
    }

    /// Whether a row at `site` passes this filter.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteFilter::AllSites => true,
            SiteFilter::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::AllSites => write!(f, "All Sites"),
            SiteFilter::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Closed payload interval [low, high] in kilograms.
///
/// Only constructible through [`PayloadRange::new`], so an in-hand range is
/// always well-formed: both bounds finite and `low <= high`. A reversed range
/// is a [`QueryError`], not an empty result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self, QueryError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(QueryError::NonFiniteBound { low, high });
        }
        if low > high {
            return Err(QueryError::ReversedRange { low, high });
        }
        Ok(PayloadRange { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

/// Malformed filter values, as opposed to valid filters matching nothing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("invalid payload range: low {low} exceeds high {high}")]
    ReversedRange { low: f64, high: f64 },

    #[error("payload range bounds must be finite, got [{low}, {high}]")]
    NonFiniteBound { low: f64, high: f64 },
}

// ---------------------------------------------------------------------------
// Aggregate queries (counts chart)
// ---------------------------------------------------------------------------

/// Count successful launches per site, over the whole table.
/// Sites with no successes do not appear in the mapping.
pub fn success_counts_by_site(dataset: &LaunchDataset) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for rec in &dataset.records {
        if rec.outcome.is_success() {
            *counts.entry(rec.site.clone()).or_default() += 1;
        }
    }
    counts
}

/// Count launches by outcome for one site.
/// A site absent from the table yields an empty mapping, not an error.
pub fn outcome_counts_for_site(dataset: &LaunchDataset, site: &str) -> BTreeMap<Outcome, usize> {
    let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
    for rec in &dataset.records {
        if rec.site == site {
            *counts.entry(rec.outcome).or_default() += 1;
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Row filters (scatter chart)
// ---------------------------------------------------------------------------

/// Indices of rows whose payload falls in `range`, in source order.
pub fn filter_by_payload_range(dataset: &LaunchDataset, range: &PayloadRange) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}

/// Narrow a set of row indices to those matching the site filter.
/// Identity for [`SiteFilter::AllSites`]; preserves the given order.
pub fn filter_by_site(dataset: &LaunchDataset, indices: &[usize], filter: &SiteFilter) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| filter.matches(&dataset.records[i].site))
        .collect()
}

/// The composite scatter query: both predicates applied conjunctively.
pub fn scatter_indices(
    dataset: &LaunchDataset,
    filter: &SiteFilter,
    range: &PayloadRange,
) -> Vec<usize> {
    filter_by_site(dataset, &filter_by_payload_range(dataset, range), filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn record(site: &str, payload: f64, outcome: Outcome) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            booster_category: "FT".to_string(),
        }
    }

    /// The two-row table from the reference scenarios.
    fn small_table() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success),
            record("B", 7000.0, Outcome::Failure),
        ])
    }

    fn larger_table() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("CCAFS", 2500.0, Outcome::Success),
            record("KSC", 4800.0, Outcome::Failure),
            record("CCAFS", 500.0, Outcome::Failure),
            record("VAFB", 9600.0, Outcome::Success),
            record("KSC", 3100.0, Outcome::Success),
            record("CCAFS", 6100.0, Outcome::Success),
        ])
    }

    #[test]
    fn success_counts_over_all_sites() {
        let counts = success_counts_by_site(&small_table());
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("A"), Some(&1));
    }

    #[test]
    fn outcome_counts_for_one_site() {
        let counts = outcome_counts_for_site(&small_table(), "A");
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&Outcome::Success), Some(&1));
    }

    #[test]
    fn absent_site_yields_empty_mapping() {
        let counts = outcome_counts_for_site(&small_table(), "Z");
        assert!(counts.is_empty());
    }

    #[test]
    fn payload_range_is_inclusive() {
        let range = PayloadRange::new(0.0, 1000.0).unwrap();
        assert_eq!(filter_by_payload_range(&small_table(), &range), vec![0]);

        let exact = PayloadRange::new(500.0, 500.0).unwrap();
        assert_eq!(filter_by_payload_range(&small_table(), &exact), vec![0]);
    }

    #[test]
    fn single_point_range_without_match_is_empty() {
        let range = PayloadRange::new(6000.0, 6000.0).unwrap();
        assert!(filter_by_payload_range(&small_table(), &range).is_empty());
    }

    #[test]
    fn full_span_range_returns_every_row_in_order() {
        let ds = larger_table();
        let range = PayloadRange::new(ds.payload_min, ds.payload_max).unwrap();
        let indices = filter_by_payload_range(&ds, &range);
        assert_eq!(indices, (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn outcome_counts_sum_to_site_row_count() {
        let ds = larger_table();
        for site in &ds.sites {
            let total: usize = outcome_counts_for_site(&ds, site).values().sum();
            let expected = ds.records.iter().filter(|r| &r.site == site).count();
            assert_eq!(total, expected, "site {site}");
        }
    }

    #[test]
    fn success_counts_sum_to_total_successes() {
        let ds = larger_table();
        let total: usize = success_counts_by_site(&ds).values().sum();
        let expected = ds.records.iter().filter(|r| r.outcome.is_success()).count();
        assert_eq!(total, expected);
    }

    #[test]
    fn all_sites_filter_is_identity() {
        let ds = larger_table();
        let indices: Vec<usize> = (0..ds.len()).collect();
        assert_eq!(filter_by_site(&ds, &indices, &SiteFilter::AllSites), indices);
    }

    #[test]
    fn composite_query_equals_conjunctive_filtering() {
        let ds = larger_table();
        let filter = SiteFilter::Site("CCAFS".to_string());
        let range = PayloadRange::new(1000.0, 7000.0).unwrap();

        let composed = scatter_indices(&ds, &filter, &range);
        let conjunctive: Vec<usize> = ds
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.matches(&r.site) && range.contains(r.payload_mass_kg))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(composed, conjunctive);
        assert_eq!(composed, vec![0, 5]);
    }

    #[test]
    fn absent_site_scatter_is_empty() {
        let ds = larger_table();
        let range = PayloadRange::new(ds.payload_min, ds.payload_max).unwrap();
        let filter = SiteFilter::Site("Z".to_string());
        assert!(scatter_indices(&ds, &filter, &range).is_empty());
    }

    #[test]
    fn queries_are_deterministic() {
        let ds = larger_table();
        let range = PayloadRange::new(1000.0, 8000.0).unwrap();
        let filter = SiteFilter::Site("KSC".to_string());
        assert_eq!(
            scatter_indices(&ds, &filter, &range),
            scatter_indices(&ds, &filter, &range)
        );
        assert_eq!(success_counts_by_site(&ds), success_counts_by_site(&ds));
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert_eq!(
            PayloadRange::new(100.0, 50.0),
            Err(QueryError::ReversedRange {
                low: 100.0,
                high: 50.0
            })
        );
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        assert!(matches!(
            PayloadRange::new(f64::NAN, 50.0),
            Err(QueryError::NonFiniteBound { .. })
        ));
        assert!(matches!(
            PayloadRange::new(0.0, f64::INFINITY),
            Err(QueryError::NonFiniteBound { .. })
        ));
    }
}
