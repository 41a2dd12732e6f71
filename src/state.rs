use crate::color::ColorMap;
use crate::data::model::LaunchDataset;
use crate::data::query::{
    self, outcome_counts_for_site, success_counts_by_site, PayloadRange, SiteFilter,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The widgets mutate the filter values and call [`AppState::refresh_queries`];
/// the chart views only read the cached results. All derivation goes through
/// the pure query functions, so the cache is re-derivable at any time from
/// (dataset, site filter, payload range).
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Current site selection.
    pub site_filter: SiteFilter,

    /// Payload range slider values, kept clamped so low <= high.
    pub payload_low: f64,
    pub payload_high: f64,

    /// Cached counts chart data: grouping label → count, in key order.
    pub counts: Vec<(String, usize)>,

    /// Cached scatter rows: indices into the dataset passing both filters.
    pub scatter_indices: Vec<usize>,

    /// Booster category colours for the scatter chart.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            site_filter: SiteFilter::AllSites,
            payload_low: 0.0,
            payload_high: 0.0,
            counts: Vec::new(),
            scatter_indices: Vec::new(),
            color_map: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, reset filters to the full span.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.site_filter = SiteFilter::AllSites;
        self.payload_low = dataset.payload_min;
        self.payload_high = dataset.payload_max;
        self.color_map = Some(ColorMap::new(&dataset.booster_categories));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh_queries();
    }

    /// Change the site selection and recompute both cached views.
    pub fn set_site_filter(&mut self, filter: SiteFilter) {
        self.site_filter = filter;
        self.refresh_queries();
    }

    /// Change the payload range, clamping so the interval stays well-formed.
    /// `moved_low` tells which end the user dragged, so the other end yields.
    pub fn set_payload_range(&mut self, low: f64, high: f64, moved_low: bool) {
        if low <= high {
            self.payload_low = low;
            self.payload_high = high;
        } else if moved_low {
            self.payload_low = low;
            self.payload_high = low;
        } else {
            self.payload_low = high;
            self.payload_high = high;
        }
        self.refresh_queries();
    }

    /// Recompute the cached counts and scatter indices from the current
    /// filter values. Pure derivation, safe to call every frame.
    pub fn refresh_queries(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.counts.clear();
            self.scatter_indices.clear();
            return;
        };

        self.counts = match &self.site_filter {
            SiteFilter::AllSites => success_counts_by_site(dataset)
                .into_iter()
                .collect(),
            SiteFilter::Site(site) => outcome_counts_for_site(dataset, site)
                .into_iter()
                .map(|(outcome, n)| (outcome.to_string(), n))
                .collect(),
        };

        // Sliders keep the range clamped, so construction only fails if the
        // stored values were never initialised from a dataset.
        match PayloadRange::new(self.payload_low, self.payload_high) {
            Ok(range) => {
                self.scatter_indices = query::scatter_indices(dataset, &self.site_filter, &range);
            }
            Err(e) => {
                self.scatter_indices.clear();
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Heading for the counts chart, mirroring the selected filter.
    pub fn counts_title(&self) -> String {
        match &self.site_filter {
            SiteFilter::AllSites => "Total Successful Launches by Site".to_string(),
            SiteFilter::Site(site) => format!("Launch Outcomes for {site}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset() -> LaunchDataset {
        let record = |site: &str, payload: f64, outcome| LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            booster_category: "FT".to_string(),
        };
        LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success),
            record("B", 7000.0, Outcome::Failure),
            record("A", 3000.0, Outcome::Failure),
        ])
    }

    #[test]
    fn set_dataset_resets_filters_to_full_span() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.site_filter, SiteFilter::AllSites);
        assert_eq!(state.payload_low, 500.0);
        assert_eq!(state.payload_high, 7000.0);
        assert_eq!(state.scatter_indices, vec![0, 1, 2]);
        assert_eq!(state.counts, vec![("A".to_string(), 1)]);
    }

    #[test]
    fn site_selection_switches_counts_to_outcomes() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_site_filter(SiteFilter::Site("A".to_string()));
        assert_eq!(
            state.counts,
            vec![("Failure".to_string(), 1), ("Success".to_string(), 1)]
        );
        assert_eq!(state.scatter_indices, vec![0, 2]);
    }

    #[test]
    fn range_change_narrows_scatter() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_payload_range(0.0, 1000.0, false);
        assert_eq!(state.scatter_indices, vec![0]);
    }

    #[test]
    fn crossed_slider_ends_are_clamped() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_payload_range(5000.0, 1000.0, true);
        assert_eq!(state.payload_low, 5000.0);
        assert_eq!(state.payload_high, 5000.0);
    }

    #[test]
    fn absent_site_yields_empty_views_without_error() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_site_filter(SiteFilter::Site("Z".to_string()));
        assert!(state.counts.is_empty());
        assert!(state.scatter_indices.is_empty());
        assert!(state.status_message.is_none());
    }
}
