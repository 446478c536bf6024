use crate::chart::{ProportionSpec, ScatterSpec};
use crate::color::CategoryColors;
use crate::data::aggregate::{outcome_summary, payload_scatter};
use crate::data::filter::{PayloadRange, Selection, SiteSelection};
use crate::data::model::LaunchDataset;

/// Step granularity of the payload sliders, in kilograms.
pub const PAYLOAD_STEP_KG: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// This is the binding layer: control changes arrive through the setters
/// below, each of which re-invokes the aggregation engine for exactly the
/// charts that depend on the changed input. The site selector feeds both
/// charts; the payload range feeds only the scatter chart.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded). Never mutated once set;
    /// opening another file replaces the whole value.
    pub dataset: Option<LaunchDataset>,

    /// Current control-surface values.
    pub selection: Selection,

    /// Cached outcome proportion chart for the current selection.
    pub outcome_chart: Option<ProportionSpec>,

    /// Cached payload scatter chart for the current selection.
    pub scatter_chart: Option<ScatterSpec>,

    /// Stable booster-category colours for the loaded dataset.
    pub category_colors: Option<CategoryColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: Selection::default(),
            outcome_chart: None,
            scatter_chart: None,
            category_colors: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: reset the selection, rebuild the
    /// category colours, and compute both charts.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.category_colors = Some(CategoryColors::new(&dataset.booster_categories));

        let (lo, hi) = payload_slider_bounds(&dataset);
        self.selection = Selection {
            site: SiteSelection::All,
            payload: PayloadRange::new(
                PayloadRange::DEFAULT.min.clamp(lo, hi),
                PayloadRange::DEFAULT.max.clamp(lo, hi),
            ),
        };

        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.recompute_outcome();
        self.recompute_scatter();
    }

    /// Endpoints for the payload sliders: the observed payload span snapped
    /// outward to the step, or the default span with no dataset loaded.
    pub fn payload_slider_bounds(&self) -> (f64, f64) {
        match &self.dataset {
            Some(ds) => payload_slider_bounds(ds),
            None => (PayloadRange::DEFAULT.min, PayloadRange::DEFAULT.max),
        }
    }

    /// Site selector changed: both charts depend on it.
    pub fn set_site(&mut self, site: SiteSelection) {
        if self.selection.site == site {
            return;
        }
        self.selection.site = site;
        self.recompute_outcome();
        self.recompute_scatter();
    }

    /// Payload range changed: only the scatter chart depends on it.
    /// Reversed bounds from the control are normalized here, before the
    /// engine sees them.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        let range = range.normalized();
        if self.selection.payload == range {
            return;
        }
        self.selection.payload = range;
        self.recompute_scatter();
    }

    fn recompute_outcome(&mut self) {
        self.outcome_chart = self
            .dataset
            .as_ref()
            .map(|ds| outcome_summary(ds, &self.selection.site));
    }

    fn recompute_scatter(&mut self) {
        self.scatter_chart = self
            .dataset
            .as_ref()
            .map(|ds| payload_scatter(ds, &self.selection.site, self.selection.payload));
    }
}

fn payload_slider_bounds(dataset: &LaunchDataset) -> (f64, f64) {
    if dataset.is_empty() {
        return (PayloadRange::DEFAULT.min, PayloadRange::DEFAULT.max);
    }
    (
        (dataset.payload_min / PAYLOAD_STEP_KG).floor() * PAYLOAD_STEP_KG,
        (dataset.payload_max / PAYLOAD_STEP_KG).ceil() * PAYLOAD_STEP_KG,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset() -> LaunchDataset {
        let rows = [
            ("A", 500.0, "v1", 1),
            ("A", 1500.0, "v1", 0),
            ("B", 5000.0, "v2", 1),
        ];
        LaunchDataset::from_records(
            rows.iter()
                .map(|&(site, payload, booster, class)| LaunchRecord {
                    site: site.to_string(),
                    payload_mass_kg: payload,
                    booster_category: booster.to_string(),
                    outcome: Outcome::from_class(class).unwrap(),
                })
                .collect(),
        )
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state
    }

    #[test]
    fn set_dataset_initialises_selection_and_charts() {
        let state = loaded_state();
        assert_eq!(state.selection.site, SiteSelection::All);
        assert_eq!(state.outcome_chart.as_ref().unwrap().total(), 2);
        assert_eq!(state.scatter_chart.as_ref().unwrap().points.len(), 3);
        assert!(state.category_colors.is_some());
    }

    #[test]
    fn slider_bounds_snap_to_step() {
        let state = loaded_state();
        assert_eq!(state.payload_slider_bounds(), (0.0, 5000.0));

        let empty = AppState::default();
        assert_eq!(empty.payload_slider_bounds(), (0.0, 10_000.0));
    }

    #[test]
    fn site_change_recomputes_both_charts() {
        let mut state = loaded_state();
        state.set_site(SiteSelection::Site("B".to_string()));

        let outcome = state.outcome_chart.as_ref().unwrap();
        assert_eq!(outcome.title, "Total Success Launches for site B");
        assert_eq!(state.scatter_chart.as_ref().unwrap().points.len(), 1);
    }

    #[test]
    fn payload_change_recomputes_only_the_scatter_chart() {
        let mut state = loaded_state();
        let outcome_before = state.outcome_chart.clone();

        state.set_payload_range(PayloadRange::new(0.0, 1000.0));

        assert_eq!(state.outcome_chart, outcome_before);
        assert_eq!(state.scatter_chart.as_ref().unwrap().points.len(), 1);
    }

    #[test]
    fn reversed_range_from_control_is_normalized() {
        let mut state = loaded_state();
        state.set_payload_range(PayloadRange {
            min: 4000.0,
            max: 1000.0,
        });
        assert_eq!(state.selection.payload, PayloadRange::new(1000.0, 4000.0));
    }
}
