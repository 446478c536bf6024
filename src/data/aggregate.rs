use std::collections::BTreeMap;

use crate::chart::{ProportionSpec, ScatterPoint, ScatterSpec, Segment};

use super::filter::{filtered_indices, PayloadRange, Selection, SiteSelection};
use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Aggregation engine: (dataset, selection) → chart specs
// ---------------------------------------------------------------------------
//
// Both functions are pure and total: any structurally valid input yields a
// chart spec, possibly a degenerate one with no segments or points. A site
// label absent from the dataset just filters every row out.

/// Build the outcome proportion chart for the current site selection.
///
/// With every site selected, each site becomes one segment sized by the sum
/// of its rows' class values, i.e. the count of its successful launches
/// (failures contribute 0). With a single site selected, the chart has
/// exactly two segments, `0` and `1`, sized by that site's failure and
/// success counts.
pub fn outcome_summary(dataset: &LaunchDataset, site: &SiteSelection) -> ProportionSpec {
    match site {
        SiteSelection::All => {
            let mut successes_by_site: BTreeMap<&str, u64> = BTreeMap::new();
            for rec in &dataset.records {
                *successes_by_site.entry(rec.site.as_str()).or_default() +=
                    u64::from(rec.outcome.class());
            }
            ProportionSpec {
                title: "Total Success Launches by Site".to_string(),
                segments: successes_by_site
                    .into_iter()
                    .map(|(site, value)| Segment {
                        label: site.to_string(),
                        value,
                    })
                    .collect(),
            }
        }
        SiteSelection::Site(name) => {
            let mut failures = 0u64;
            let mut successes = 0u64;
            for rec in dataset.records.iter().filter(|r| r.site == *name) {
                if rec.outcome.is_success() {
                    successes += 1;
                } else {
                    failures += 1;
                }
            }
            ProportionSpec {
                title: format!("Total Success Launches for site {name}"),
                segments: vec![
                    Segment {
                        label: "0".to_string(),
                        value: failures,
                    },
                    Segment {
                        label: "1".to_string(),
                        value: successes,
                    },
                ],
            }
        }
    }
}

/// Build the payload/outcome scatter chart for the current selection.
///
/// One point per record whose payload mass lies inside the inclusive range
/// and whose site passes the selector: x is the payload mass, y the class
/// value, category the booster version. Points keep dataset row order.
pub fn payload_scatter(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    payload: PayloadRange,
) -> ScatterSpec {
    let selection = Selection {
        site: site.clone(),
        payload,
    };

    let title = match site {
        SiteSelection::All => "Correlation between Payload and Success for All Sites".to_string(),
        SiteSelection::Site(name) => {
            format!("Correlation between Payload and Success for site {name}")
        }
    };

    ScatterSpec {
        title,
        x_label: "Payload Mass (kg)".to_string(),
        y_label: "Class".to_string(),
        points: filtered_indices(dataset, &selection)
            .into_iter()
            .map(|i| {
                let rec = &dataset.records[i];
                ScatterPoint {
                    x: rec.payload_mass_kg,
                    y: f64::from(rec.outcome.class()),
                    category: rec.booster_category.clone(),
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn site(name: &str) -> SiteSelection {
        SiteSelection::Site(name.to_string())
    }

    /// The three-row fixture used throughout: two launches from site A
    /// (one success at 500 kg, one failure at 1500 kg) and one successful
    /// 5000 kg launch from site B.
    fn dataset() -> LaunchDataset {
        let rows = [
            ("A", 500.0, "v1", 1),
            ("A", 1500.0, "v1", 0),
            ("B", 5000.0, "v2", 1),
        ];
        LaunchDataset::from_records(
            rows.iter()
                .map(|&(s, payload, booster, class)| LaunchRecord {
                    site: s.to_string(),
                    payload_mass_kg: payload,
                    booster_category: booster.to_string(),
                    outcome: Outcome::from_class(class).unwrap(),
                })
                .collect(),
        )
    }

    fn segment_value(spec: &ProportionSpec, label: &str) -> u64 {
        spec.segments
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.value)
            .unwrap()
    }

    #[test]
    fn all_sites_summary_counts_successes_per_site() {
        let spec = outcome_summary(&dataset(), &SiteSelection::All);
        assert_eq!(spec.title, "Total Success Launches by Site");
        assert_eq!(spec.segments.len(), 2);
        assert_eq!(segment_value(&spec, "A"), 1);
        assert_eq!(segment_value(&spec, "B"), 1);
    }

    #[test]
    fn all_sites_summary_attributes_each_success_to_one_site() {
        let ds = dataset();
        let spec = outcome_summary(&ds, &SiteSelection::All);
        let total_successes = ds
            .records
            .iter()
            .filter(|r| r.outcome.is_success())
            .count() as u64;
        assert_eq!(spec.total(), total_successes);
    }

    #[test]
    fn single_site_summary_has_two_labeled_segments() {
        let ds = dataset();
        let spec = outcome_summary(&ds, &site("A"));
        assert_eq!(spec.title, "Total Success Launches for site A");
        assert_eq!(spec.segments.len(), 2);
        assert_eq!(segment_value(&spec, "0"), 1);
        assert_eq!(segment_value(&spec, "1"), 1);

        // The two segments partition the site's rows.
        let site_rows = ds.records.iter().filter(|r| r.site == "A").count() as u64;
        assert_eq!(spec.total(), site_rows);
    }

    #[test]
    fn unknown_site_summary_is_degenerate_not_an_error() {
        let spec = outcome_summary(&dataset(), &site("Z"));
        assert_eq!(spec.segments.len(), 2);
        assert_eq!(spec.total(), 0);
    }

    #[test]
    fn scatter_keeps_one_point_per_surviving_row() {
        let spec = payload_scatter(&dataset(), &SiteSelection::All, PayloadRange::DEFAULT);
        assert_eq!(spec.points.len(), 3);
        assert_eq!(spec.points[0].x, 500.0);
        assert_eq!(spec.points[0].y, 1.0);
        assert_eq!(spec.points[0].category, "v1");
        assert_eq!(spec.points[1].x, 1500.0);
        assert_eq!(spec.points[1].y, 0.0);
        assert_eq!(spec.points[2].x, 5000.0);
        assert_eq!(spec.points[2].category, "v2");
        assert!(spec.points.iter().all(|p| p.y == 0.0 || p.y == 1.0));
    }

    #[test]
    fn scatter_range_filter_is_inclusive_at_both_bounds() {
        let ds = dataset();

        let narrow = payload_scatter(&ds, &SiteSelection::All, PayloadRange::new(0.0, 1000.0));
        assert_eq!(narrow.points.len(), 1);
        assert_eq!(narrow.points[0].x, 500.0);

        // Bounds landing exactly on record masses still include them.
        let exact = payload_scatter(&ds, &SiteSelection::All, PayloadRange::new(500.0, 5000.0));
        assert_eq!(exact.points.len(), 3);
    }

    #[test]
    fn scatter_restricts_to_selected_site() {
        let spec = payload_scatter(&dataset(), &site("B"), PayloadRange::DEFAULT);
        assert_eq!(spec.points.len(), 1);
        assert_eq!(spec.points[0].x, 5000.0);
        assert_eq!(spec.points[0].y, 1.0);
        assert_eq!(spec.points[0].category, "v2");
        assert_eq!(spec.title, "Correlation between Payload and Success for site B");
    }

    #[test]
    fn scatter_with_no_matches_is_empty_not_an_error() {
        let ds = dataset();
        assert!(payload_scatter(&ds, &site("Z"), PayloadRange::DEFAULT)
            .points
            .is_empty());
        assert!(
            payload_scatter(&ds, &SiteSelection::All, PayloadRange::new(6000.0, 7000.0))
                .points
                .is_empty()
        );
    }

    #[test]
    fn empty_dataset_degrades_everywhere() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert_eq!(outcome_summary(&ds, &SiteSelection::All).total(), 0);
        assert_eq!(outcome_summary(&ds, &site("A")).total(), 0);
        assert!(
            payload_scatter(&ds, &SiteSelection::All, PayloadRange::DEFAULT)
                .points
                .is_empty()
        );
    }
}
