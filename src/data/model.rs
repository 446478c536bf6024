use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – binary launch outcome
// ---------------------------------------------------------------------------

/// Launch outcome, stored in the dataset as the `class` column (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Parse a raw `class` value. Anything other than 0 or 1 is rejected.
    pub fn from_class(value: i64) -> Option<Outcome> {
        match value {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The numeric class value (0 or 1) used for grouping and plotting.
    pub fn class(self) -> u8 {
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
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch record (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site label (`Launch Site` column).
    pub site: String,
    /// Payload mass in kilograms (`Payload Mass (kg)` column).
    pub payload_mass_kg: f64,
    /// Booster category label (`Booster Version Category` column),
    /// used only for scatter-point colouring.
    pub booster_category: String,
    /// Launch outcome (`class` column).
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed category indices.
///
/// Immutable after construction: loaded once at startup, read on every
/// recompute, dropped at process exit. `sites` is the set of valid
/// site-selector values besides "all sites".
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launch records (rows), in file order.
    pub records: Vec<LaunchRecord>,
    /// Sorted distinct launch-site labels found in the records.
    pub sites: Vec<String>,
    /// Sorted distinct booster-category labels found in the records.
    pub booster_categories: Vec<String>,
    /// Smallest observed payload mass (0.0 when the dataset is empty).
    pub payload_min: f64,
    /// Largest observed payload mass (0.0 when the dataset is empty).
    pub payload_max: f64,
}

impl LaunchDataset {
    /// Build the derived indices from the loaded records.
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

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, payload: f64, booster: &str, class: i64) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            booster_category: booster.to_string(),
            outcome: Outcome::from_class(class).unwrap(),
        }
    }

    #[test]
    fn outcome_parses_only_binary_classes() {
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(2), None);
        assert_eq!(Outcome::from_class(-1), None);
    }

    #[test]
    fn dataset_derives_sorted_distinct_categories() {
        let ds = LaunchDataset::from_records(vec![
            record("KSC LC-39A", 5000.0, "FT", 1),
            record("CCAFS LC-40", 2000.0, "v1.0", 0),
            record("KSC LC-39A", 3500.0, "B5", 1),
        ]);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(ds.booster_categories, vec!["B5", "FT", "v1.0"]);
        assert_eq!(ds.payload_min, 2000.0);
        assert_eq!(ds.payload_max, 5000.0);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_has_zero_payload_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.sites.is_empty());
        assert_eq!(ds.payload_min, 0.0);
        assert_eq!(ds.payload_max, 0.0);
    }
}
