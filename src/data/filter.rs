use std::fmt;

use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Current value of the site selector: every site, or a single site label.
///
/// A label that does not occur in the dataset is not an error; it simply
/// matches no rows, so downstream charts degrade to empty ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    /// Whether a record with the given site label passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(name) => name == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(name) => write!(f, "{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload-mass interval in kilograms.
///
/// Invariant `min <= max` is maintained by the control layer (see
/// [`PayloadRange::normalized`]); the filter itself just evaluates the
/// interval as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub min: f64,
    pub max: f64,
}

impl PayloadRange {
    /// The selector's default span of 0 to 10 000 kg.
    pub const DEFAULT: PayloadRange = PayloadRange {
        min: 0.0,
        max: 10_000.0,
    };

    pub fn new(min: f64, max: f64) -> Self {
        PayloadRange { min, max }.normalized()
    }

    /// Swap the bounds if a misbehaving control handed them in reverse.
    pub fn normalized(self) -> Self {
        if self.min <= self.max {
            self
        } else {
            PayloadRange {
                min: self.max,
                max: self.min,
            }
        }
    }

    /// Inclusive on both ends: a mass exactly equal to a bound is inside.
    pub fn contains(&self, mass_kg: f64) -> bool {
        mass_kg >= self.min && mass_kg <= self.max
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Combined selection state
// ---------------------------------------------------------------------------

/// The full control-surface state: site selector plus payload range.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            site: SiteSelection::All,
            payload: PayloadRange::DEFAULT,
        }
    }
}

/// Return indices of records that pass both the site and payload filters.
///
/// Point order is dataset row order; no sorting is applied.
pub fn filtered_indices(dataset: &LaunchDataset, selection: &Selection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            selection.payload.contains(rec.payload_mass_kg) && selection.site.matches(&rec.site)
        })
        .map(|(i, _)| i)
        .collect()
}
