// ---------------------------------------------------------------------------
// Chart specifications – declarative chart descriptions
// ---------------------------------------------------------------------------

/// One slice of a proportion chart: a label and its count.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: String,
    pub value: u64,
}

/// A proportion (pie) chart description, independent of any renderer.
/// Segment sizes are raw counts; the renderer derives the fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionSpec {
    pub title: String,
    pub segments: Vec<Segment>,
}

impl ProportionSpec {
    /// Sum of all segment values. Zero for a degenerate chart.
    pub fn total(&self) -> u64 {
        self.segments.iter().map(|s| s.value).sum()
    }
}

/// One scatter point: position plus the category that decides its colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub category: String,
}

/// A scatter chart description, independent of any renderer.
/// Points keep the insertion order of the filtered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}
