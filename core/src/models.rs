use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One measurement instant from the plate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,  // seconds from start, non-decreasing
    pub left: f64,  // N
    pub right: f64, // N
}

/// Which channel carries the leg under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveLeg {
    Left,
    Right,
}

/// Sparse metadata pulled from the preamble lines. Every field is optional;
/// extraction is best-effort and never fails the parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub weight: Option<String>,
    pub frequency: Option<u32>, // Hz
    pub recording_date: Option<String>,
    pub athlete_id: Option<String>,
}

// Formats seen in plate exports so far. Date-only values map to midnight.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

impl Metadata {
    /// Normalized recording date, if the raw string matches a known format.
    /// The raw string stays untouched in `recording_date`.
    pub fn recording_datetime(&self) -> Option<NaiveDateTime> {
        let raw = self.recording_date.as_deref()?.trim();

        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt);
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
                return d.and_hms_opt(0, 0, 0);
            }
        }
        None
    }
}

/// User-chosen closed interval over the sample sequence,
/// `0 <= start_index < end_index < sample count`.
///
/// The pipeline never creates one on its own; `selection::resolve_range` is
/// the constructing seam that enforces the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRange {
    pub start_index: usize,
    pub end_index: usize,
}

impl SelectedRange {
    /// Number of samples covered (closed interval, at least 2).
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Result of parsing one uploaded file.
///
/// `active_force[i]` is the active channel of `samples[i]`; both sequences
/// have the same length and index alignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub metadata: Metadata,
    pub samples: Vec<Sample>,
    pub active_leg: ActiveLeg,
    pub active_force: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_range: Option<SelectedRange>,
}

impl ParsedDocument {
    /// Time column, in row order. The range/selection helpers take this.
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    /// Recording length in seconds (0 for fewer than two samples).
    pub fn duration_secs(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => (last.time - first.time).max(0.0),
            _ => 0.0,
        }
    }
}
