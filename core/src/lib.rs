//! Force-plate core: the data pipeline behind the trial viewer.
//!
//! One uploaded CSV export goes in, a structured [`ParsedDocument`] comes
//! out: free-form metadata preamble split from the tabular section, rows
//! parsed with locale-aware decimals, the actively tested leg classified,
//! and helpers for downsampling and range selection on top. Everything past
//! a successful parse is a total, pure function over immutable data.

pub mod classifier;
pub mod downsample;
pub mod models;
pub mod parser;
pub mod range;
pub mod selection;

pub use classifier::{classify, detect_active_leg, LegScores};
pub use downsample::downsample;
pub use models::{ActiveLeg, Metadata, ParsedDocument, Sample, SelectedRange};
pub use parser::{parse_csv, parse_csv_file, write_csv, DecimalSeparator, ParseError, ParserConfig};
pub use range::{find_closest_index, format_time, parse_step, parse_time_input};
pub use selection::{resolve_range, SelectionIds};

/// String-in/string-out boundary for non-Rust hosts: parse with the default
/// config and return the whole document as one JSON payload. The error arm
/// carries the display form of the parse error.
pub fn parse_csv_json(raw: &str) -> Result<String, String> {
    let doc = parse_csv(raw, &ParserConfig::default()).map_err(|e| e.to_string())?;
    serde_json::to_string(&doc).map_err(|e| e.to_string())
}
