// core/src/parser.rs
use std::path::Path;

use log::{debug, info, warn};
use thiserror::Error;

use crate::classifier::detect_active_leg;
use crate::models::{ActiveLeg, Metadata, ParsedDocument, Sample};

/// Metadata key-value pairs are only looked for this far into the file.
pub const METADATA_SCAN_LINES: usize = 10;

#[derive(Debug, Error)]
pub enum ParseError {
    /// No line containing all of "time"/"left"/"right" was found.
    #[error("missing data header (Time,Left,Right)")]
    MissingHeader,
    /// The tabular section could not be read at all (malformed quoting etc.).
    #[error("malformed data table: {0}")]
    Table(#[from] csv::Error),
    #[error("could not read input file: {0}")]
    Io(#[from] std::io::Error),
}

/// Decimal convention of the numeric fields. Plate exports from Polish-locale
/// software write `12,34`; the core accepts either convention explicitly
/// instead of hardcoding the substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalSeparator {
    #[default]
    Comma,
    Dot,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParserConfig {
    pub decimal_separator: DecimalSeparator,
}

/// Locale-decimal text -> f64. With `Comma` the first comma is substituted by
/// a dot before parsing; dot input is always accepted.
fn parse_locale_number(field: &str, sep: DecimalSeparator) -> Option<f64> {
    let s = field.trim();
    if s.is_empty() {
        return None;
    }
    match sep {
        DecimalSeparator::Comma => s.replacen(',', ".", 1).parse::<f64>().ok(),
        DecimalSeparator::Dot => s.parse::<f64>().ok(),
    }
}

/// Strip optional surrounding quotes from a metadata value.
fn metadata_value(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}

/// Best-effort scan of the preamble for `Key,Value` pairs. Unrecognized lines
/// are skipped silently; a recognized key with a garbled value stays `None`.
fn parse_metadata(lines: &[&str]) -> Metadata {
    let mut meta = Metadata::default();

    for line in lines.iter().take(METADATA_SCAN_LINES) {
        let mut parts = line.splitn(2, ',');
        let (Some(key), Some(rest)) = (parts.next(), parts.next()) else {
            continue;
        };
        // Value is the first field after the key; trailing fields are ignored.
        let value = metadata_value(rest.split(',').next().unwrap_or(""));

        match key.trim() {
            "Weight" => meta.weight = Some(value),
            "Frequency" => meta.frequency = value.parse::<u32>().ok(),
            "Recording Date" => meta.recording_date = Some(value),
            "AthleteId" => meta.athlete_id = Some(value),
            _ => {}
        }
    }

    meta
}

/// First line containing all three column markers, case-insensitive, in any
/// order. Everything from this line on is the data table.
fn find_header_line(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let lower = line.to_lowercase();
        lower.contains("time") && lower.contains("left") && lower.contains("right")
    })
}

/// Column position for `name` in the header row. Exact (case-insensitive)
/// match first; substring fallback covers headers like `Time [s]`.
///
/// Case-insensitive on purpose: the reference viewer detected the header
/// case-insensitively but then extracted fields case-sensitively, so a
/// lowercase `time,left,right` header detected fine and yielded zero rows.
fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .or_else(|| {
            headers
                .iter()
                .position(|h| h.to_lowercase().contains(name))
        })
}

/// Parse the tabular section (header line included in `lines`).
fn parse_table(lines: &[&str], cfg: &ParserConfig) -> Result<Vec<Sample>, ParseError> {
    let table = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(table.as_bytes());

    let headers = reader.headers()?.clone();
    let time_col = column_index(&headers, "time").ok_or(ParseError::MissingHeader)?;
    let left_col = column_index(&headers, "left").ok_or(ParseError::MissingHeader)?;
    let right_col = column_index(&headers, "right").ok_or(ParseError::MissingHeader)?;

    let sep = cfg.decimal_separator;
    let mut samples = Vec::new();
    let mut dropped = 0usize;

    for record in reader.records() {
        // Row-level failures are recovered by dropping the row; field
        // instruments commonly emit corrupt trailing lines.
        let Ok(record) = record else {
            dropped += 1;
            continue;
        };

        let time = record
            .get(time_col)
            .and_then(|f| parse_locale_number(f, sep))
            .filter(|t| t.is_finite());
        let Some(time) = time else {
            dropped += 1;
            continue;
        };

        // Missing/garbled force fields read as 0 N on an otherwise valid row.
        let left = record
            .get(left_col)
            .and_then(|f| parse_locale_number(f, sep))
            .unwrap_or(0.0);
        let right = record
            .get(right_col)
            .and_then(|f| parse_locale_number(f, sep))
            .unwrap_or(0.0);

        samples.push(Sample { time, left, right });
    }

    if dropped > 0 {
        warn!("dropped {dropped} data rows without a finite time value");
    }

    Ok(samples)
}

/// Parse one raw CSV payload into a document.
///
/// Fails only when no data header can be located (or the table is
/// unreadable); everything downstream of a successful parse is total.
/// Zero valid data rows is a valid, empty document.
pub fn parse_csv(raw: &str, cfg: &ParserConfig) -> Result<ParsedDocument, ParseError> {
    let lines: Vec<&str> = raw.lines().collect();

    let metadata = parse_metadata(&lines);

    let header_idx = find_header_line(&lines).ok_or(ParseError::MissingHeader)?;
    debug!("data header found at line {header_idx}");

    let samples = parse_table(&lines[header_idx..], cfg)?;

    let active_leg = detect_active_leg(&samples);
    let active_force = samples
        .iter()
        .map(|s| match active_leg {
            ActiveLeg::Left => s.left,
            ActiveLeg::Right => s.right,
        })
        .collect();

    Ok(ParsedDocument {
        metadata,
        samples,
        active_leg,
        active_force,
        selected_range: None,
    })
}

/// Read a file into memory and parse it. This is the single I/O boundary of
/// the pipeline; everything else operates on in-memory buffers.
pub fn parse_csv_file(path: &Path, cfg: &ParserConfig) -> Result<ParsedDocument, ParseError> {
    let raw = std::fs::read_to_string(path)?;
    let doc = parse_csv(&raw, cfg)?;
    info!(
        "parsed {} ({} samples, active leg {:?})",
        path.display(),
        doc.samples.len(),
        doc.active_leg
    );
    Ok(doc)
}

/// f64 -> shortest round-trippable text, in the configured convention.
/// Comma-decimal fields collide with the comma delimiter, so they are quoted.
fn format_locale_number(v: f64, sep: DecimalSeparator) -> String {
    let s = format!("{v}");
    match sep {
        DecimalSeparator::Comma if s.contains('.') => {
            format!("\"{}\"", s.replacen('.', ",", 1))
        }
        _ => s,
    }
}

/// Serialize samples back to a `Time,Left,Right` table using the same
/// decimal convention the parser accepts, so parse -> write -> parse is the
/// identity (within float formatting precision, which is exact here).
pub fn write_csv(samples: &[Sample], cfg: &ParserConfig) -> String {
    let sep = cfg.decimal_separator;
    let mut out = String::with_capacity(samples.len() * 24 + 16);
    out.push_str("Time,Left,Right\n");

    for s in samples {
        out.push_str(&format_locale_number(s.time, sep));
        out.push(',');
        out.push_str(&format_locale_number(s.left, sep));
        out.push(',');
        out.push_str(&format_locale_number(s.right, sep));
        out.push('\n');
    }

    out
}
