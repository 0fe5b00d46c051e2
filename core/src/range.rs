// core/src/range.rs
//
// Pure helpers behind the range selection controls. All total: invalid user
// input maps to None/0, never to a panic.

/// Index of the element closest to `value` in an ascending slice.
///
/// Binary search for the insertion point, then the immediate predecessor is
/// compared; equal distances resolve to the predecessor. Values above the
/// range clamp to the last index. Empty slice -> 0 (defined degenerate case;
/// callers guard zero-length data separately). O(log n).
pub fn find_closest_index(sorted: &[f64], value: f64) -> usize {
    if sorted.is_empty() {
        return 0;
    }

    let idx = sorted
        .partition_point(|&t| t < value)
        .min(sorted.len() - 1);
    if idx == 0 {
        return 0;
    }

    let prev = idx - 1;
    if (sorted[idx] - value).abs() < (sorted[prev] - value).abs() {
        idx
    } else {
        prev
    }
}

/// Parse a user-entered time value, accepting comma or dot decimals.
/// `None` on garbage; recoverable validation, not a pipeline error.
pub fn parse_time_input(text: &str) -> Option<f64> {
    let normalized = text.trim().replacen(',', ".", 1);
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a step count for the nudge buttons; magnitude only, 0 on garbage.
pub fn parse_step(text: &str) -> usize {
    text.trim()
        .parse::<i64>()
        .map(|v| v.unsigned_abs() as usize)
        .unwrap_or(0)
}

/// Display form of a time value in the range inputs.
pub fn format_time(time: f64) -> String {
    format!("{time:.3}")
}
