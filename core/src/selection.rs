// core/src/selection.rs
use crate::models::SelectedRange;
use crate::range::find_closest_index;

/// Reconcile two user-dragged time values into sample-index bounds.
///
/// Endpoint order does not matter; each endpoint snaps to the closest
/// sample. `None` when the data is empty or both endpoints snap to the same
/// index, which keeps the `start < end` invariant at the only seam where
/// ranges are created.
pub fn resolve_range(times: &[f64], a: f64, b: f64) -> Option<SelectedRange> {
    if times.is_empty() {
        return None;
    }

    let start_index = find_closest_index(times, a.min(b));
    let end_index = find_closest_index(times, a.max(b));
    if start_index == end_index {
        return None;
    }

    Some(SelectedRange {
        start_index,
        end_index,
    })
}

/// Id source for selections, owned by whichever component creates them and
/// passed explicitly (no module-scope counter). Ids are `sel-1`, `sel-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SelectionIds {
    counter: u64,
}

impl SelectionIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("sel-{}", self.counter)
    }
}
