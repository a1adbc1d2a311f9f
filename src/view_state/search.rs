//! Nearest-value search over sorted offsets.

/// Index of the entry in `values` closest to `query`.
///
/// `values` must be non-decreasing. Runs in O(log n).
///
/// Ties resolve to the lower index: a query exactly midway between two
/// entries returns the first, and among equal entries the first is returned.
/// Returns `None` only for an empty slice.
///
/// # Examples
///
/// ```
/// # use rowview::view_state::search::nearest_index;
/// let tops = [0.0, 14.0, 28.0];
/// assert_eq!(nearest_index(&tops, 20.0), Some(1));
/// assert_eq!(nearest_index(&tops, 7.0), Some(0)); // tie -> lower index
/// assert_eq!(nearest_index(&tops, 99.0), Some(2));
/// assert_eq!(nearest_index(&[], 1.0), None);
/// ```
pub fn nearest_index(values: &[f32], query: f32) -> Option<usize> {
    if values.is_empty() {
        return None;
    }

    // First entry >= query. Already the lowest index among its duplicates.
    let upper = values.partition_point(|&v| v < query);
    if upper == 0 {
        return Some(0);
    }

    let below = upper - 1;
    if upper == values.len() {
        return Some(first_equal(values, below));
    }

    let below_distance = query - values[below];
    let upper_distance = values[upper] - query;
    if below_distance <= upper_distance {
        Some(first_equal(values, below))
    } else {
        Some(upper)
    }
}

/// Lowest index holding the same value as `values[index]`.
fn first_equal(values: &[f32], index: usize) -> usize {
    let value = values[index];
    values.partition_point(|&v| v < value)
}
