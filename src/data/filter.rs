use super::model::Row;

// ---------------------------------------------------------------------------
// Free-text row filter
// ---------------------------------------------------------------------------

/// Return indices of rows matching the free-text query.
///
/// The query is trimmed and case-folded first; an empty query keeps every
/// row in its original order. A row matches when the query is a substring of
/// its `item` or `name` projected field; auxiliary cells are not searched,
/// so a match in a bookkeeping column never pulls a row in.
/// Rows are never mutated; callers index back into the same slice.
pub fn filter_indices(rows: &[Row], query: &str) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return (0..rows.len()).collect();
    }

    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            row.item().to_lowercase().contains(&query)
                || row.name().to_lowercase().contains(&query)
        })
        .map(|(i, _)| i)
        .collect()
}
