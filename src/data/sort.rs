use std::cmp::Ordering;

use super::model::Row;

// ---------------------------------------------------------------------------
// Sort spec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Item,
    Name,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Which column to order by and in which direction. Rebuilt per render from
/// the current view settings; it carries no identity of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: Direction,
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Return a reordered copy of `visible` per the sort spec; neither the rows
/// nor the input indices are touched.
///
/// Text keys compare case-folded strings, so `["B", "a", "C"]` sorts
/// ascending to `["a", "B", "C"]`. Rows without a parsed value compare as
/// negative infinity regardless of direction: they lead an ascending sort
/// and trail a descending one. The underlying sort is stable; relative
/// order of equal keys is not part of the contract.
pub fn sorted_indices(rows: &[Row], visible: &[usize], spec: SortSpec) -> Vec<usize> {
    let mut out = visible.to_vec();
    out.sort_by(|&a, &b| {
        let ord = compare(&rows[a], &rows[b], spec.key);
        match spec.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
    out
}

fn compare(a: &Row, b: &Row, key: SortKey) -> Ordering {
    match key {
        SortKey::Item => fold(a.item()).cmp(&fold(b.item())),
        SortKey::Name => fold(a.name()).cmp(&fold(b.name())),
        SortKey::Value => score(a).total_cmp(&score(b)),
    }
}

fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn score(row: &Row) -> f64 {
    row.parsed_value().unwrap_or(f64::NEG_INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::row_with_projected;

    fn spec(key: SortKey, direction: Direction) -> SortSpec {
        SortSpec { key, direction }
    }

    fn items<'a>(rows: &'a [Row], indices: &[usize]) -> Vec<&'a str> {
        indices.iter().map(|&i| rows[i].item()).collect()
    }

    #[test]
    fn value_descending_puts_absent_last() {
        let rows = vec![
            row_with_projected(2, "a", "", "12"),
            row_with_projected(3, "b", "", ""),
            row_with_projected(4, "c", "", "88"),
            row_with_projected(5, "d", "", "50"),
        ];
        let visible: Vec<usize> = (0..rows.len()).collect();

        let sorted = sorted_indices(&rows, &visible, spec(SortKey::Value, Direction::Descending));
        assert_eq!(items(&rows, &sorted), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn value_ascending_puts_absent_first() {
        let rows = vec![
            row_with_projected(2, "a", "", "12"),
            row_with_projected(3, "b", "", "n/a"),
            row_with_projected(4, "c", "", "88"),
        ];
        let visible: Vec<usize> = (0..rows.len()).collect();

        let sorted = sorted_indices(&rows, &visible, spec(SortKey::Value, Direction::Ascending));
        assert_eq!(items(&rows, &sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn item_ascending_is_case_insensitive() {
        let rows = vec![
            row_with_projected(2, "B", "", ""),
            row_with_projected(3, "a", "", ""),
            row_with_projected(4, "C", "", ""),
        ];
        let visible: Vec<usize> = (0..rows.len()).collect();

        let sorted = sorted_indices(&rows, &visible, spec(SortKey::Item, Direction::Ascending));
        assert_eq!(items(&rows, &sorted), vec!["a", "B", "C"]);
    }

    #[test]
    fn name_descending_reverses_text_order() {
        let rows = vec![
            row_with_projected(2, "x", "Aerith", ""),
            row_with_projected(3, "y", "Squall", ""),
            row_with_projected(4, "z", "Cloud", ""),
        ];
        let visible: Vec<usize> = (0..rows.len()).collect();

        let sorted = sorted_indices(&rows, &visible, spec(SortKey::Name, Direction::Descending));
        let names: Vec<&str> = sorted.iter().map(|&i| rows[i].name()).collect();
        assert_eq!(names, vec!["Squall", "Cloud", "Aerith"]);
    }

    #[test]
    fn input_indices_are_untouched() {
        let rows = vec![
            row_with_projected(2, "b", "", "1"),
            row_with_projected(3, "a", "", "2"),
        ];
        let visible = vec![0, 1];
        let _ = sorted_indices(&rows, &visible, spec(SortKey::Item, Direction::Ascending));
        assert_eq!(visible, vec![0, 1]);
    }

    #[test]
    fn sort_can_follow_a_filtered_subset() {
        let rows = vec![
            row_with_projected(2, "a", "", "10"),
            row_with_projected(3, "b", "", "90"),
            row_with_projected(4, "c", "", "40"),
        ];
        // Pretend filtering kept rows 0 and 2 only.
        let sorted = sorted_indices(&rows, &[0, 2], spec(SortKey::Value, Direction::Descending));
        assert_eq!(items(&rows, &sorted), vec!["c", "a"]);
    }
}
