use crate::data::model::Row;

// ---------------------------------------------------------------------------
// Projected-column export
// ---------------------------------------------------------------------------

/// Tab-separated `item`/`name`/`value` lines for the given visible rows,
/// suitable for pasting straight into another sheet. Projected fields are
/// trimmed single-line text by the time they reach here, so no quoting is
/// needed.
pub fn projected_tsv(rows: &[Row], indices: &[usize]) -> String {
    let mut out = String::new();
    for &i in indices {
        let row = &rows[i];
        out.push_str(row.item());
        out.push('\t');
        out.push_str(row.name());
        out.push('\t');
        out.push_str(row.value_text());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::row_with_projected;

    #[test]
    fn emits_one_line_per_visible_row_in_order() {
        let rows = vec![
            row_with_projected(2, "sword", "Cloud", "91"),
            row_with_projected(3, "staff", "Aerith", "64"),
        ];
        assert_eq!(
            projected_tsv(&rows, &[1, 0]),
            "staff\tAerith\t64\nsword\tCloud\t91\n"
        );
    }

    #[test]
    fn empty_selection_yields_empty_text() {
        let rows = vec![row_with_projected(2, "sword", "Cloud", "91")];
        assert_eq!(projected_tsv(&rows, &[]), "");
    }
}
