use crate::data::tier::{self, Tier};

// ---------------------------------------------------------------------------
// Projected columns
// ---------------------------------------------------------------------------

// Fixed column positions in the published sheet schema. Everything before
// them is auxiliary bookkeeping the viewer does not interpret.
pub const ITEM_COL: usize = 10;
pub const NAME_COL: usize = 11;
pub const VALUE_COL: usize = 12;

// ---------------------------------------------------------------------------
// Row – one normalized sheet row
// ---------------------------------------------------------------------------

/// A normalized sheet row: trimmed cells plus the 1-based physical position
/// the row had in the parsed sheet (header included). The position is the
/// row's stable identity within a load cycle; it never shifts when the
/// visible set is filtered or sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub position: usize,
    cells: Vec<String>,
}

impl Row {
    pub fn new(position: usize, cells: Vec<String>) -> Self {
        Row { position, cells }
    }

    /// Cell at `index`; missing trailing cells of a ragged row read as "".
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn item(&self) -> &str {
        self.cell(ITEM_COL)
    }

    pub fn name(&self) -> &str {
        self.cell(NAME_COL)
    }

    /// Raw text of the value column, before numeric interpretation.
    pub fn value_text(&self) -> &str {
        self.cell(VALUE_COL)
    }

    /// Numeric interpretation of the value column: every character except
    /// digits, `.` and `-` is stripped before parsing, so `"87.5 pts"` and
    /// `"$1,250"` both read as numbers. Non-finite or unparseable leftovers
    /// read as absent, never as an error.
    pub fn parsed_value(&self) -> Option<f64> {
        let cleaned: String = self
            .value_text()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn tier(&self) -> Tier {
        tier::classify(self.parsed_value())
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Turn freshly parsed rows into the visible row set.
///
/// * every cell is trimmed of surrounding whitespace
/// * physical row 1 (the sheet header) is dropped unconditionally
/// * rows whose three projected fields are all empty after trimming are
///   dropped, whatever their other cells hold
///
/// Positions are assigned before dropping anything, so surviving rows keep
/// the 1-based physical position they had in the sheet.
pub fn normalize_rows(raw: Vec<Vec<String>>) -> Vec<Row> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(i, cells)| {
            let position = i + 1;
            if position == 1 {
                return None;
            }
            let cells = cells
                .into_iter()
                .map(|c| c.trim().to_string())
                .collect();
            let row = Row::new(position, cells);
            if row.item().is_empty() && row.name().is_empty() && row.value_text().is_empty() {
                None
            } else {
                Some(row)
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn row_with_projected(position: usize, item: &str, name: &str, value: &str) -> Row {
    let mut cells = vec![String::new(); VALUE_COL + 1];
    cells[ITEM_COL] = item.to_string();
    cells[NAME_COL] = name.to_string();
    cells[VALUE_COL] = value.to_string();
    Row::new(position, cells)
}
