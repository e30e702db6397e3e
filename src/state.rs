use std::collections::BTreeMap;

use crate::data::filter::filter_indices;
use crate::data::model::Row;
use crate::data::sort::{SortSpec, sorted_indices};
use crate::fetch::FetchError;

// ---------------------------------------------------------------------------
// Per-sheet slots
// ---------------------------------------------------------------------------

/// Rows of one loaded sheet plus the candidate URL that produced them.
#[derive(Debug, Clone)]
pub struct SheetTable {
    pub rows: Vec<Row>,
    pub source_url: String,
}

/// Load state of one sheet. A slot in `Failed` or `Loading` never affects
/// any other sheet.
#[derive(Debug)]
pub enum SheetSlot {
    Loading,
    Ready(SheetTable),
    Failed(String),
}

/// Completion of one sheet's fetch task. Carries the epoch the task was
/// spawned under so results of a superseded load cycle can be recognized.
#[derive(Debug)]
pub struct SheetEvent {
    pub sheet: String,
    pub epoch: u64,
    pub outcome: Result<SheetTable, FetchError>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full view state: one slot per sheet, the active filter query, and the
/// optional sort spec. All mutation goes through [`begin_load`] and
/// [`apply`], so each slot is replaced wholesale and exactly once per event.
///
/// [`begin_load`]: AppState::begin_load
/// [`apply`]: AppState::apply
#[derive(Debug, Default)]
pub struct AppState {
    sheets: BTreeMap<String, SheetSlot>,
    epoch: u64,
    pub filter: String,
    pub sort: Option<SortSpec>,
}

impl AppState {
    /// Start a load cycle for the named sheets: every slot resets to
    /// `Loading` and the epoch advances, which turns completions of any
    /// earlier cycle into no-ops. Returns the epoch the new tasks must
    /// stamp their events with.
    pub fn begin_load<'a, I>(&mut self, names: I) -> u64
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.epoch += 1;
        self.sheets.clear();
        for name in names {
            self.sheets.insert(name.to_string(), SheetSlot::Loading);
        }
        self.epoch
    }

    /// Apply one completion event. Stale events (wrong epoch) are discarded
    /// without touching any slot; the in-flight request they came from was
    /// never aborted, only its result is dropped.
    pub fn apply(&mut self, event: SheetEvent) {
        if event.epoch != self.epoch {
            log::debug!("discarding stale result for sheet '{}'", event.sheet);
            return;
        }
        let slot = match event.outcome {
            Ok(table) => SheetSlot::Ready(table),
            Err(err) => SheetSlot::Failed(err.to_string()),
        };
        self.sheets.insert(event.sheet, slot);
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn slot(&self, name: &str) -> Option<&SheetSlot> {
        self.sheets.get(name)
    }

    /// Number of sheets still loading.
    pub fn pending(&self) -> usize {
        self.sheets
            .values()
            .filter(|slot| matches!(slot, SheetSlot::Loading))
            .count()
    }

    /// Indices of the sheet's rows that survive the current filter, ordered
    /// by the current sort spec. Recomputed from scratch on every call;
    /// nothing is cached. Empty for sheets that are not `Ready`.
    pub fn visible_indices(&self, name: &str) -> Vec<usize> {
        let Some(SheetSlot::Ready(table)) = self.sheets.get(name) else {
            return Vec::new();
        };
        let indices = filter_indices(&table.rows, &self.filter);
        match self.sort {
            Some(spec) => sorted_indices(&table.rows, &indices, spec),
            None => indices,
        }
    }
}
