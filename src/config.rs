use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sheet list config
// ---------------------------------------------------------------------------

/// One sheet to load: the tab name used by the by-name export endpoints,
/// plus the numeric grid id when known (unlocks two more candidate URLs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gid: Option<u64>,
}

/// JSON config: the published spreadsheet plus the sheets to show.
///
/// ```json
/// {
///   "spreadsheet_id": "1AbC...",
///   "sheets": [
///     { "name": "Weapons" },
///     { "name": "Armor", "gid": 1837553045 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub spreadsheet_id: String,
    pub sheets: Vec<SheetSource>,
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: AppConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;

    if config.spreadsheet_id.trim().is_empty() {
        bail!("config {}: spreadsheet_id is empty", path.display());
    }
    if config.sheets.is_empty() {
        bail!("config {}: no sheets listed", path.display());
    }
    Ok(config)
}
