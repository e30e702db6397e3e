mod app;
mod config;
mod data;
mod export;
mod fetch;
mod state;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::data::sort::{Direction, SortKey, SortSpec};
use crate::state::SheetSlot;

const USAGE: &str =
    "usage: sheetscore <config.json> [--filter <query>] [--sort <item|name|value>[:asc|desc]] [--export]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let options = parse_args(std::env::args().skip(1))?;
    let config = config::load_config(&options.config)?;

    let fetcher = fetch::SheetFetcher::for_spreadsheet(&config.spreadsheet_id)?;
    let mut state = state::AppState::default();
    state.filter = options.filter;
    state.sort = options.sort;

    app::load_sheets(&fetcher, &config.sheets, &mut state).await;
    if state.pending() > 0 {
        log::warn!("{} sheet(s) never completed", state.pending());
    }

    // Per-sheet reporting: a failed sheet is reported and skipped, the rest
    // print normally, and the process still exits 0.
    let names: Vec<String> = state.sheet_names().map(str::to_string).collect();
    for name in &names {
        match state.slot(name) {
            Some(SheetSlot::Ready(table)) => {
                let visible = state.visible_indices(name);
                if options.export {
                    print!("{}", export::projected_tsv(&table.rows, &visible));
                } else {
                    println!(
                        "== {name}: {} of {} rows ({}) ==",
                        visible.len(),
                        table.rows.len(),
                        table.source_url
                    );
                    for i in visible {
                        let row = &table.rows[i];
                        println!(
                            "{}\t{}\t{}\t[{}]",
                            row.item(),
                            row.name(),
                            row.value_text(),
                            row.tier()
                        );
                    }
                }
            }
            Some(SheetSlot::Failed(message)) => {
                log::error!("sheet '{name}': {message}");
                if !options.export {
                    println!("== {name}: failed: {message} ==");
                }
            }
            Some(SheetSlot::Loading) | None => {
                if !options.export {
                    println!("== {name}: still loading ==");
                }
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

struct CliOptions {
    config: PathBuf,
    filter: String,
    sort: Option<SortSpec>,
    export: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliOptions> {
    let mut config = None;
    let mut filter = String::new();
    let mut sort = None;
    let mut export = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--filter" => {
                filter = args.next().context("--filter needs a query")?;
            }
            "--sort" => {
                let spec = args.next().context("--sort needs a key")?;
                sort = Some(parse_sort_spec(&spec)?);
            }
            "--export" => export = true,
            other if config.is_none() && !other.starts_with('-') => {
                config = Some(PathBuf::from(other));
            }
            other => bail!("unexpected argument '{other}'\n{USAGE}"),
        }
    }

    Ok(CliOptions {
        config: config.context(USAGE)?,
        filter,
        sort,
        export,
    })
}

/// `item`, `name:desc`, `value:asc`, ... Direction defaults to ascending.
fn parse_sort_spec(text: &str) -> Result<SortSpec> {
    let (key_text, direction_text) = match text.split_once(':') {
        Some((key, direction)) => (key, Some(direction)),
        None => (text, None),
    };
    let key = match key_text {
        "item" => SortKey::Item,
        "name" => SortKey::Name,
        "value" => SortKey::Value,
        other => bail!("unknown sort key '{other}' (expected item, name or value)"),
    };
    let direction = match direction_text {
        None | Some("asc") => Direction::Ascending,
        Some("desc") => Direction::Descending,
        Some(other) => bail!("unknown sort direction '{other}' (expected asc or desc)"),
    };
    Ok(SortSpec { key, direction })
}
