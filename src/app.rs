use tokio::sync::mpsc;

use crate::config::SheetSource;
use crate::data::{model, parser};
use crate::fetch::{FetchError, SheetFetcher};
use crate::state::{AppState, SheetEvent, SheetTable};

// ---------------------------------------------------------------------------
// Coordinating loop
// ---------------------------------------------------------------------------

/// Fetch every configured sheet and apply the results to the state.
///
/// One task per sheet, all spawned up front with no ordering or concurrency
/// cap between them; each sends exactly one completion event. The single
/// drain loop below is the only place events touch the state, so slots are
/// replaced atomically and a failed sheet cannot disturb the others.
pub async fn load_sheets(fetcher: &SheetFetcher, sources: &[SheetSource], state: &mut AppState) {
    let epoch = state.begin_load(sources.iter().map(|s| s.name.as_str()));
    let (tx, mut rx) = mpsc::unbounded_channel();

    for source in sources.iter().cloned() {
        let fetcher = fetcher.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = load_one(&fetcher, &source).await;
            // Receiver may already be gone; the result is discarded either way.
            let _ = tx.send(SheetEvent { sheet: source.name, epoch, outcome });
        });
    }
    drop(tx);

    while let Some(event) = rx.recv().await {
        state.apply(event);
    }
}

async fn load_one(fetcher: &SheetFetcher, source: &SheetSource) -> Result<SheetTable, FetchError> {
    let fetched = fetcher.fetch(source).await?;
    let rows = model::normalize_rows(parser::parse_csv(&fetched.text));
    log::info!("sheet '{}': {} rows via {}", source.name, rows.len(), fetched.url);
    Ok(SheetTable { rows, source_url: fetched.url.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SheetSlot;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // 13 columns: projected item/name/value live at indices 10..=12.
    fn csv_line(item: &str, name: &str, value: &str) -> String {
        format!(",,,,,,,,,,{item},{name},{value}\n")
    }

    #[tokio::test]
    async fn mixed_outcomes_fill_their_own_slots() {
        let server = MockServer::start().await;
        let body = format!("{}{}", csv_line("Item", "Name", "Score"), csv_line("sword", "Cloud", "91"));
        Mock::given(method("GET"))
            .and(path("/gviz/tq"))
            .and(query_param("sheet", "Weapons"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        // Every other request (all "Armor" candidates) fails.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = SheetFetcher::with_base_url(server.uri()).unwrap();
        let sources = vec![
            SheetSource { name: "Weapons".to_string(), gid: None },
            SheetSource { name: "Armor".to_string(), gid: None },
        ];
        let mut state = AppState::default();

        load_sheets(&fetcher, &sources, &mut state).await;

        assert_eq!(state.pending(), 0);
        match state.slot("Weapons") {
            Some(SheetSlot::Ready(table)) => {
                assert_eq!(table.rows.len(), 1);
                assert_eq!(table.rows[0].item(), "sword");
                assert!(table.source_url.contains("/gviz/tq"));
            }
            other => panic!("unexpected slot: {other:?}"),
        }
        match state.slot("Armor") {
            Some(SheetSlot::Failed(msg)) => assert!(msg.contains("candidate URLs failed")),
            other => panic!("unexpected slot: {other:?}"),
        }
    }
}
