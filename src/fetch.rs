use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use crate::config::SheetSource;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("building candidate URL: {0}")]
    BadUrl(String),

    #[error("GET {url}: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url}: HTTP {status}")]
    Status { url: Url, status: StatusCode },

    #[error("sheet '{sheet}': all {attempts} candidate URLs failed; last error: {last}")]
    Exhausted {
        sheet: String,
        attempts: usize,
        last: Box<FetchError>,
    },
}

// ---------------------------------------------------------------------------
// Sheet fetcher
// ---------------------------------------------------------------------------

/// CSV body of a successfully fetched sheet and the candidate that won.
#[derive(Debug, Clone)]
pub struct FetchedSheet {
    pub text: String,
    pub url: Url,
}

/// Fetches published sheets as CSV, trying the known export endpoint shapes
/// in order until one answers with a success status. One pass, no retries,
/// transport-default timeouts.
#[derive(Debug, Clone)]
pub struct SheetFetcher {
    client: Client,
    base_url: String,
}

impl SheetFetcher {
    /// Fetcher for a published Google spreadsheet.
    pub fn for_spreadsheet(id: &str) -> Result<Self, FetchError> {
        Self::with_base_url(format!("https://docs.google.com/spreadsheets/d/{id}"))
    }

    /// Fetcher against an explicit base URL (tests point this at a local
    /// mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder().build().map_err(FetchError::Client)?;
        Ok(SheetFetcher {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Candidate export URLs for a sheet, in the order they are attempted:
    /// gviz-by-name, export-by-name, then export-by-gid and gviz-by-gid when
    /// the grid id is known.
    pub fn candidate_urls(&self, sheet: &SheetSource) -> Result<Vec<Url>, FetchError> {
        let base = &self.base_url;
        let name = sheet.name.as_str();

        let mut candidates = vec![
            Url::parse_with_params(
                &format!("{base}/gviz/tq"),
                &[("tqx", "out:csv"), ("sheet", name)],
            ),
            Url::parse_with_params(&format!("{base}/export"), &[("format", "csv"), ("sheet", name)]),
        ];
        if let Some(gid) = sheet.gid {
            let gid = gid.to_string();
            candidates.push(Url::parse_with_params(
                &format!("{base}/export"),
                &[("format", "csv"), ("gid", gid.as_str())],
            ));
            candidates.push(Url::parse_with_params(
                &format!("{base}/gviz/tq"),
                &[("tqx", "out:csv"), ("gid", gid.as_str())],
            ));
        }

        candidates
            .into_iter()
            .map(|r| r.map_err(|e| FetchError::BadUrl(e.to_string())))
            .collect()
    }

    /// Fetch one sheet, attempting each candidate in order. The first 2xx
    /// response wins; when every candidate fails, the error wraps the most
    /// recent failure.
    pub async fn fetch(&self, sheet: &SheetSource) -> Result<FetchedSheet, FetchError> {
        let candidates = self.candidate_urls(sheet)?;
        let attempts = candidates.len();
        let mut last: Option<FetchError> = None;

        for url in candidates {
            log::debug!("sheet '{}': trying {url}", sheet.name);
            match self.try_candidate(url.clone()).await {
                Ok(text) => return Ok(FetchedSheet { text, url }),
                Err(err) => {
                    log::warn!("sheet '{}': {err}", sheet.name);
                    last = Some(err);
                }
            }
        }

        Err(FetchError::Exhausted {
            sheet: sheet.name.clone(),
            attempts,
            // candidate_urls always yields at least the two by-name shapes
            last: Box::new(last.expect("at least one candidate was attempted")),
        })
    }

    async fn try_candidate(&self, url: Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Transport { url, source })
    }
}
