//! Google Sheets row store client.
//!
//! Thin wrapper over the Sheets v4 REST API exposing the row operations the
//! bot needs: fetch all rows, append, update a cell, delete a row, plus a
//! recovery probe. Reads go through a short-TTL cache; every mutation
//! invalidates it before returning. Transient HTTP failures (429/5xx,
//! transport errors) are retried with exponential backoff and jitter.

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::config::Config;

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF_MS: u64 = 500;

/// Columns A..G hold one booking per row.
const ROW_RANGE: &str = "A:G";

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

struct CachedRows {
    fetched_at: Instant,
    rows: Vec<Vec<String>>,
}

pub struct SheetsClient {
    http: reqwest::Client,
    spreadsheet_id: String,
    sheet_name: String,
    sheet_gid: u64,
    api_token: String,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedRows>>,
}

impl SheetsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            sheet_name: config.sheet_name.clone(),
            sheet_gid: config.sheet_gid,
            api_token: config.sheets_api_token.clone(),
            cache_ttl: Duration::from_secs(config.sheets_cache_ttl_secs),
            cache: Mutex::new(None),
        }
    }

    /// All rows of the sheet, header included, served from the read cache
    /// when it is still fresh.
    pub async fn get_all_rows(&self) -> Result<Vec<Vec<String>>> {
        {
            let cache = self.cache.lock().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < self.cache_ttl {
                    debug!("Serving {} rows from cache", cached.rows.len());
                    return Ok(cached.rows.clone());
                }
            }
        }

        let rows = self.fetch_rows().await?;

        let mut cache = self.cache.lock().await;
        *cache = Some(CachedRows {
            fetched_at: Instant::now(),
            rows: rows.clone(),
        });

        Ok(rows)
    }

    /// Append one booking row at the bottom of the sheet.
    pub async fn append_row(&self, fields: &[String]) -> Result<()> {
        let url = format!(
            "{}/{}/values/{}!{}:append",
            API_BASE, self.spreadsheet_id, self.sheet_name, ROW_RANGE
        );
        let body = json!({ "values": [fields] });

        self.send_with_retry(
            || {
                self.http
                    .post(&url)
                    .query(&[("valueInputOption", "RAW")])
                    .json(&body)
            },
            "append row",
        )
        .await?;

        self.invalidate_cache().await;
        info!("Appended row to sheet");
        Ok(())
    }

    /// Overwrite a single cell; `row` and `col` are 1-based.
    pub async fn update_cell(&self, row: usize, col: usize, value: &str) -> Result<()> {
        let url = format!(
            "{}/{}/values/{}!{}{}",
            API_BASE,
            self.spreadsheet_id,
            self.sheet_name,
            column_letter(col),
            row
        );
        let body = json!({ "values": [[value]] });

        self.send_with_retry(
            || {
                self.http
                    .put(&url)
                    .query(&[("valueInputOption", "RAW")])
                    .json(&body)
            },
            "update cell",
        )
        .await?;

        self.invalidate_cache().await;
        info!("Updated cell at row {}, col {}", row, col);
        Ok(())
    }

    /// Physically remove a row; `row` is 1-based, header included.
    pub async fn delete_row(&self, row: usize) -> Result<()> {
        let url = format!("{}/{}:batchUpdate", API_BASE, self.spreadsheet_id);
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": self.sheet_gid,
                        "dimension": "ROWS",
                        "startIndex": row - 1,
                        "endIndex": row
                    }
                }
            }]
        });

        self.send_with_retry(|| self.http.post(&url).json(&body), "delete row")
            .await?;

        self.invalidate_cache().await;
        info!("Deleted sheet row {}", row);
        Ok(())
    }

    /// Recovery call used by the admin refresh action: drop the cache and
    /// probe the store with a fresh read.
    pub async fn refresh_connection(&self) -> Result<()> {
        self.invalidate_cache().await;
        let rows = self.get_all_rows().await.context("Store probe failed")?;
        info!("Store connection verified, {} rows visible", rows.len());
        Ok(())
    }

    pub async fn invalidate_cache(&self) {
        let mut cache = self.cache.lock().await;
        *cache = None;
    }

    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>> {
        let url = format!(
            "{}/{}/values/{}!{}",
            API_BASE, self.spreadsheet_id, self.sheet_name, ROW_RANGE
        );

        let response = self
            .send_with_retry(|| self.http.get(&url), "fetch rows")
            .await?;

        let parsed: ValuesResponse = response
            .json()
            .await
            .context("Failed to decode sheet values response")?;

        debug!("Fetched {} rows from sheet", parsed.values.len());
        Ok(parsed.values)
    }

    /// Send a request, retrying transient failures with exponential backoff
    /// plus random jitter.
    async fn send_with_retry<F>(&self, build: F, what: &str) -> Result<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = build().bearer_auth(&self.api_token).send().await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    let retryable = status.as_u16() == 429 || status.is_server_error();
                    if !retryable || attempt >= MAX_ATTEMPTS {
                        let body = response.text().await.unwrap_or_default();
                        return Err(anyhow!(
                            "Sheets API {} failed with {}: {}",
                            what,
                            status,
                            body
                        ));
                    }
                    warn!(
                        "Sheets API {} returned {}, retrying (attempt {}/{})",
                        what, status, attempt, MAX_ATTEMPTS
                    );
                }
                Err(e) => {
                    if attempt >= MAX_ATTEMPTS {
                        return Err(anyhow!("Sheets API {} failed: {}", what, e));
                    }
                    warn!(
                        "Sheets API {} transport error, retrying (attempt {}/{}): {}",
                        what, attempt, MAX_ATTEMPTS, e
                    );
                }
            }

            let jitter = rand::thread_rng().gen_range(0..250);
            let delay = BASE_BACKOFF_MS * 2u64.pow(attempt - 1) + jitter;
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

/// 1-based column index to its A1 letter form.
fn column_letter(mut col: usize) -> String {
    let mut letters = String::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    letters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(6), "F");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
    }
}
