use super::DataSource;
use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use std::time::Duration;

/// Workbook published behind an HTTP(S) link (e.g. a shared drive download URL).
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

impl DataSource for HttpSource {
    fn key(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> AppResult<Vec<u8>> {
        let resp = self.client.get(&self.url).send()?;

        // No retry: a non-success answer ends the session.
        if !resp.status().is_success() {
            return Err(AppError::FetchStatus {
                status: resp.status().as_u16(),
                url: self.url.clone(),
            });
        }

        Ok(resp.bytes()?.to_vec())
    }
}
