// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page fetching.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::{FETCH_TIMEOUT, MAX_REDIRECTS};
use crate::error::Result;

/// Retrieves page content. `None` is the failure sentinel: anything that is
/// not a successfully fetched HTML page, for whatever reason.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> Option<String>;
}

/// Blocking HTTP fetcher with a per-request time budget and a redirect cap.
///
/// Accepts only `200 OK` responses with an HTML content type. No retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("crawldex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Option<String> {
        let response = match self.client.get(url.as_str()).send() {
            Ok(response) => response,
            Err(e) => {
                debug!(%url, error = %e, "fetch failed");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!(%url, status = %response.status(), "fetch rejected");
            return None;
        }
        if !is_html(response.headers()) {
            debug!(%url, "not an HTML page");
            return None;
        }

        response
            .text()
            .map_err(|e| debug!(%url, error = %e, "failed to read body"))
            .ok()
    }
}

fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().to_ascii_lowercase().starts_with("text/html"))
}
