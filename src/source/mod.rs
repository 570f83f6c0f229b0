// SPDX-License-Identifier: MPL-2.0
//! Portfolio data source.
//!
//! The portfolio is a JSON document, optionally wrapped in a JSONP callback:
//!
//! ```text
//! callback({ "portfolio": [ { "title": "..", "images": [ { "src": "a.jpg", "alt": ".." } ] } ] });
//! ```
//!
//! It is read once at startup, either from a local file or over HTTP(S).
//! Image objects are reduced to their `src`.

pub mod preload;

use crate::error::{Result, SourceError};
use crate::gallery::{ImageRef, Item};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

/// HTTP request timeout for the portfolio document and remote images.
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with HTTP requests.
pub(crate) const USER_AGENT: &str = concat!("FolioFlip/", env!("CARGO_PKG_VERSION"));

/// Where the portfolio document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Http(String),
}

impl Source {
    /// Interprets `value` as a URL when it has an `http://` or `https://`
    /// scheme, and as a filesystem path otherwise.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Source::Http(trimmed.to_string())
        } else {
            Source::File(PathBuf::from(trimmed))
        }
    }

    /// Retrieves and decodes the portfolio.
    pub async fn fetch(&self) -> Result<Vec<Item>> {
        let text = match self {
            Source::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| SourceError::Fetch(format!("{}: {}", path.display(), e)))?,
            Source::Http(url) => fetch_text(url).await?,
        };
        let items = parse_payload(&text)?;
        tracing::info!(source = %self, items = items.len(), "portfolio loaded");
        Ok(items)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Http(url) => f.write_str(url),
        }
    }
}

/// Client shared by every request so connections are pooled.
static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Returns the HTTP client shared by the source and the preloader,
/// building it on first use.
pub(crate) fn http_client() -> Result<reqwest::Client> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()?;
    Ok(HTTP_CLIENT.get_or_init(|| client).clone())
}

async fn fetch_text(url: &str) -> Result<String> {
    let response = http_client()?.get(url).send().await?;
    if !response.status().is_success() {
        return Err(SourceError::Fetch(format!("HTTP status: {}", response.status())).into());
    }
    Ok(response.text().await?)
}

#[derive(Debug, Deserialize)]
struct Payload {
    portfolio: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    images: Vec<RawImage>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    src: String,
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        Item {
            title: raw.title,
            body: raw.body,
            images: raw.images.into_iter().map(|image| ImageRef::new(image.src)).collect(),
        }
    }
}

/// Decodes a portfolio document, stripping a JSONP wrapper when present.
pub fn parse_payload(text: &str) -> Result<Vec<Item>> {
    let payload: Payload = serde_json::from_str(strip_jsonp(text))?;
    Ok(payload.portfolio.into_iter().map(Item::from).collect())
}

/// Returns the JSON body of a `callback(...)` wrapper, or `text` unchanged.
fn strip_jsonp(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }
    match (trimmed.find('('), trimmed.rfind(')')) {
        (Some(open), Some(close)) if open < close => trimmed[open + 1..close].trim(),
        _ => trimmed,
    }
}
