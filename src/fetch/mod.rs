use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::model::{CompanyRow, Document};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no input provided (expected a JSON URL or filename)")]
    EmptyInput,

    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("invalid endpoint URL: {endpoint}")]
    InvalidEndpoint { endpoint: String },

    #[error("invalid header, expected 'Key: Value': {header}")]
    InvalidHeader { header: String },

    #[error("network response was not ok (status {status})")]
    Network { status: u16 },

    #[error("network request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Remote(Url),
    Local(PathBuf),
}

// A bare filename goes to the configured endpoint as ?file=<name>, or
// to the local filesystem when no endpoint is set.
pub fn resolve_source(input: &str, endpoint: Option<&str>) -> Result<Source, FetchError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FetchError::EmptyInput);
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let url = Url::parse(trimmed).map_err(|_| FetchError::InvalidUrl {
            url: trimmed.to_string(),
        })?;
        return Ok(Source::Remote(url));
    }

    match endpoint.map(str::trim).filter(|e| !e.is_empty()) {
        Some(endpoint) => {
            let mut url = Url::parse(endpoint).map_err(|_| FetchError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
            })?;
            url.query_pairs_mut().append_pair("file", trimmed);
            Ok(Source::Remote(url))
        }
        None => Ok(Source::Local(PathBuf::from(trimmed))),
    }
}

#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
    pub header: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            proxy: None,
            header: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoadedTable {
    pub headers: Vec<String>,
    pub rows: Vec<CompanyRow>,
    pub base_url: Option<Url>,
}

#[derive(Clone, Debug)]
pub enum FetchOutcome {
    Table(LoadedTable),
    Empty { base_url: Option<Url> },
}

pub async fn load(source: &Source, options: &FetchOptions) -> Result<FetchOutcome, FetchError> {
    let (text, base_url) = match source {
        Source::Remote(url) => fetch_remote(url, options).await?,
        Source::Local(path) => {
            let text =
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| FetchError::FileRead {
                        path: path.display().to_string(),
                        source: e,
                    })?;
            (text, file_base_url(path))
        }
    };
    parse_outcome(&text, base_url)
}

pub fn parse_outcome(text: &str, base_url: Option<Url>) -> Result<FetchOutcome, FetchError> {
    let doc = Document::parse(text).map_err(|e| FetchError::InvalidJson { source: e })?;
    let rows = doc.rows();
    if rows.is_empty() {
        return Ok(FetchOutcome::Empty { base_url });
    }
    Ok(FetchOutcome::Table(LoadedTable {
        headers: doc.headers(),
        rows: rows.to_vec(),
        base_url,
    }))
}

async fn fetch_remote(
    url: &Url,
    options: &FetchOptions,
) -> Result<(String, Option<Url>), FetchError> {
    let client = build_client(options)?;

    let mut request = client.get(url.clone());
    if let Some((key, value)) = parse_extra_header(options.header.as_deref())? {
        request = request.header(key, value);
    }

    let resp = request
        .send()
        .await
        .map_err(|e| FetchError::Request { source: e })?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Network {
            status: status.as_u16(),
        });
    }

    // Redirects may have moved the document; relative links resolve
    // against where it actually came from.
    let base_url = resp.url().clone();
    let text = resp
        .text()
        .await
        .map_err(|e| FetchError::Request { source: e })?;
    Ok((text, Some(base_url)))
}

fn build_client(options: &FetchOptions) -> Result<reqwest::Client, FetchError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            "fleetview/",
            env!("CARGO_PKG_VERSION")
        )),
    );
    headers.insert(
        reqwest::header::CACHE_CONTROL,
        reqwest::header::HeaderValue::from_static("no-cache"),
    );

    let timeout = Duration::from_secs(options.timeout_seconds.try_into().unwrap_or(10));
    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(timeout);

    if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| FetchError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| FetchError::HttpClientBuild { source: e })
}

fn parse_extra_header(
    header: Option<&str>,
) -> Result<Option<(reqwest::header::HeaderName, reqwest::header::HeaderValue)>, FetchError> {
    let Some(header) = header.filter(|h| !h.trim().is_empty()) else {
        return Ok(None);
    };
    let invalid = || FetchError::InvalidHeader {
        header: header.to_string(),
    };
    let (key, value) = header.split_once(':').ok_or_else(invalid)?;
    let key = reqwest::header::HeaderName::from_str(key.trim()).map_err(|_| invalid())?;
    let value =
        reqwest::header::HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;
    Ok(Some((key, value)))
}

pub fn file_base_url(path: &Path) -> Option<Url> {
    let abs = std::fs::canonicalize(path).ok()?;
    Url::from_file_path(abs).ok()
}
