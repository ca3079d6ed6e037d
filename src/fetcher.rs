/*!
 * Glossary page retrieval.
 *
 * Every term marker triggers exactly one `fetch` of its glossary page path.
 * Implementations:
 * - `HttpFetcher`: GET against the site origin
 * - `FileFetcher`: reads the page from a local build directory
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::fmt::Debug;
use std::path::PathBuf;
use url::Url;

use crate::app_config::FetchConfig;
use crate::errors::FetchError;

/// Common trait for all glossary page sources
///
/// This trait defines the interface that all fetcher implementations must follow,
/// allowing them to be used interchangeably by the augmenter.
#[async_trait]
pub trait PageFetcher: Send + Sync + Debug {
    /// Retrieve the HTML source of the page at `path`
    ///
    /// # Arguments
    /// * `path` - Absolute path component of the glossary page URL
    ///
    /// # Returns
    /// * `Result<String, FetchError>` - The page body or an error
    async fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Box<T> {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        (**self).fetch(path).await
    }
}

/// Fetches glossary pages over HTTP from the site origin
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    /// Site URL paths are resolved against
    site_url: Url,
    /// HTTP client for making requests
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher for the site served at `site_url`
    pub fn new(site_url: Url, config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { site_url, client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self
            .site_url
            .join(path)
            .map_err(|e| FetchError::InvalidPath(format!("{}: {}", path, e)))?;

        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                path: path.to_string(),
                status_code: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// Reads glossary pages from a local documentation build
#[derive(Debug, Clone)]
pub struct FileFetcher {
    /// Build output directory that corresponds to the site URL
    root: PathBuf,
    /// Path prefix of the site URL, always ending in '/'
    base_path: String,
}

impl FileFetcher {
    /// Create a fetcher that maps paths under `site_url` onto `root`
    pub fn new(root: impl Into<PathBuf>, site_url: &Url) -> Self {
        let mut base_path = site_url.path().to_string();
        if !base_path.ends_with('/') {
            base_path.push('/');
        }
        Self {
            root: root.into(),
            base_path,
        }
    }

    /// Local file that serves `path`
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = if path == self.base_path.trim_end_matches('/') {
            ""
        } else {
            path.strip_prefix(self.base_path.as_str())
                .ok_or_else(|| FetchError::InvalidPath(path.to_string()))?
        };

        if relative.split('/').any(|segment| segment == "..") {
            return Err(FetchError::InvalidPath(path.to_string()));
        }

        let candidate = self.root.join(relative);
        if relative.is_empty() || relative.ends_with('/') {
            return Ok(candidate.join("index.html"));
        }
        if candidate.extension().is_none() && !candidate.is_file() {
            let directory_index = candidate.join("index.html");
            if directory_index.is_file() {
                return Ok(directory_index);
            }
            return Ok(candidate.with_extension("html"));
        }
        Ok(candidate)
    }
}

#[async_trait]
impl PageFetcher for FileFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let file = self.resolve(path)?;
        debug!("Reading {:?} for {}", file, path);

        tokio::fs::read_to_string(&file).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => FetchError::Body {
                path: path.to_string(),
                message: e.to_string(),
            },
            _ => FetchError::RequestFailed {
                path: path.to_string(),
                message: format!("{}: {}", file.display(), e),
            },
        })
    }
}
