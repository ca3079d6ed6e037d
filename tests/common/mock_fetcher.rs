/*!
 * Mock glossary fetcher
 *
 * Serves canned pages and failures without touching the network, and
 * records every path it was asked for.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

use termtip::errors::FetchError;
use termtip::fetcher::PageFetcher;

/// Canned answer for one path
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Serve this body
    Page(String),
    /// Fail with this HTTP status
    Status(u16),
    /// Fail as if the network were down
    Unreachable,
}

/// Mock implementation of a glossary page source
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: HashMap<String, MockResponse>,
    requests: Arc<Mutex<Vec<String>>>,
    barrier: Option<Arc<Barrier>>,
}

impl MockFetcher {
    /// Create a mock that knows no pages
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path`
    pub fn with_page(self, path: &str, body: &str) -> Self {
        self.with_response(path, MockResponse::Page(body.to_string()))
    }

    /// Answer `path` with `response`
    pub fn with_response(mut self, path: &str, response: MockResponse) -> Self {
        self.responses.insert(path.to_string(), response);
        self
    }

    /// Hold every fetch until `parties` fetches are in flight at once
    pub fn with_barrier(mut self, parties: usize) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    /// Shared log of requested paths
    pub fn requests(&self) -> Arc<Mutex<Vec<String>>> {
        self.requests.clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(path.to_string());

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        match self.responses.get(path) {
            Some(MockResponse::Page(body)) => Ok(body.clone()),
            Some(MockResponse::Status(status_code)) => Err(FetchError::HttpStatus {
                path: path.to_string(),
                status_code: *status_code,
            }),
            Some(MockResponse::Unreachable) | None => Err(FetchError::RequestFailed {
                path: path.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}
