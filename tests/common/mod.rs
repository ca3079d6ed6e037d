/*!
 * Common test utilities for the termtip test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;

use termtip::Page;

// Re-export the helper modules
pub mod http_server;
pub mod log_capture;
pub mod mock_fetcher;

/// Glossary page in the shape the tests expect
pub const GLOSSARY_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Glossary</title></head><body>
<p><span id="term-latency"></span>Time between request and response.</p>
<p><span id="term-jitter"></span>Variation in latency &amp; delay.</p>
<p><span id="term-orphan"></span></p>
</body></html>"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// HTML snippet of one Sphinx-style term reference
pub fn term_ref(href: &str, text: &str) -> String {
    format!(
        "<a class=\"reference internal\" href=\"{}\"><span class=\"xref std std-term\">{}</span></a>",
        href, text
    )
}

/// A page at http://localhost/index.html whose body holds `refs`
pub fn page_with(refs: &[String]) -> Page {
    let body = format!("<html><body><p>{}</p></body></html>", refs.join(" "));
    Page::parse(&body, Url::parse("http://localhost/index.html").unwrap())
}
