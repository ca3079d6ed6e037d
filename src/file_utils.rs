use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities for documentation build trees

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @checks: HTML page by extension
    pub fn is_html_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm")
            })
            .unwrap_or(false)
    }

    /// Find all HTML pages in a directory, sorted by path
    pub fn find_html_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::is_html_file(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// URL path of `file` relative to `root`, with '/' separators
    pub fn relative_url_path<P1: AsRef<Path>, P2: AsRef<Path>>(root: P1, file: P2) -> Result<String> {
        let root = root.as_ref();
        let file = file.as_ref();
        let relative = file
            .strip_prefix(root)
            .with_context(|| format!("{:?} is not inside {:?}", file, root))?;

        let segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(segment) => Some(segment.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();

        Ok(segments.join("/"))
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
