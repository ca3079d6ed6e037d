use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

use crate::app_config::{Config, FetchSource};
use crate::augmenter::{AugmentOptions, AugmentReport, TooltipAugmenter};
use crate::document::Page;
use crate::fetcher::{FileFetcher, HttpFetcher, PageFetcher};
use crate::file_utils::FileManager;
use crate::startup::Readiness;

// @module: Augmentation of rendered documentation files

/// Totals over a directory run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    /// Pages processed
    pub pages: usize,
    /// Markers found across all pages
    pub markers: usize,
    /// Tooltips appended across all pages
    pub injected: usize,
}

impl SiteSummary {
    fn add(&mut self, report: &AugmentReport) {
        self.pages += 1;
        self.markers += report.markers;
        self.injected += report.injected;
    }
}

/// Applies tooltip passes to the pages of a documentation build
pub struct SiteProcessor {
    // @field: Build output directory
    site_root: PathBuf,
    // @field: URL the build directory is served at, path ends with '/'
    site_url: Url,
    augmenter: TooltipAugmenter<Box<dyn PageFetcher>>,
}

impl SiteProcessor {
    /// Create a processor for the build in `site_root`, fetching as configured
    pub fn new(config: &Config, site_root: impl Into<PathBuf>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let site_root = site_root.into();
        let site_url = directory_url(config.site_url()?);

        let fetcher: Box<dyn PageFetcher> = match config.fetch.source {
            FetchSource::Local => Box::new(FileFetcher::new(site_root.clone(), &site_url)),
            FetchSource::Http => Box::new(HttpFetcher::new(site_url.clone(), &config.fetch)?),
        };

        Self::with_fetcher(config, site_root, fetcher)
    }

    /// Create a processor around an existing fetcher
    pub fn with_fetcher(
        config: &Config,
        site_root: impl Into<PathBuf>,
        fetcher: Box<dyn PageFetcher>,
    ) -> Result<Self> {
        Ok(Self {
            site_root: site_root.into(),
            site_url: directory_url(config.site_url()?),
            augmenter: TooltipAugmenter::new(fetcher, AugmentOptions::from(config)),
        })
    }

    /// URL `file` is served at
    pub fn page_url(&self, file: &Path) -> Result<Url> {
        let relative = FileManager::relative_url_path(&self.site_root, file)?;
        self.site_url
            .join(&relative)
            .with_context(|| format!("Cannot build URL for {:?}", file))
    }

    /// Run one pass over an HTML source served at `url`
    pub async fn augment_html(&self, source: &str, url: Url) -> (String, AugmentReport) {
        let mut page = Page::parse(source, url);
        let report = self.augmenter.augment_all(&mut page).await;
        (page.to_html(), report)
    }

    /// Augment one file, writing the result to `output` or to stdout
    pub async fn run_file(
        &self,
        input: &Path,
        output: Option<&Path>,
        readiness: Readiness,
    ) -> Result<AugmentReport> {
        if !FileManager::file_exists(input) {
            return Err(anyhow!("Input file does not exist: {:?}", input));
        }
        readiness.wait().await;

        let report = self.process_file(input, output).await?;
        info!(
            "{:?}: {}/{} tooltips added",
            input, report.injected, report.markers
        );
        Ok(report)
    }

    /// Augment every HTML page of the build, in place or mirrored into `output_dir`
    pub async fn run_dir(&self, output_dir: Option<&Path>, readiness: Readiness) -> Result<SiteSummary> {
        if !FileManager::dir_exists(&self.site_root) {
            return Err(anyhow!("Site directory does not exist: {:?}", self.site_root));
        }

        let files = FileManager::find_html_files(&self.site_root)?;
        if files.is_empty() {
            warn!("No HTML pages found in {:?}", self.site_root);
            return Ok(SiteSummary::default());
        }
        readiness.wait().await;

        let progress_bar = ProgressBar::new(files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("#>-"));

        // Glossary pages are read from the build while it is processed, so
        // nothing is written until every page has been rendered
        let mut summary = SiteSummary::default();
        let mut rendered = Vec::with_capacity(files.len());
        for file in &files {
            let target = match output_dir {
                Some(dir) => dir.join(file.strip_prefix(&self.site_root)?),
                None => file.clone(),
            };
            progress_bar.set_message(FileManager::relative_url_path(&self.site_root, file)?);

            let (html, report) = self.render_file(file).await?;
            summary.add(&report);
            rendered.push((target, html));
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        for (target, html) in &rendered {
            FileManager::write_to_file(target, html)?;
        }

        info!(
            "Processed {} pages: {}/{} tooltips added",
            summary.pages, summary.injected, summary.markers
        );
        Ok(summary)
    }

    async fn render_file(&self, input: &Path) -> Result<(String, AugmentReport)> {
        let source = FileManager::read_to_string(input)?;
        let url = self.page_url(input)?;
        debug!("Augmenting {:?} as {}", input, url);

        Ok(self.augment_html(&source, url).await)
    }

    async fn process_file(&self, input: &Path, output: Option<&Path>) -> Result<AugmentReport> {
        let (html, report) = self.render_file(input).await?;
        match output {
            Some(path) => FileManager::write_to_file(path, &html)?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(html.as_bytes())
                    .context("Failed to write page to stdout")?;
                stdout.flush()?;
            }
        }
        Ok(report)
    }
}

// Relative page paths must be joined below the site path, not beside it
fn directory_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    url
}
