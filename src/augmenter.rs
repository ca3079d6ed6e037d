/*!
 * Tooltip augmentation pass.
 *
 * `augment_all` discovers every term marker in a page and resolves all of
 * them concurrently. Each resolution fetches its own glossary page, so N
 * markers always cost N fetches. A resolution that fails is logged and only
 * costs its own marker a tooltip; the pass itself never fails.
 */

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, error, info, warn};
use url::Url;

use crate::app_config::Config;
use crate::document::{Page, TermMarker};
use crate::errors::{LookupError, TooltipError};
use crate::fetcher::PageFetcher;
use crate::glossary::GlossaryPage;
use crate::startup::Readiness;
use crate::term::TermLink;
use crate::tooltip::{Tooltip, TooltipMarkup};

/// Names that tie the augmenter to the page markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentOptions {
    /// Class of term marker elements
    pub marker_class: String,
    /// Class of injected tooltip containers
    pub tooltip_class: String,
    /// Prefix of term fragment identifiers
    pub term_prefix: String,
    /// Element names of injected tooltips
    pub tooltip_markup: TooltipMarkup,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AugmentOptions {
    fn from(config: &Config) -> Self {
        Self {
            marker_class: config.marker_class.clone(),
            tooltip_class: config.tooltip_class.clone(),
            term_prefix: config.term_prefix.clone(),
            tooltip_markup: config.tooltip_markup,
        }
    }
}

/// A marker that did not receive a tooltip
#[derive(Debug)]
pub struct MarkerFailure {
    /// Position of the marker in document order
    pub index: usize,
    /// Href of the enclosing anchor, if any
    pub href: Option<String>,
    /// Why the resolution failed
    pub error: TooltipError,
}

/// Outcome of one augmentation pass
#[derive(Debug, Default)]
pub struct AugmentReport {
    /// Number of markers found
    pub markers: usize,
    /// Number of tooltips appended
    pub injected: usize,
    /// Markers left without a tooltip
    pub failures: Vec<MarkerFailure>,
}

impl AugmentReport {
    /// Whether every marker received a tooltip
    pub fn all_injected(&self) -> bool {
        self.injected == self.markers
    }
}

/// Resolves glossary term markers into tooltips
#[derive(Debug)]
pub struct TooltipAugmenter<F: PageFetcher> {
    fetcher: F,
    options: AugmentOptions,
}

impl<F: PageFetcher> TooltipAugmenter<F> {
    /// Create an augmenter that reads glossary pages through `fetcher`
    pub fn new(fetcher: F, options: AugmentOptions) -> Self {
        Self { fetcher, options }
    }

    /// Fetcher in use
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Wait for `readiness`, then run one pass over `page`
    pub async fn run(&self, page: &mut Page, readiness: Readiness) -> AugmentReport {
        let cause = readiness.wait().await;
        debug!("Starting tooltip pass ({:?})", cause);
        self.augment_all(page).await
    }

    /// Add a tooltip to every term marker in `page`
    pub async fn augment_all(&self, page: &mut Page) -> AugmentReport {
        let markers = page.markers(&self.options.marker_class);
        let page_url = page.url().clone();
        let mut report = AugmentReport {
            markers: markers.len(),
            ..AugmentReport::default()
        };

        let mut pending: FuturesUnordered<_> = markers
            .iter()
            .map(|marker| {
                let page_url = &page_url;
                async move { (marker, self.resolve_one(page_url, marker).await) }
            })
            .collect();

        // Tooltips land as resolutions settle; each one touches only its own anchor
        while let Some((marker, result)) = pending.next().await {
            let outcome = result.and_then(|tooltip| {
                let anchor = marker.anchor.ok_or(LookupError::MissingAnchor)?;
                page.append_tooltip(
                    anchor,
                    &tooltip,
                    &self.options.tooltip_class,
                    self.options.tooltip_markup,
                )?;
                debug!("Added tooltip '{}' to marker {}", tooltip.title, marker.index);
                Ok(())
            });

            match outcome {
                Ok(()) => report.injected += 1,
                Err(err) => {
                    match &err {
                        TooltipError::Fetch(e) => {
                            error!("Error fetching glossary for marker '{}': {}", marker.text, e)
                        }
                        TooltipError::Lookup(e) => {
                            warn!("Skipping tooltip for marker '{}': {}", marker.text, e)
                        }
                    }
                    report.failures.push(MarkerFailure {
                        index: marker.index,
                        href: marker.href.clone(),
                        error: err,
                    });
                }
            }
        }

        info!(
            "Done with tooltips: {}/{} markers resolved",
            report.injected, report.markers
        );
        report
    }

    /// Resolve a single marker into its tooltip.
    ///
    /// Fetches the glossary page named by the marker's anchor, then reads the
    /// definition from the node following the term's anchor target.
    pub async fn resolve_one(
        &self,
        page_url: &Url,
        marker: &TermMarker,
    ) -> Result<Tooltip, TooltipError> {
        let href = match (&marker.anchor, &marker.href) {
            (None, _) => return Err(LookupError::MissingAnchor.into()),
            (Some(_), None) => return Err(LookupError::MissingHref.into()),
            (Some(_), Some(href)) => href,
        };
        let link = TermLink::resolve(page_url, href, &self.options.term_prefix)?;

        let source = self.fetcher.fetch(link.path()).await?;
        let definition = GlossaryPage::parse(&source).definition(&link.fragment)?;

        Ok(Tooltip::new(link.name, definition))
    }
}
