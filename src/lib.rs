/*!
 * # termtip - Glossary term tooltips for rendered documentation
 *
 * A Rust library for adding hover tooltips to glossary term references in
 * rendered HTML documentation.
 *
 * ## Features
 *
 * - Discover glossary term markers (Sphinx `std-term` references by default)
 * - Fetch the linked glossary page for every marker, concurrently
 * - Extract the term's definition from the fetched page
 * - Append a `term-tooltip` subtree under each marker's anchor
 * - Read glossary pages over HTTP or straight from a local build directory
 * - Start after a fixed delay or a host-supplied readiness signal
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `augmenter`: The tooltip augmentation pass
 * - `document`: The page being augmented
 * - `glossary`: Parsed glossary pages and definition lookup
 * - `term`: Resolution of glossary term links
 * - `tooltip`: The injected tooltip subtree
 * - `fetcher`: Glossary page sources:
 *   - `fetcher::HttpFetcher`: HTTP GET against the site origin
 *   - `fetcher::FileFetcher`: Local build directory
 * - `startup`: Deferred start of the pass
 * - `site`: Processing of files and whole build directories
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Test names follow test_<subject>_<condition>_<expectation>
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod augmenter;
pub mod document;
pub mod errors;
pub mod fetcher;
pub mod file_utils;
pub mod glossary;
pub mod site;
pub mod startup;
pub mod term;
pub mod tooltip;

// Re-export main types for easier usage
pub use app_config::Config;
pub use augmenter::{AugmentOptions, AugmentReport, TooltipAugmenter};
pub use document::{Page, TermMarker};
pub use errors::{AppError, FetchError, LookupError, TooltipError};
pub use fetcher::{FileFetcher, HttpFetcher, PageFetcher};
pub use site::{SiteProcessor, SiteSummary};
pub use startup::Readiness;
pub use tooltip::{Tooltip, TooltipMarkup};
