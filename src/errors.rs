/*!
 * Error types for the termtip application.
 *
 * Per-marker failures are split in two families: `FetchError` for anything
 * that goes wrong while retrieving a glossary page, and `LookupError` for
 * anything that goes wrong while locating the term inside a page. Both are
 * recoverable and only ever affect the marker they belong to.
 */

use thiserror::Error;

/// Errors that can occur while retrieving a glossary page
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or no response was received
    #[error("Request for {path} failed: {message}")]
    RequestFailed {
        /// Path that was requested
        path: String,
        /// Underlying transport error
        message: String,
    },

    /// The server answered with a non-success status
    #[error("Request for {path} returned HTTP {status_code}")]
    HttpStatus {
        /// Path that was requested
        path: String,
        /// HTTP status code
        status_code: u16,
    },

    /// The response body could not be read as text
    #[error("Failed to read body of {path}: {message}")]
    Body {
        /// Path that was requested
        path: String,
        /// Underlying read error
        message: String,
    },

    /// The path cannot be mapped onto the configured source
    #[error("Invalid glossary path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while locating a term and its definition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The marker has no parent element
    #[error("Term marker has no enclosing anchor")]
    MissingAnchor,

    /// The enclosing anchor carries no href attribute
    #[error("Enclosing anchor has no href")]
    MissingHref,

    /// The href cannot be resolved to a URL
    #[error("Malformed term link '{href}': {message}")]
    MalformedHref {
        /// Raw href attribute
        href: String,
        /// Parser message
        message: String,
    },

    /// The link has no fragment or the fragment does not name a term
    #[error("Link '{href}' does not point at a glossary term")]
    NotATermLink {
        /// Raw href attribute
        href: String,
    },

    /// The glossary page has no element with the fragment as its id
    #[error("No element with id '{fragment}' in glossary page")]
    MissingTarget {
        /// Fragment identifier that was looked up
        fragment: String,
    },

    /// The target element is the last node of its parent
    #[error("Element '{fragment}' has no following sibling to read the definition from")]
    MissingSibling {
        /// Fragment identifier that was looked up
        fragment: String,
    },
}

/// Failure of a single marker's resolution
#[derive(Error, Debug)]
pub enum TooltipError {
    /// Retrieval of the glossary page failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The term or its definition could not be located
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration loading or validation
    #[error("Config error: {0}")]
    Config(String),

    /// Error from resolving a tooltip
    #[error("Tooltip error: {0}")]
    Tooltip(#[from] TooltipError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<FetchError> for AppError {
    fn from(error: FetchError) -> Self {
        Self::Tooltip(TooltipError::Fetch(error))
    }
}

impl From<LookupError> for AppError {
    fn from(error: LookupError) -> Self {
        Self::Tooltip(TooltipError::Lookup(error))
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
