//! Rich diagnostic error types for page-sentinel.
//!
//! Resolution itself never fails: missing elements simply produce no signals.
//! Errors only arise at the edges, when a page snapshot is built from an
//! unparsable URL or when a resolver configuration is rejected.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for page-sentinel.
#[derive(Debug, Error, Diagnostic)]
pub enum SentinelError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Page snapshot errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PageError {
    #[error("invalid page URL \"{url}\": {message}")]
    #[diagnostic(
        code(sentinel::page::invalid_url),
        help(
            "The resolver needs the absolute URL of the page being classified, \
             including its scheme (e.g. https://example.com/product/1)."
        )
    )]
    InvalidUrl { url: String, message: String },

    #[error("failed to read page snapshot from {origin}")]
    #[diagnostic(
        code(sentinel::page::read),
        help("Check that the HTML file exists and is readable, or pipe the markup on stdin.")
    )]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read resolver config: {path}")]
    #[diagnostic(
        code(sentinel::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse resolver config: {path}: {message}")]
    #[diagnostic(
        code(sentinel::config::parse),
        help(
            "Check the TOML syntax. Print the built-in defaults with \
             `page-sentinel config` and use them as a starting point."
        )
    )]
    Parse { path: String, message: String },

    #[error("failed to write resolver config: {path}")]
    #[diagnostic(
        code(sentinel::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern for {field}: {message}")]
    #[diagnostic(
        code(sentinel::config::invalid_pattern),
        help(
            "Path patterns and phrase lists are regular expressions (Rust `regex` syntax). \
             Escape literal metacharacters such as `.`, `?` and `(`."
        )
    )]
    InvalidPattern { field: String, message: String },

    #[error("invalid threshold {field} = {value}")]
    #[diagnostic(code(sentinel::config::invalid_threshold), help("{hint}"))]
    InvalidThreshold {
        field: String,
        value: String,
        hint: String,
    },
}

/// Convenience alias for page-sentinel results.
pub type SentinelResult<T> = std::result::Result<T, SentinelError>;

/// Convenience alias for page snapshot results.
pub type PageResult<T> = std::result::Result<T, PageError>;

/// Convenience alias for configuration results.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
