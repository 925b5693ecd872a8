// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # page-sentinel
//!
//! A deterministic, offline page-context resolver. Given a page's URL and DOM,
//! it infers what kind of page is being viewed (shopping, payment, news,
//! social, forum) and collects intent and risk signals along the way.
//!
//! ## Architecture
//!
//! - **Snapshot** (`dom`): parsed URL + HTML tree with total, non-failing queries
//! - **Detectors** (`detect`): URL rules, one DOM scan per page type, general risk checks
//! - **Scoring** (`score`): one point per signal, fixed tie-break order, damped confidence
//! - **Resolver** (`resolver`): runs the detectors and assembles a `PageContext`
//! - **Sessions** (`session`): caller-owned per-tab storage of results
//!
//! ## Library usage
//!
//! ```
//! use page_sentinel::resolver::resolve_page_context;
//!
//! let ctx = resolve_page_context(
//!     "https://news.example/2024/03/01/harbour-plan",
//!     "<article><span class='byline'>By A. Reporter</span></article>",
//! )
//! .unwrap();
//! assert_eq!(ctx.page_type.as_str(), "news");
//! ```

pub mod config;
pub mod detect;
pub mod dom;
pub mod error;
pub mod page;
pub mod resolver;
pub mod score;
pub mod session;
pub mod signal;
