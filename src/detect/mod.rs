//! Detectors: independent scans of a page snapshot that emit signals.
//!
//! Each page-type detector implements [`Detector`]. The URL detector and the
//! general risk detector have their own shapes since they are not tied to a
//! single page type. None of them keep state between calls.

pub mod forum;
pub mod news;
pub mod payment;
pub mod risk;
pub mod shopping;
pub mod social;
pub mod url;

use regex::Regex;

use crate::config::ResolverConfig;
use crate::dom::PageDocument;
use crate::error::{ConfigError, ConfigResult};
use crate::page::PageType;
use crate::signal::Signal;

/// Output of one page-type detector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub intent: Vec<Signal>,
    pub risk: Vec<Signal>,
}

impl Detection {
    pub fn is_empty(&self) -> bool {
        self.intent.is_empty() && self.risk.is_empty()
    }
}

/// A DOM scan producing evidence for one page type.
pub trait Detector: Send + Sync {
    /// The page type this detector scores for.
    fn page_type(&self) -> PageType;

    /// Scan the snapshot. Must not fail: no match is an empty detection.
    fn detect(&self, page: &PageDocument) -> Detection;
}

/// Build the five page-type detectors in evaluation order.
pub fn page_detectors(config: &ResolverConfig) -> ConfigResult<Vec<Box<dyn Detector>>> {
    let detectors: Vec<Box<dyn Detector>> = vec![
        Box::new(shopping::ShoppingDetector::new(config)?),
        Box::new(payment::PaymentDetector::new(config)),
        Box::new(news::NewsDetector::new(config)),
        Box::new(social::SocialDetector::new(config)?),
        Box::new(forum::ForumDetector::new(config)),
    ];
    Ok(detectors)
}

/// Compile a phrase list into one case-insensitive alternation.
///
/// An empty list compiles to `None`, which matches nothing.
pub(crate) fn phrase_regex(field: &str, phrases: &[String]) -> ConfigResult<Option<Regex>> {
    if phrases.is_empty() {
        return Ok(None);
    }
    let alternation = phrases
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    compile(field, &format!("(?i){alternation}")).map(Some)
}

pub(crate) fn compile(field: &str, pattern: &str) -> ConfigResult<Regex> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Occurrences of `regex` in `text`; zero when there is no regex.
pub(crate) fn count_matches(regex: Option<&Regex>, text: &str) -> usize {
    regex.map_or(0, |re| re.find_iter(text).count())
}
