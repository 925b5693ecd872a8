//! The page-context resolver.
//!
//! `Resolver` owns only compiled configuration. Each call to [`Resolver::resolve`]
//! re-reads the snapshot it is given and builds a fresh [`PageContext`]; nothing
//! carries over between calls, so rescanning after a DOM change is just
//! resolving the new snapshot.
//!
//! ```
//! use page_sentinel::dom::PageDocument;
//! use page_sentinel::page::PageType;
//! use page_sentinel::resolver::Resolver;
//!
//! let page = PageDocument::parse(
//!     "https://www.amazon.com/product/checkout",
//!     "<button>Add to Cart</button><button>Add to Cart</button>",
//! )
//! .unwrap();
//! let ctx = Resolver::default().resolve(&page);
//! assert_eq!(ctx.page_type, PageType::Shopping);
//! ```

use crate::config::ResolverConfig;
use crate::detect::risk::RiskDetector;
use crate::detect::url::UrlDetector;
use crate::detect::{Detector, page_detectors};
use crate::dom::PageDocument;
use crate::error::{ConfigResult, SentinelResult};
use crate::page::{PageContext, ResolutionDebug};
use crate::score::{ConfidenceModel, ScoreMap, decide, tally_detector, tally_url_signals};

/// Classifies page snapshots. Holds no per-page state and is `Send + Sync`,
/// so one instance can serve many tabs or threads.
pub struct Resolver {
    url: UrlDetector,
    detectors: Vec<Box<dyn Detector>>,
    risk: RiskDetector,
    confidence: ConfidenceModel,
    include_debug: bool,
}

impl Resolver {
    /// Compile a resolver from configuration.
    ///
    /// All pattern and threshold errors surface here, never during resolution.
    pub fn new(config: &ResolverConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            url: UrlDetector::new(config)?,
            detectors: page_detectors(config)?,
            risk: RiskDetector::new(config)?,
            confidence: ConfidenceModel {
                damping: config.thresholds.confidence_damping,
                cap: config.thresholds.confidence_cap,
            },
            include_debug: config.include_debug,
        })
    }

    /// Classify one snapshot.
    pub fn resolve(&self, page: &PageDocument) -> PageContext {
        let mut scores = ScoreMap::default();
        let mut intent_signals = self.url.detect(page);
        let mut risk_signals = Vec::new();
        tally_url_signals(&mut scores, &intent_signals);
        tracing::trace!(url = %page.url(), signals = intent_signals.len(), "url detector");

        for detector in &self.detectors {
            let detection = detector.detect(page);
            tracing::trace!(
                page_type = %detector.page_type(),
                intent = detection.intent.len(),
                risk = detection.risk.len(),
                "dom detector"
            );
            tally_detector(&mut scores, detector.page_type(), &detection.intent);
            intent_signals.extend(detection.intent);
            risk_signals.extend(detection.risk);
        }

        risk_signals.extend(self.risk.detect(page));

        let decision = decide(&scores, &self.confidence);
        tracing::debug!(
            url = %page.url(),
            page_type = %decision.page_type,
            confidence = decision.confidence,
            intent = intent_signals.len(),
            risk = risk_signals.len(),
            "resolved page context"
        );

        PageContext {
            page_type: decision.page_type,
            intent_signals,
            risk_signals,
            confidence: decision.confidence,
            debug: self.include_debug.then(|| ResolutionDebug {
                scores,
                resolved_at_ms: now_millis(),
            }),
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default()).expect("built-in resolver config must compile")
    }
}

/// Parse a snapshot and classify it with the built-in configuration.
///
/// Fails only when `url` is not an absolute URL.
pub fn resolve_page_context(url: &str, html: &str) -> SentinelResult<PageContext> {
    let page = PageDocument::parse(url, html)?;
    Ok(Resolver::default().resolve(&page))
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
