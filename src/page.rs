//! Page classification types: the resolver's output record.

use serde::{Deserialize, Serialize};

use crate::score::ScoreMap;
use crate::signal::Signal;

/// The resolver's best guess at what kind of page is being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Shopping,
    Payment,
    News,
    Social,
    Forum,
    Unknown,
}

impl PageType {
    /// The five classifiable types, in tie-break priority order.
    pub const CLASSIFIABLE: [PageType; 5] = [
        PageType::Shopping,
        PageType::Payment,
        PageType::News,
        PageType::Social,
        PageType::Forum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shopping => "shopping",
            Self::Payment => "payment",
            Self::News => "news",
            Self::Social => "social",
            Self::Forum => "forum",
            Self::Unknown => "unknown",
        }
    }

    /// Position in [`Self::CLASSIFIABLE`], or `None` for `Unknown`.
    pub fn index(&self) -> Option<usize> {
        Self::CLASSIFIABLE.iter().position(|t| t == self)
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-load-bearing metadata attached to a resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionDebug {
    /// Raw per-type tallies the decision was made from.
    pub scores: ScoreMap,
    /// Unix epoch milliseconds at which the resolution finished.
    pub resolved_at_ms: u64,
}

/// The classification of one page snapshot.
///
/// Built fresh on every resolution and never mutated afterwards. Serializes
/// with camelCase keys and string-form signals so downstream consumers see
/// `pageType`, `intentSignals`, `riskSignals` and `confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub page_type: PageType,
    /// Positive evidence, in detector evaluation order. Not deduplicated.
    pub intent_signals: Vec<Signal>,
    /// Suspicious or manipulative evidence, in detector evaluation order.
    pub risk_signals: Vec<Signal>,
    /// Damped score of the winning type, in `[0, 1)`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<ResolutionDebug>,
}

impl PageContext {
    /// Whether any risk signal fired.
    pub fn has_risk(&self) -> bool {
        !self.risk_signals.is_empty()
    }

    /// Intent signals rendered in their wire form.
    pub fn intent_labels(&self) -> Vec<String> {
        self.intent_signals.iter().map(|s| s.to_string()).collect()
    }

    /// Risk signals rendered in their wire form.
    pub fn risk_labels(&self) -> Vec<String> {
        self.risk_signals.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_type_serializes_lowercase() {
        let json = serde_json::to_string(&PageType::Shopping).unwrap();
        assert_eq!(json, "\"shopping\"");
        let back: PageType = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(back, PageType::Unknown);
    }

    #[test]
    fn classifiable_order_is_priority_order() {
        assert_eq!(PageType::Shopping.index(), Some(0));
        assert_eq!(PageType::Forum.index(), Some(4));
        assert_eq!(PageType::Unknown.index(), None);
    }

    #[test]
    fn context_uses_camel_case_keys() {
        let ctx = PageContext {
            page_type: PageType::News,
            intent_signals: vec![Signal::dom("byline")],
            risk_signals: Vec::new(),
            confidence: 0.33,
            debug: None,
        };
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["pageType"], "news");
        assert_eq!(value["intentSignals"][0], "dom:byline");
        assert!(value["riskSignals"].as_array().unwrap().is_empty());
        assert!(value.get("debug").is_none());
    }
}
