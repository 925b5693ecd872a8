//! Scoring and decision: tally detector output, pick a page type, and damp
//! the winning score into a confidence value.
//!
//! Every signal is worth exactly one point. Ties go to the earlier type in
//! [`PageType::CLASSIFIABLE`] (shopping > payment > news > social > forum).

use serde::{Deserialize, Serialize};

use crate::page::PageType;
use crate::signal::{Signal, SignalCategory};

/// Per-type tallies for the five classifiable page types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreMap {
    pub shopping: u32,
    pub payment: u32,
    pub news: u32,
    pub social: u32,
    pub forum: u32,
}

impl ScoreMap {
    pub fn get(&self, page_type: PageType) -> u32 {
        match page_type {
            PageType::Shopping => self.shopping,
            PageType::Payment => self.payment,
            PageType::News => self.news,
            PageType::Social => self.social,
            PageType::Forum => self.forum,
            PageType::Unknown => 0,
        }
    }

    /// Add `points` to `page_type`. Points for `Unknown` are dropped.
    pub fn add(&mut self, page_type: PageType, points: u32) {
        let slot = match page_type {
            PageType::Shopping => &mut self.shopping,
            PageType::Payment => &mut self.payment,
            PageType::News => &mut self.news,
            PageType::Social => &mut self.social,
            PageType::Forum => &mut self.forum,
            PageType::Unknown => return,
        };
        *slot = slot.saturating_add(points);
    }

    pub fn total(&self) -> u32 {
        PageType::CLASSIFIABLE
            .iter()
            .fold(0u32, |acc, t| acc.saturating_add(self.get(*t)))
    }

    /// `(type, score)` pairs, highest score first, ties in priority order.
    pub fn ranked(&self) -> Vec<(PageType, u32)> {
        let mut pairs: Vec<_> = PageType::CLASSIFIABLE
            .iter()
            .map(|t| (*t, self.get(*t)))
            .collect();
        // Stable sort keeps CLASSIFIABLE order among equal scores.
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

/// Credit each URL signal to the first type whose name appears in its tag.
pub fn tally_url_signals(scores: &mut ScoreMap, signals: &[Signal]) {
    for signal in signals.iter().filter(|s| s.category == SignalCategory::Url) {
        if let Some(page_type) = PageType::CLASSIFIABLE
            .iter()
            .find(|t| signal.tag.contains(t.as_str()))
        {
            scores.add(*page_type, 1);
        }
    }
}

/// Credit a page-type detector's intent signals, one point each.
pub fn tally_detector(scores: &mut ScoreMap, page_type: PageType, intent: &[Signal]) {
    let points = u32::try_from(intent.len()).unwrap_or(u32::MAX);
    scores.add(page_type, points);
}

/// How the winning score is turned into a confidence value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceModel {
    /// `k` in `top / (top + k)`. Must be positive.
    pub damping: f64,
    /// Ceiling applied after rounding. Must be below 1.
    pub cap: f64,
}

impl Default for ConfidenceModel {
    fn default() -> Self {
        Self {
            damping: 2.0,
            cap: 0.99,
        }
    }
}

impl ConfidenceModel {
    /// `round2(top / (top + damping))`, capped, and 0 when nothing scored.
    pub fn confidence(&self, top: u32, total: u32) -> f64 {
        if total == 0 || top == 0 {
            return 0.0;
        }
        let top = f64::from(top);
        let raw = top / (top + self.damping);
        let rounded = (raw * 100.0).round() / 100.0;
        rounded.min(self.cap)
    }
}

/// The outcome of the decision step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub page_type: PageType,
    pub confidence: f64,
}

/// Pick the winning type and its confidence.
pub fn decide(scores: &ScoreMap, model: &ConfidenceModel) -> Decision {
    let (winner, top) = scores
        .ranked()
        .first()
        .copied()
        .unwrap_or((PageType::Unknown, 0));
    let page_type = if top == 0 { PageType::Unknown } else { winner };
    Decision {
        page_type,
        confidence: model.confidence(top, scores.total()),
    }
}
