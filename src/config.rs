//! Resolver configuration: keyword lists, patterns and thresholds.
//!
//! Persisted as TOML. Every field has a default, so a partial file only needs
//! the values it overrides. The defaults are the built-in heuristics.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::page::PageType;

const SHOPPING_PATH: &str =
    r"(?i)/(products?|items?|dp|gp/product|cart|basket|shop|store|deals?|collections?)(/|\?|$)";
const PAYMENT_PATH: &str = r"(?i)/(checkout|payments?|pay|billing|order/confirm)(/|\?|$)";
const NEWS_PATH: &str =
    r"(?i)/(news|articles?|story|stories|politics|world|opinion|\d{4}/\d{2}/\d{2})(/|\?|$)";
const SOCIAL_PATH: &str =
    r"(?i)/(status|statuses|posts?|feed|hashtag|reels?|profile|@[\w.]+)(/|\?|$)";
const FORUM_PATH: &str =
    r"(?i)/(r|t|forums?|threads?|topics?|discussions?|questions|comments)(/|\?|$)";

/// One value per classifiable page type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerType<T> {
    pub shopping: T,
    pub payment: T,
    pub news: T,
    pub social: T,
    pub forum: T,
}

impl<T> PerType<T> {
    /// Value for `page_type`; `None` for `Unknown`.
    pub fn get(&self, page_type: PageType) -> Option<&T> {
        match page_type {
            PageType::Shopping => Some(&self.shopping),
            PageType::Payment => Some(&self.payment),
            PageType::News => Some(&self.news),
            PageType::Social => Some(&self.social),
            PageType::Forum => Some(&self.forum),
            PageType::Unknown => None,
        }
    }
}

/// Phrase lists matched against visible body text.
///
/// Entries are regex fragments joined into a single case-insensitive
/// alternation, so `only \d+ left` matches "Only 3 left".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseConfig {
    pub buy_buttons: Vec<String>,
    pub urgency: Vec<String>,
    /// Matched on word boundaries, counted by distinct keyword.
    pub social_actions: Vec<String>,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        Self {
            buy_buttons: strings(&["add to cart", "buy now", "add to bag", "purchase"]),
            urgency: strings(&[
                "limited time",
                "act now",
                r"only \d+ left",
                "hurry",
                "deal ends",
                "flash sale",
                "today only",
                "don['’]?t miss",
                "selling fast",
                "almost gone",
            ]),
            social_actions: strings(&["like", "share", "retweet", "repost", "upvote"]),
        }
    }
}

/// Numeric knobs of the detectors and the decision step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Body text must be longer than this to count as long-form prose.
    pub prose_min_chars: usize,
    /// Characters per link must exceed this to count as low link density.
    pub prose_chars_per_link: f64,
    /// More comment-like elements than this signal a thread.
    pub threaded_comments_min: usize,
    /// More dialog/overlay elements than this is excessive.
    pub popups_max: usize,
    /// Distinct social-action keywords needed before signalling.
    pub social_distinct_min: usize,
    /// Minimum run of lowercase alphanumerics before the TLD for a host to look generated.
    pub suspicious_host_min_len: usize,
    /// Damping constant `k` in `top / (top + k)`.
    pub confidence_damping: f64,
    /// Upper bound applied after rounding.
    pub confidence_cap: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            prose_min_chars: 3000,
            prose_chars_per_link: 200.0,
            threaded_comments_min: 3,
            popups_max: 2,
            social_distinct_min: 2,
            suspicious_host_min_len: 15,
            confidence_damping: 2.0,
            confidence_cap: 0.99,
        }
    }
}

/// Full resolver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Attach the score map and timestamp to each `PageContext`.
    pub include_debug: bool,
    /// `src` fragments of embedded payment-processor iframes.
    pub payment_processors: Vec<String>,
    /// TLDs considered by the generated-hostname heuristic.
    pub suspicious_tlds: Vec<String>,
    /// Hostname fragments that identify well-known sites of each type.
    pub domains: PerType<Vec<String>>,
    /// Regex over path and query identifying each type.
    pub paths: PerType<String>,
    pub phrases: PhraseConfig,
    pub thresholds: Thresholds,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            domains: PerType {
                shopping: strings(&[
                    "amazon", "ebay", "walmart", "etsy", "aliexpress", "alibaba", "target.com",
                    "bestbuy", "shopify", "temu", "shein", "wish.com", "flipkart", "costco",
                ]),
                payment: strings(&[
                    "paypal", "stripe", "checkout", "venmo", "squareup", "klarna", "afterpay",
                    "billing", "pay.",
                ]),
                news: strings(&[
                    "cnn", "bbc", "nytimes", "reuters", "theguardian", "washingtonpost", "apnews",
                    "bloomberg", "foxnews", "nbcnews", "npr.org", "news",
                ]),
                social: strings(&[
                    "facebook", "twitter", "x.com", "instagram", "tiktok", "linkedin",
                    "threads.net", "mastodon", "bsky", "snapchat", "pinterest",
                ]),
                forum: strings(&[
                    "reddit", "quora", "stackoverflow", "stackexchange", "discourse", "forum",
                    "community", "boards", "4chan",
                ]),
            },
            paths: PerType {
                shopping: SHOPPING_PATH.into(),
                payment: PAYMENT_PATH.into(),
                news: NEWS_PATH.into(),
                social: SOCIAL_PATH.into(),
                forum: FORUM_PATH.into(),
            },
            phrases: PhraseConfig::default(),
            payment_processors: strings(&[
                "js.stripe.com",
                "stripe.com",
                "paypal.com",
                "paypalobjects.com",
            ]),
            suspicious_tlds: strings(&[
                "com", "net", "org", "info", "xyz", "top", "site", "online", "shop", "club",
            ]),
            thresholds: Thresholds::default(),
            include_debug: true,
        }
    }
}

impl ResolverConfig {
    /// Parse a configuration from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(content: &str, origin: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "(serialize)".into(),
            message: e.to_string(),
        })
    }

    /// Reject thresholds that would break the confidence bounds.
    pub fn validate(&self) -> ConfigResult<()> {
        let t = &self.thresholds;
        if !(t.confidence_damping > 0.0 && t.confidence_damping.is_finite()) {
            return Err(ConfigError::InvalidThreshold {
                field: "thresholds.confidence_damping".into(),
                value: t.confidence_damping.to_string(),
                hint: "The damping constant must be a positive finite number; \
                       otherwise confidence could reach 1.0."
                    .into(),
            });
        }
        if !(t.confidence_cap > 0.0 && t.confidence_cap < 1.0) {
            return Err(ConfigError::InvalidThreshold {
                field: "thresholds.confidence_cap".into(),
                value: t.confidence_cap.to_string(),
                hint: "The cap must lie strictly between 0 and 1.".into(),
            });
        }
        if !(t.prose_chars_per_link >= 0.0) {
            return Err(ConfigError::InvalidThreshold {
                field: "thresholds.prose_chars_per_link".into(),
                value: t.prose_chars_per_link.to_string(),
                hint: "Use a non-negative ratio.".into(),
            });
        }
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        ResolverConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = ResolverConfig::from_toml_str(
            r#"
            include_debug = false

            [thresholds]
            popups_max = 5
            "#,
            "inline",
        )
        .unwrap();
        assert!(!cfg.include_debug);
        assert_eq!(cfg.thresholds.popups_max, 5);
        assert_eq!(cfg.thresholds.prose_min_chars, 3000);
        assert_eq!(cfg.phrases, PhraseConfig::default());
    }

    #[test]
    fn toml_round_trip_through_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("sentinel.toml");
        let mut cfg = ResolverConfig::default();
        cfg.domains.news.push("dailyplanet".into());
        cfg.save(&path).unwrap();

        let loaded = ResolverConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = ResolverConfig::load(Path::new("/nonexistent/sentinel.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn rejects_non_positive_damping() {
        let mut cfg = ResolverConfig::default();
        cfg.thresholds.confidence_damping = 0.0;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidThreshold { ref field, .. }
                if field == "thresholds.confidence_damping"
        ));
    }

    #[test]
    fn rejects_cap_at_one() {
        let mut cfg = ResolverConfig::default();
        cfg.thresholds.confidence_cap = 1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn per_type_lookup() {
        let cfg = ResolverConfig::default();
        assert!(cfg.domains.get(PageType::Shopping).unwrap().contains(&"amazon".to_string()));
        assert!(cfg.paths.get(PageType::Unknown).is_none());
    }
}
