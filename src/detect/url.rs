//! URL detector: known domains and path patterns per page type.
//!
//! Runs on the parsed URL only. Several types may fire at once (a store's
//! checkout page looks like both shopping and payment).

use regex::Regex;

use crate::config::ResolverConfig;
use crate::detect::compile;
use crate::dom::PageDocument;
use crate::error::ConfigResult;
use crate::page::PageType;
use crate::signal::Signal;

struct UrlRule {
    page_type: PageType,
    domains: Vec<String>,
    path: Regex,
}

impl UrlRule {
    fn matches_host(&self, host: &str) -> bool {
        self.domains
            .iter()
            .any(|d| !d.is_empty() && host.contains(d.as_str()))
    }
}

/// Matches hostnames and paths against per-type rules.
pub struct UrlDetector {
    rules: Vec<UrlRule>,
}

impl UrlDetector {
    pub fn new(config: &ResolverConfig) -> ConfigResult<Self> {
        let mut rules = Vec::with_capacity(PageType::CLASSIFIABLE.len());
        for page_type in PageType::CLASSIFIABLE {
            let (Some(domains), Some(path)) =
                (config.domains.get(page_type), config.paths.get(page_type))
            else {
                continue;
            };
            rules.push(UrlRule {
                page_type,
                domains: domains.iter().map(|d| d.to_lowercase()).collect(),
                path: compile(&format!("paths.{page_type}"), path)?,
            });
        }
        Ok(Self { rules })
    }

    /// Signals for a page, in shopping, payment, news, social, forum order.
    pub fn detect(&self, page: &PageDocument) -> Vec<Signal> {
        self.detect_parts(&page.host(), &page.path_and_query())
    }

    /// Same as [`Self::detect`] on a lowercased host and a path+query string.
    pub fn detect_parts(&self, host: &str, path_and_query: &str) -> Vec<Signal> {
        let mut signals = Vec::new();
        for rule in &self.rules {
            if rule.matches_host(host) {
                signals.push(Signal::url(format!("known-{}-domain", rule.page_type)));
            }
            if rule.path.is_match(path_and_query) {
                signals.push(Signal::url(format!("{}-path", rule.page_type)));
            }
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(host: &str, path: &str) -> Vec<String> {
        UrlDetector::new(&ResolverConfig::default())
            .unwrap()
            .detect_parts(host, path)
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn amazon_checkout_is_shopping_and_payment() {
        assert_eq!(
            labels("www.amazon.com", "/product/checkout"),
            vec![
                "url:known-shopping-domain",
                "url:shopping-path",
                "url:payment-path",
            ]
        );
    }

    #[test]
    fn news_date_path() {
        assert_eq!(
            labels("www.nytimes.com", "/2024/05/01/us/politics/story.html"),
            vec!["url:known-news-domain", "url:news-path"]
        );
    }

    #[test]
    fn reddit_thread() {
        assert_eq!(
            labels("www.reddit.com", "/r/rust/comments/abc/title/"),
            vec!["url:known-forum-domain", "url:forum-path"]
        );
    }

    #[test]
    fn social_status_path() {
        assert_eq!(
            labels("twitter.com", "/someone/status/12345"),
            vec!["url:known-social-domain", "url:social-path"]
        );
    }

    #[test]
    fn query_string_participates() {
        assert_eq!(
            labels("example.org", "/go?to=/checkout"),
            vec!["url:payment-path"]
        );
    }

    #[test]
    fn plain_page_emits_nothing() {
        assert!(labels("example.org", "/about-us").is_empty());
    }

    #[test]
    fn invalid_path_pattern_is_config_error() {
        let mut config = ResolverConfig::default();
        config.paths.news = "(".into();
        assert!(UrlDetector::new(&config).is_err());
    }
}
