//! Social detector: feed containers and social-action vocabulary.

use std::collections::BTreeSet;

use regex::Regex;

use crate::config::ResolverConfig;
use crate::detect::{Detection, Detector, compile};
use crate::dom::PageDocument;
use crate::error::ConfigResult;
use crate::page::PageType;
use crate::signal::Signal;

const FEED_SELECTOR: &str = concat!(
    r#"[role="feed"], .feed, .timeline, [data-testid="tweet"], [data-testid="tweetText"], "#,
    r#"[data-testid="post-container"], [data-testid="post"], [data-pagelet*="FeedUnit"]"#,
);

pub struct SocialDetector {
    /// One word-bounded matcher per keyword, so distinct keywords can be counted.
    keywords: Vec<(String, Regex)>,
    distinct_min: usize,
}

impl SocialDetector {
    pub fn new(config: &ResolverConfig) -> ConfigResult<Self> {
        let keywords = config
            .phrases
            .social_actions
            .iter()
            .filter(|k| !k.is_empty())
            .map(|k| {
                compile("phrases.social_actions", &format!(r"(?i)\b(?:{k})\b"))
                    .map(|re| (k.to_lowercase(), re))
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self {
            keywords,
            distinct_min: config.thresholds.social_distinct_min.max(1),
        })
    }

    /// Distinct keywords present in `text`.
    fn distinct_keywords(&self, text: &str) -> BTreeSet<&str> {
        self.keywords
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

impl Detector for SocialDetector {
    fn page_type(&self) -> PageType {
        PageType::Social
    }

    fn detect(&self, page: &PageDocument) -> Detection {
        let mut out = Detection::default();

        if page.exists(FEED_SELECTOR) {
            out.intent.push(Signal::dom("feed-container"));
        }

        // A lone "Share" button is common on any site; require variety.
        let distinct = self.distinct_keywords(page.body_text()).len();
        if distinct >= self.distinct_min {
            let detail = format!("{distinct} keywords");
            out.intent
                .push(Signal::dom("social-actions").with_detail(detail));
        }

        out
    }
}
