//! News detector: article markup, bylines, and long prose with few links.

use crate::config::ResolverConfig;
use crate::detect::{Detection, Detector};
use crate::dom::PageDocument;
use crate::page::PageType;
use crate::signal::Signal;

const ARTICLE_SELECTOR: &str = r#"article, [itemtype*="Article"]"#;
const BYLINE_SELECTOR: &str = concat!(
    r#"[rel="author"], [itemprop="author"], .byline, .author, .dateline, "#,
    r#"[class*="byline"], time[datetime]"#,
);

pub struct NewsDetector {
    min_chars: usize,
    chars_per_link: f64,
}

impl NewsDetector {
    pub fn new(config: &ResolverConfig) -> Self {
        let t = &config.thresholds;
        Self {
            min_chars: t.prose_min_chars,
            chars_per_link: t.prose_chars_per_link,
        }
    }

    /// Characters of text per link, when the page qualifies as long-form prose.
    fn prose_density(&self, text_len: usize, links: usize) -> Option<f64> {
        if text_len <= self.min_chars || links == 0 {
            return None;
        }
        let ratio = text_len as f64 / links as f64;
        (ratio > self.chars_per_link).then_some(ratio)
    }
}

impl Detector for NewsDetector {
    fn page_type(&self) -> PageType {
        PageType::News
    }

    fn detect(&self, page: &PageDocument) -> Detection {
        let mut out = Detection::default();

        if page.exists(ARTICLE_SELECTOR) {
            out.intent.push(Signal::dom("article-markup"));
        }
        if page.exists(BYLINE_SELECTOR) {
            out.intent.push(Signal::dom("byline"));
        }

        let text_len = page.body_text().chars().count();
        let links = page.count("a[href]");
        if let Some(ratio) = self.prose_density(text_len, links) {
            let detail = format!("{} chars/link", ratio.round());
            out.intent
                .push(Signal::dom("prose-density").with_detail(detail));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> NewsDetector {
        NewsDetector::new(&ResolverConfig::default())
    }

    fn detect(html: &str) -> Detection {
        let page = PageDocument::parse("https://daily.example/2024/01/02/story", html).unwrap();
        detector().detect(&page)
    }

    fn paragraphs(chars: usize) -> String {
        let sentence = "The council met on Tuesday to debate the harbour plan. ";
        let mut body = String::new();
        while body.len() < chars {
            body.push_str("<p>");
            body.push_str(sentence);
            body.push_str("</p>");
        }
        body
    }

    #[test]
    fn article_with_byline() {
        let d = detect(
            r#"<article><h1>Harbour plan</h1>
               <span class="byline">By A. Reporter</span>
               <time datetime="2024-01-02">Jan 2</time></article>"#,
        );
        let labels: Vec<_> = d.intent.iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, vec!["dom:article-markup", "dom:byline"]);
        assert!(d.risk.is_empty());
    }

    #[test]
    fn schema_org_article_type() {
        let d = detect(r#"<div itemscope itemtype="https://schema.org/NewsArticle"></div>"#);
        assert_eq!(d.intent[0].tag, "article-markup");
    }

    #[test]
    fn long_prose_with_few_links() {
        let html = format!("{}<a href=\"/more\">more</a>", paragraphs(4000));
        let d = detect(&html);
        assert_eq!(d.intent.len(), 1);
        assert_eq!(d.intent[0].tag, "prose-density");
    }

    #[test]
    fn link_heavy_page_is_not_prose() {
        let links: String = (0..40)
            .map(|i| format!("<a href=\"/l{i}\">link {i}</a>"))
            .collect();
        let d = detect(&format!("{}{links}", paragraphs(4000)));
        assert!(d.intent.is_empty());
    }

    #[test]
    fn density_thresholds() {
        let news = detector();
        assert_eq!(news.prose_density(3000, 1), None);
        assert_eq!(news.prose_density(5000, 0), None);
        assert_eq!(news.prose_density(4000, 20), None);
        assert_eq!(news.prose_density(4020, 20), Some(201.0));
    }
}
