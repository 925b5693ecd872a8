//! Page snapshot: a parsed URL plus an HTML tree, backed by `scraper`
//! (servo's html5ever).
//!
//! Every query here is total. Lookups that find nothing return `None`, `0` or
//! an empty list, and a selector that fails to parse is logged and treated as
//! matching nothing, so detectors built on top never have an error path.

use std::sync::OnceLock;

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{PageError, PageResult};

/// Elements whose text never renders.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Phrasing elements that do not break words, so `pur<b>chase</b>` reads "purchase".
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "dfn", "em", "font", "i", "kbd",
    "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

/// An immutable snapshot of one page: its URL and DOM.
pub struct PageDocument {
    url: Url,
    html: Html,
    body_text: OnceLock<String>,
}

impl PageDocument {
    /// Parse a page snapshot.
    ///
    /// The URL must be absolute; the markup may be arbitrarily malformed.
    pub fn parse(url: &str, html: &str) -> PageResult<Self> {
        let url = Url::parse(url.trim()).map_err(|e| PageError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_parts(url, Html::parse_document(html)))
    }

    /// Parse a snapshot from raw bytes of unknown encoding.
    ///
    /// Invalid UTF-8 sequences (Latin-1 or Windows-1252 pages) are replaced
    /// with U+FFFD rather than rejected.
    pub fn parse_bytes(url: &str, bytes: &[u8]) -> PageResult<Self> {
        Self::parse(url, &String::from_utf8_lossy(bytes))
    }

    /// Build a snapshot from an already-parsed URL and document.
    pub fn from_parts(url: Url, html: Html) -> Self {
        Self {
            url,
            html,
            body_text: OnceLock::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Lowercased hostname, or `""` for URLs without one.
    pub fn host(&self) -> String {
        self.url
            .host_str()
            .map(|h| h.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Path plus `?query`, the part of the URL path patterns run against.
    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(q) => format!("{}?{}", self.url.path(), q),
            None => self.url.path().to_string(),
        }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// All elements matching `css`, in document order.
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match parse_selector(css) {
            Some(sel) => self.html.select(&sel).collect(),
            None => Vec::new(),
        }
    }

    /// The first element matching `css`, if any.
    pub fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let sel = parse_selector(css)?;
        self.html.select(&sel).next()
    }

    /// Number of elements matching `css`.
    pub fn count(&self, css: &str) -> usize {
        match parse_selector(css) {
            Some(sel) => self.html.select(&sel).count(),
            None => 0,
        }
    }

    pub fn exists(&self, css: &str) -> bool {
        self.select_first(css).is_some()
    }

    /// Visible text of `<body>` with whitespace runs collapsed.
    ///
    /// Falls back to the document root when the tree has no body. Computed
    /// once per snapshot.
    pub fn body_text(&self) -> &str {
        self.body_text.get_or_init(|| {
            let root = self
                .select_first("body")
                .unwrap_or_else(|| self.html.root_element());
            let mut raw = String::new();
            collect_visible_text(root, &mut raw);
            raw.split_whitespace().collect::<Vec<_>>().join(" ")
        })
    }

    /// The first `max_chars` characters of the visible body text.
    pub fn excerpt(&self, max_chars: usize) -> String {
        self.body_text().chars().take(max_chars).collect()
    }
}

impl std::fmt::Debug for PageDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageDocument")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

/// Read a lowercased attribute value, `None` when absent.
pub fn attr_lower(el: &ElementRef<'_>, name: &str) -> Option<String> {
    el.value().attr(name).map(|v| v.to_lowercase())
}

/// Whether any of `attrs` on `el` contains any of `needles` (case-insensitive).
pub fn attrs_contain_any(el: &ElementRef<'_>, attrs: &[&str], needles: &[&str]) -> bool {
    attrs.iter().any(|attr| match attr_lower(el, attr) {
        Some(value) => needles.iter().any(|n| value.contains(n)),
        None => false,
    })
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!(
                selector = css,
                error = %e,
                "rejected CSS selector, treating as no match"
            );
            None
        }
    }
}

fn collect_visible_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                if INVISIBLE_TAGS.contains(&element.name()) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_visible_text(child_el, out);
                    if !INLINE_TAGS.contains(&element.name()) {
                        out.push(' ');
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageDocument {
        PageDocument::parse("https://shop.example/cart?step=2", html).unwrap()
    }

    #[test]
    fn rejects_relative_url() {
        let err = PageDocument::parse("/just/a/path", "<p>hi</p>").unwrap_err();
        assert!(matches!(err, PageError::InvalidUrl { .. }));
    }

    #[test]
    fn url_accessors() {
        let doc = PageDocument::parse("https://WWW.Example.COM/a/b?x=1", "").unwrap();
        assert_eq!(doc.host(), "www.example.com");
        assert_eq!(doc.path_and_query(), "/a/b?x=1");
    }

    #[test]
    fn body_text_skips_scripts_and_collapses_whitespace() {
        let doc = page(
            r#"<html><head><title>T</title></head><body>
                <p>Hello
                   world</p>
                <script>var hurry = "buy now";</script>
                <style>.x { color: red }</style>
                <button>Add to Cart</button><button>Add to Cart</button>
            </body></html>"#,
        );
        assert_eq!(doc.body_text(), "Hello world Add to Cart Add to Cart");
    }

    #[test]
    fn inline_elements_do_not_split_words() {
        let doc = page(
            "<p>pur<b>chase</b> <span>now</span></p><p>next</p><div>block<br>break</div>",
        );
        assert_eq!(doc.body_text(), "purchase now next block break");
    }

    #[test]
    fn non_utf8_bytes_are_decoded_lossily() {
        let doc =
            PageDocument::parse_bytes("https://shop.example/", b"<p>Caf\xe9 \xa3 5</p>").unwrap();
        assert_eq!(doc.body_text(), "Caf\u{FFFD} \u{FFFD} 5");
    }

    #[test]
    fn missing_elements_are_explicit() {
        let doc = page("<p>nothing here</p>");
        assert!(doc.select_first("form").is_none());
        assert_eq!(doc.count("iframe"), 0);
        assert!(doc.select_all("article").is_empty());
    }

    #[test]
    fn bad_selector_matches_nothing() {
        let doc = page("<div class='feed'></div>");
        assert_eq!(doc.count("div[[["), 0);
        assert!(doc.select_first(":::").is_none());
    }

    #[test]
    fn attribute_helpers_are_case_insensitive() {
        let doc = page(r#"<input name="CardNumber" placeholder="1234">"#);
        let input = doc.select_first("input").unwrap();
        assert_eq!(attr_lower(&input, "name").as_deref(), Some("cardnumber"));
        assert!(attrs_contain_any(&input, &["name", "id"], &["card"]));
        assert!(!attrs_contain_any(&input, &["id"], &["card"]));
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let doc = page("<p>€€€ price</p>");
        assert_eq!(doc.excerpt(2), "€€");
    }
}
