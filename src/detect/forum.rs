//! Forum detector: reply boxes and threaded comment lists.

use crate::config::ResolverConfig;
use crate::detect::{Detection, Detector};
use crate::dom::{PageDocument, attrs_contain_any};
use crate::page::PageType;
use crate::signal::Signal;

const INPUT_SELECTOR: &str = concat!(
    r#"textarea, input[type="text"], input:not([type]), "#,
    r#"[contenteditable="true"], [contenteditable=""]"#,
);
const INPUT_ATTRS: &[&str] = &["name", "id", "class", "placeholder", "aria-label"];
const COMMENT_NEEDLES: &[&str] = &["comment", "reply"];
const COMMENT_SELECTOR: &str = concat!(
    r#"[class*="comment"], [class*="Comment"], [class*="reply"], [class*="Reply"], "#,
    r#"[id^="comment-"], [itemtype*="Comment"]"#,
);

pub struct ForumDetector {
    threaded_min: usize,
}

impl ForumDetector {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            threaded_min: config.thresholds.threaded_comments_min,
        }
    }
}

impl Detector for ForumDetector {
    fn page_type(&self) -> PageType {
        PageType::Forum
    }

    fn detect(&self, page: &PageDocument) -> Detection {
        let mut out = Detection::default();

        let has_input = page
            .select_all(INPUT_SELECTOR)
            .iter()
            .any(|el| attrs_contain_any(el, INPUT_ATTRS, COMMENT_NEEDLES));
        if has_input {
            out.intent.push(Signal::dom("comment-input"));
        }

        let comments = page
            .select_all(COMMENT_SELECTOR)
            .iter()
            .filter(|el| !is_form_control(el.value().name()))
            .count();
        if comments > self.threaded_min {
            let detail = format!("{comments} comments");
            out.intent
                .push(Signal::dom("threaded-comments").with_detail(detail));
        }

        out
    }
}

fn is_form_control(tag: &str) -> bool {
    matches!(tag, "textarea" | "input" | "button" | "form")
}
