//! General risk detector: checks that apply to any page type.
//!
//! The generated-hostname check is a crude stand-in for typosquat detection
//! (a long run of lowercase alphanumerics before a common TLD). It has an
//! unmeasured false-positive rate and is reported as a possibility only.

use regex::Regex;
use url::Url;

use crate::config::ResolverConfig;
use crate::detect::compile;
use crate::dom::{PageDocument, attr_lower};
use crate::error::ConfigResult;
use crate::signal::Signal;

const POPUP_SELECTOR: &str = concat!(
    r#"dialog, [role="dialog"], [role="alertdialog"], [aria-modal="true"], "#,
    r#".modal, .popup, .overlay, [class*="modal"], [class*="popup"], [class*="overlay"]"#,
);
const COUNTDOWN_SELECTOR: &str = concat!(
    r#"[class*="countdown"], [class*="Countdown"], [class*="timer"], [class*="Timer"], "#,
    r#"[id*="countdown"], [data-countdown]"#,
);

pub struct RiskDetector {
    popups_max: usize,
    suspicious_host: Option<Regex>,
}

impl RiskDetector {
    pub fn new(config: &ResolverConfig) -> ConfigResult<Self> {
        let tlds: Vec<String> = config
            .suspicious_tlds
            .iter()
            .map(|t| regex::escape(t.trim_start_matches('.')))
            .filter(|t| !t.is_empty())
            .collect();
        let suspicious_host = if tlds.is_empty() {
            None
        } else {
            let min_len = config.thresholds.suspicious_host_min_len.max(1);
            Some(compile(
                "suspicious_tlds",
                &format!(r"[a-z0-9]{{{min_len},}}\.(?:{})$", tlds.join("|")),
            )?)
        };
        Ok(Self {
            popups_max: config.thresholds.popups_max,
            suspicious_host,
        })
    }

    /// Risk signals for the page, independent of its type.
    pub fn detect(&self, page: &PageDocument) -> Vec<Signal> {
        let mut signals = Vec::new();

        if page.count(POPUP_SELECTOR) > self.popups_max {
            signals.push(Signal::risk("excessive-popups"));
        }

        if page.exists(COUNTDOWN_SELECTOR) {
            signals.push(Signal::risk("countdown-timer"));
        }

        // Compared serialized, so opaque origins (`file:`, `data:`) all read "null".
        let page_origin = page.url().origin().ascii_serialization();
        for form in page.select_all("form[action]") {
            let Some(action) = attr_lower(&form, "action") else {
                continue;
            };
            let Some(target) = resolve_action(page.url(), &action) else {
                continue;
            };
            let origin = target.origin().ascii_serialization();
            if origin != page_origin {
                signals.push(Signal::risk("cross-origin-form").with_detail(origin));
            }
        }

        if self.is_suspicious_host(&page.host()) {
            signals.push(Signal::risk("suspicious-domain-name").with_detail("possible typosquat"));
        }

        signals
    }

    /// Whether `host` looks machine-generated.
    pub fn is_suspicious_host(&self, host: &str) -> bool {
        self.suspicious_host
            .as_ref()
            .is_some_and(|re| re.is_match(host))
    }
}

/// Resolve a form action against the page URL, as the browser would.
///
/// `javascript:` actions and unresolvable values yield `None`.
fn resolve_action(base: &Url, action: &str) -> Option<Url> {
    let action = action.trim();
    if action.starts_with("javascript:") {
        return None;
    }
    base.join(action).ok()
}
