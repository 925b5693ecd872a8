//! Payment detector: card fields, processor iframes, payment form actions,
//! and forms that submit over plain HTTP.

use scraper::ElementRef;

use crate::config::ResolverConfig;
use crate::detect::{Detection, Detector};
use crate::dom::{PageDocument, attr_lower, attrs_contain_any};
use crate::page::PageType;
use crate::signal::Signal;

const CARD_ATTRS: &[&str] = &["name", "autocomplete", "placeholder"];
const CARD_NEEDLES: &[&str] = &["card", "cc-", "credit"];
const PAYMENT_ACTION_NEEDLES: &[&str] = &["pay", "checkout"];

pub struct PaymentDetector {
    processors: Vec<String>,
}

impl PaymentDetector {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            processors: config
                .payment_processors
                .iter()
                .map(|p| p.to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}

impl PaymentDetector {
    fn is_processor_frame(&self, frame: &ElementRef<'_>) -> bool {
        attr_lower(frame, "src")
            .is_some_and(|src| self.processors.iter().any(|p| src.contains(p.as_str())))
    }
}

impl Detector for PaymentDetector {
    fn page_type(&self) -> PageType {
        PageType::Payment
    }

    fn detect(&self, page: &PageDocument) -> Detection {
        let mut out = Detection::default();

        let card_fields = page
            .select_all("input")
            .iter()
            .filter(|el| attrs_contain_any(el, CARD_ATTRS, CARD_NEEDLES))
            .count();
        if card_fields > 0 {
            let detail = format!("{card_fields} fields");
            out.intent
                .push(Signal::dom("card-input-fields").with_detail(detail));
        }

        let has_processor_frame = page
            .select_all("iframe[src]")
            .iter()
            .any(|frame| self.is_processor_frame(frame));
        if has_processor_frame {
            out.intent.push(Signal::dom("payment-processor-iframe"));
        }

        let forms = page.select_all("form[action]");
        let has_payment_form = forms
            .iter()
            .any(|form| attrs_contain_any(form, &["action"], PAYMENT_ACTION_NEEDLES));
        if has_payment_form {
            out.intent.push(Signal::dom("payment-form-action"));
        }

        // One signal per offending form.
        for form in &forms {
            let insecure = attr_lower(form, "action")
                .is_some_and(|action| action.trim_start().starts_with("http://"));
            if insecure {
                out.risk.push(Signal::risk("insecure-form-action"));
            }
        }

        out
    }
}
