//! Shopping detector: prices, buy buttons, quantity pickers, urgency copy.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ResolverConfig;
use crate::detect::{Detection, Detector, count_matches, phrase_regex};
use crate::dom::{PageDocument, attrs_contain_any};
use crate::error::ConfigResult;
use crate::page::PageType;
use crate::signal::Signal;

static RE_CURRENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$€£]\s?\d").expect("static regex must compile"));

const QUANTITY_ATTRS: &[&str] = &["name", "id", "class", "aria-label"];
const QUANTITY_NEEDLES: &[&str] = &["quantity", "qty", "size"];

pub struct ShoppingDetector {
    buy_buttons: Option<Regex>,
    urgency: Option<Regex>,
}

impl ShoppingDetector {
    pub fn new(config: &ResolverConfig) -> ConfigResult<Self> {
        Ok(Self {
            buy_buttons: phrase_regex("phrases.buy_buttons", &config.phrases.buy_buttons)?,
            urgency: phrase_regex("phrases.urgency", &config.phrases.urgency)?,
        })
    }
}

impl Detector for ShoppingDetector {
    fn page_type(&self) -> PageType {
        PageType::Shopping
    }

    fn detect(&self, page: &PageDocument) -> Detection {
        let mut out = Detection::default();
        let text = page.body_text();

        if RE_CURRENCY.is_match(text) {
            out.intent.push(Signal::dom("currency-prices"));
        }

        let buy = count_matches(self.buy_buttons.as_ref(), text);
        if buy > 0 {
            out.intent
                .push(Signal::dom("buy-buttons").with_detail(format!("{buy} matched")));
        }

        let has_selector = page
            .select_all("select, input")
            .iter()
            .any(|el| attrs_contain_any(el, QUANTITY_ATTRS, QUANTITY_NEEDLES));
        if has_selector {
            out.intent.push(Signal::dom("quantity-selector"));
        }

        // One aggregated signal, however many phrases matched.
        let urgency = count_matches(self.urgency.as_ref(), text);
        if urgency > 0 {
            let detail = format!("{urgency} phrases");
            out.risk
                .push(Signal::risk("urgency-language").with_detail(detail));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(html: &str) -> Detection {
        let page = PageDocument::parse("https://store.example/", html).unwrap();
        ShoppingDetector::new(&ResolverConfig::default())
            .unwrap()
            .detect(&page)
    }

    #[test]
    fn product_page_signals() {
        let d = detect(
            r#"<body>
                <h1>Trail Shoe</h1><span class="price">$ 89.99</span>
                <select name="size"><option>9</option></select>
                <button>Add to Cart</button><button>Buy Now</button>
            </body>"#,
        );
        let labels: Vec<_> = d.intent.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "dom:currency-prices",
                "dom:buy-buttons (2 matched)",
                "dom:quantity-selector",
            ]
        );
        assert!(d.risk.is_empty());
    }

    #[test]
    fn euro_and_pound_prices() {
        assert_eq!(detect("<p>Now €12</p>").intent[0].tag, "currency-prices");
        assert_eq!(detect("<p>Only £5</p>").intent[0].tag, "currency-prices");
        assert!(detect("<p>Price on request</p>").intent.is_empty());
    }

    #[test]
    fn urgency_is_one_aggregated_signal() {
        let d = detect(
            "<p>Limited time offer! Only 3 left. Hurry, deal ends soon. Flash sale today only.</p>",
        );
        assert_eq!(d.risk.len(), 1);
        assert_eq!(d.risk[0].to_string(), "risk:urgency-language (6 phrases)");
        assert_eq!(d.risk[0].count(), Some(6));
    }

    #[test]
    fn typographic_apostrophe_counts() {
        let d = detect("<p>Don’t miss it</p>");
        assert_eq!(d.risk[0].count(), Some(1));
    }

    #[test]
    fn quantity_input_by_class() {
        let d = detect(r#"<input type="number" class="Qty-Picker" value="1">"#);
        assert_eq!(d.intent.len(), 1);
        assert_eq!(d.intent[0].tag, "quantity-selector");
    }

    #[test]
    fn script_text_is_ignored() {
        let d = detect(r#"<body><script>const label = "add to cart"; // hurry</script></body>"#);
        assert!(d.is_empty());
    }
}
