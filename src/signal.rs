//! Evidence units emitted by detectors.
//!
//! A signal is stored as a typed record but travels as a short label:
//!
//! ```text
//! <category>:<tag>
//! <category>:<tag> (<detail>)
//! ```
//!
//! e.g. `url:known-shopping-domain` or `dom:buy-buttons (2 matched)`. The label
//! form is the contract with downstream consumers (trust scoring, warning UI),
//! so `Display`, `FromStr` and serde all speak it.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Where a piece of evidence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalCategory {
    /// Derived from the page URL alone.
    Url,
    /// Positive structural evidence found in the DOM.
    Dom,
    /// Suspicious or manipulative behavior, independent of page type.
    Risk,
}

impl SignalCategory {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Dom => "dom",
            Self::Risk => "risk",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "url" => Some(Self::Url),
            "dom" => Some(Self::Dom),
            "risk" => Some(Self::Risk),
            _ => None,
        }
    }
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A single detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signal {
    pub category: SignalCategory,
    /// Kebab-case name of the detection, e.g. `buy-buttons`.
    pub tag: String,
    /// Optional count or detail rendered in parentheses.
    pub detail: Option<String>,
}

impl Signal {
    pub fn new(category: SignalCategory, tag: impl Into<String>) -> Self {
        Self {
            category,
            tag: tag.into(),
            detail: None,
        }
    }

    pub fn url(tag: impl Into<String>) -> Self {
        Self::new(SignalCategory::Url, tag)
    }

    pub fn dom(tag: impl Into<String>) -> Self {
        Self::new(SignalCategory::Dom, tag)
    }

    pub fn risk(tag: impl Into<String>) -> Self {
        Self::new(SignalCategory::Risk, tag)
    }

    /// Attach a parenthesised detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The leading number of the detail, if it has one (`"3 phrases"` -> 3).
    pub fn count(&self) -> Option<usize> {
        self.detail
            .as_deref()?
            .split_whitespace()
            .next()?
            .parse()
            .ok()
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.category, self.tag)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

/// Error returned when a label does not follow the signal wire form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed signal label \"{label}\": {reason}")]
pub struct ParseSignalError {
    pub label: String,
    pub reason: &'static str,
}

impl FromStr for Signal {
    type Err = ParseSignalError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let fail = |reason| ParseSignalError {
            label: label.to_string(),
            reason,
        };

        let (prefix, rest) = label
            .split_once(':')
            .ok_or_else(|| fail("missing category prefix"))?;
        let category =
            SignalCategory::from_prefix(prefix).ok_or_else(|| fail("unknown category"))?;

        let (tag, detail) = match rest.find(" (") {
            Some(open) => {
                let detail = rest[open + 2..]
                    .strip_suffix(')')
                    .ok_or_else(|| fail("unterminated detail"))?;
                (&rest[..open], Some(detail.to_string()))
            }
            None => (rest, None),
        };
        if tag.is_empty() {
            return Err(fail("empty tag"));
        }

        Ok(Self {
            category,
            tag: tag.to_string(),
            detail,
        })
    }
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
