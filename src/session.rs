//! Caller-owned per-tab state.
//!
//! The resolver itself is stateless. A host that tracks several tabs keeps the
//! latest [`PageContext`] per tab here and passes it on to whatever consumes
//! it (trust scoring, warnings). Nothing in this crate holds one globally.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dom::PageDocument;
use crate::page::PageContext;
use crate::resolver::Resolver;

/// Browser tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub u32);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// Latest page context per tab.
#[derive(Debug, Default)]
pub struct TabContexts {
    contexts: HashMap<TabId, PageContext>,
}

impl TabContexts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the context for `tab`, returning the one it replaces.
    pub fn record(&mut self, tab: TabId, ctx: PageContext) -> Option<PageContext> {
        tracing::debug!(%tab, page_type = %ctx.page_type, "recorded page context");
        self.contexts.insert(tab, ctx)
    }

    /// Resolve `page` and record the result for `tab`.
    pub fn rescan(&mut self, tab: TabId, resolver: &Resolver, page: &PageDocument) -> &PageContext {
        let ctx = resolver.resolve(page);
        self.record(tab, ctx);
        &self.contexts[&tab]
    }

    pub fn get(&self, tab: TabId) -> Option<&PageContext> {
        self.contexts.get(&tab)
    }

    /// Forget a closed tab.
    pub fn remove(&mut self, tab: TabId) -> Option<PageContext> {
        self.contexts.remove(&tab)
    }

    pub fn clear(&mut self) {
        self.contexts.clear();
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
