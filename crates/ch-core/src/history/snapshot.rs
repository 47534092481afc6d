use crate::entry::{matches_query, Entry};
use crate::settings::HistorySettings;

/// Observable state handed to renderers: `(items, maxItems, autoPasteEnabled)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySnapshot {
    pub items: Vec<Entry>,
    pub max_items: usize,
    pub auto_paste_enabled: bool,
}

impl HistorySnapshot {
    pub fn new(items: Vec<Entry>, settings: HistorySettings) -> Self {
        Self {
            items,
            max_items: settings.max_items,
            auto_paste_enabled: settings.auto_paste_enabled,
        }
    }

    /// Items matching `query`, in sequence order.
    pub fn filtered<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.items
            .iter()
            .filter(move |entry| matches_query(entry, query))
    }
}
