use serde::{Deserialize, Serialize};

pub const MAX_ITEMS_LOWER_BOUND: usize = 5;
pub const MAX_ITEMS_UPPER_BOUND: usize = 500;
pub const DEFAULT_MAX_ITEMS: usize = 50;

/// Out-of-range input is clamped, never rejected.
pub fn clamp_max_items(n: i64) -> usize {
    n.clamp(MAX_ITEMS_LOWER_BOUND as i64, MAX_ITEMS_UPPER_BOUND as i64) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySettings {
    pub max_items: usize,
    pub auto_paste_enabled: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            auto_paste_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_max_items(-1), 5);
        assert_eq!(clamp_max_items(0), 5);
        assert_eq!(clamp_max_items(5), 5);
        assert_eq!(clamp_max_items(120), 120);
        assert_eq!(clamp_max_items(500), 500);
        assert_eq!(clamp_max_items(i64::MAX), 500);
    }

    #[test]
    fn defaults_match_first_run() {
        let settings = HistorySettings::default();
        assert_eq!(settings.max_items, 50);
        assert!(!settings.auto_paste_enabled);
    }
}
