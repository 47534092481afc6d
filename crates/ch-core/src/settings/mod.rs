//! History configuration scalars and their bounds.
mod model;

pub use model::{
    clamp_max_items, HistorySettings, DEFAULT_MAX_ITEMS, MAX_ITEMS_UPPER_BOUND,
    MAX_ITEMS_LOWER_BOUND,
};
