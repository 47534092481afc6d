//! Behavioural scenarios for [`HistoryStore`].

use std::collections::HashSet;

use ch_core::{EntryCandidate, EntryContent, EntryId, HistoryStore, RecordOutcome};

fn text(s: &str) -> EntryCandidate {
    EntryCandidate::new(EntryContent::Text(s.to_string()))
}

fn texts(store: &HistoryStore) -> Vec<String> {
    store
        .entries()
        .iter()
        .filter_map(|entry| entry.text().map(str::to_string))
        .collect()
}

fn ids(store: &HistoryStore) -> Vec<EntryId> {
    store.entries().iter().map(|entry| entry.id.clone()).collect()
}

fn assert_pinned_prefix(store: &HistoryStore) {
    let pinned = store.pinned_count();
    assert!(
        store.entries()[pinned..].iter().all(|entry| !entry.is_pinned),
        "pinned entry found after the pinned prefix"
    );
}

#[test]
fn six_distinct_records_with_capacity_five_evict_the_oldest() {
    let mut store = HistoryStore::new(5);
    for s in ["A", "B", "C", "D", "E", "F"] {
        store.record(text(s), EntryId::new(), 0);
    }
    assert_eq!(texts(&store), vec!["F", "E", "D", "C", "B"]);
}

#[test]
fn new_capture_lands_after_the_pinned_region() {
    let mut store = HistoryStore::new(10);
    store.record(text("A"), EntryId::from("a"), 0);
    store.record(text("B"), EntryId::from("b"), 1);
    assert_eq!(texts(&store), vec!["B", "A"]);

    assert_eq!(store.toggle_pin(&EntryId::from("a")), Some(true));
    assert_eq!(texts(&store), vec!["A", "B"]);
    assert!(store.entries()[0].is_pinned);

    store.record(text("C"), EntryId::from("c"), 2);
    assert_eq!(texts(&store), vec!["A", "C", "B"]);
}

#[test]
fn pretrimmed_text_equal_to_the_front_entry_is_unchanged() {
    // Candidates arrive trimmed from the normalizer; trimming itself is
    // covered by the app-level capture tests.
    let mut store = HistoryStore::new(10);
    store.record(text("hello"), EntryId::new(), 0);
    let outcome = store.record(text("hello"), EntryId::new(), 1);
    assert_eq!(outcome, RecordOutcome::Unchanged);
    assert_eq!(texts(&store), vec!["hello"]);
}

#[test]
fn shrinking_max_items_evicts_from_the_unpinned_tail() {
    let mut store = HistoryStore::new(10);
    for s in ["G", "F", "E", "D", "C", "B", "A"] {
        store.record(text(s), EntryId::from(s), 0);
    }
    store.toggle_pin(&EntryId::from("G"));

    let evicted = store.set_max_items(5);
    assert_eq!(evicted, vec![EntryId::from("F"), EntryId::from("E")]);
    assert_eq!(texts(&store), vec!["G", "A", "B", "C", "D"]);
}

#[test]
fn max_items_is_clamped_to_five_so_three_keeps_five() {
    let mut store = HistoryStore::new(10);
    for s in ["G", "F", "E", "D", "C", "B", "A"] {
        store.record(text(s), EntryId::new(), 0);
    }
    store.set_max_items(3);
    assert_eq!(store.max_items(), 5);
    assert_eq!(texts(&store), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn recording_the_front_entry_again_keeps_identity() {
    let mut store = HistoryStore::new(10);
    store.record(text("x"), EntryId::new(), 0);
    store.record(text("y"), EntryId::new(), 1);
    let before = ids(&store);

    assert_eq!(store.record(text("y"), EntryId::new(), 2), RecordOutcome::Unchanged);
    assert_eq!(ids(&store), before);
}

#[test]
fn recording_an_older_entry_moves_it_with_a_new_id() {
    let mut store = HistoryStore::new(10);
    for s in ["x", "y", "z"] {
        store.record(text(s), EntryId::from(s), 0);
    }
    let fresh = EntryId::from("x-again");
    store.record(text("x"), fresh.clone(), 5);

    assert_eq!(texts(&store), vec!["x", "z", "y"]);
    assert_eq!(store.len(), 3);
    assert_eq!(store.entries()[0].id, fresh);
    assert!(store.get(&EntryId::from("x")).is_none());
}

#[test]
fn toggling_twice_restores_flag_and_position() {
    let mut store = HistoryStore::new(10);
    for s in ["a", "b", "c"] {
        store.record(text(s), EntryId::from(s), 0);
    }
    store.toggle_pin(&EntryId::from("b"));
    let before = ids(&store);
    let target = EntryId::from("c");

    let was_pinned = store.get(&target).map(|e| e.is_pinned);
    store.toggle_pin(&target);
    store.toggle_pin(&target);

    assert_eq!(store.get(&target).map(|e| e.is_pinned), was_pinned);
    assert_eq!(ids(&store), before);
}

#[test]
fn invariants_hold_across_a_long_mixed_workload() {
    let mut store = HistoryStore::new(7);
    let words = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota"];

    for step in 0..400usize {
        let word = words[(step * 7 + step / 3) % words.len()];
        store.record(text(word), EntryId::new(), step as i64);

        if step % 5 == 0 {
            let index = step % store.len().max(1);
            if let Some(id) = store.entries().get(index).map(|e| e.id.clone()) {
                store.toggle_pin(&id);
            }
        }
        if step % 97 == 0 {
            store.set_max_items((step % 9) as i64 + 3);
        }

        assert!(
            store.len() <= store.max_items() || store.pinned_count() == store.len(),
            "length {} exceeds bound {}",
            store.len(),
            store.max_items()
        );
        assert_pinned_prefix(&store);

        let keys: HashSet<_> = store.entries().iter().map(|e| e.dedup_key()).collect();
        assert_eq!(keys.len(), store.len(), "duplicate content in history");
    }
}
