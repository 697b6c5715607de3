//! Tests for the row expansion store.

use frozen_table::ExpansionStore;

#[test]
fn test_first_toggle_expands() {
    let mut store = ExpansionStore::new();
    assert!(!store.is_expanded("1"));
    assert!(store.toggle("1"));
    assert!(store.is_expanded("1"));
}

#[test]
fn test_toggle_twice_restores_state() {
    let mut store = ExpansionStore::new();
    store.toggle("expanded");
    store.toggle("collapsed");
    store.toggle("collapsed");

    for id in ["expanded", "collapsed", "never-seen"] {
        let before = store.is_expanded(id);
        store.toggle(id);
        store.toggle(id);
        assert_eq!(store.is_expanded(id), before, "row {id}");
    }
}

#[test]
fn test_rows_are_independent() {
    let mut store = ExpansionStore::new();
    store.toggle("1");
    store.toggle("2");
    store.toggle("3");
    store.toggle("2");

    assert!(store.is_expanded("1"));
    assert!(!store.is_expanded("2"));
    assert!(store.is_expanded("3"));
    assert_eq!(store.expanded_ids(), vec!["1", "3"]);
}
