// crates/tasklist-store-sqlite/tests/sqlite_store.rs
// ============================================================================
// Module: SQLite Item Store Tests
// Description: Behavioral tests for the SQLite item store.
// Purpose: Validate CRUD behavior, identifier allocation, and isolation.
// ============================================================================

//! ## Overview
//! Integration tests for [`SqliteItemStore`]:
//! - Create, list, update, and delete round trips
//! - Monotonic identifiers that survive deletion of the highest row
//! - Not-found reporting for unknown identifiers
//! - Independent databases per store instance
//! - Concurrent writers through a shared store

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use tasklist_core::Description;
use tasklist_core::FailureKind;
use tasklist_core::FlashLevel;
use tasklist_core::FormFields;
use tasklist_core::ItemId;
use tasklist_core::ItemStore;
use tasklist_core::StoreError;
use tasklist_core::runtime::create_item;
use tasklist_core::runtime::delete_item;
use tasklist_core::runtime::list_items;
use tasklist_core::runtime::update_item;
use tasklist_store_sqlite::SqliteItemStore;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn store() -> SqliteItemStore {
    SqliteItemStore::open_in_memory().expect("store init")
}

fn description(text: &str) -> Description {
    Description::parse(text).expect("valid description")
}

fn id(raw: u64) -> ItemId {
    ItemId::from_raw(raw).expect("nonzero id")
}

fn seeded_store(count: usize) -> SqliteItemStore {
    let store = store();
    for n in 0 .. count {
        store.create(&description(&format!("seed {n}"))).unwrap();
    }
    store
}

// ============================================================================
// SECTION: CRUD
// ============================================================================

#[test]
fn new_store_is_empty() {
    assert!(store().list().unwrap().is_empty());
}

#[test]
fn create_assigns_sequential_ids() {
    let store = store();
    let first = store.create(&description("Buy milk")).unwrap();
    let second = store.create(&description("Walk dog")).unwrap();
    assert_eq!(first.id, id(1));
    assert_eq!(second.id, id(2));
    assert!(!first.completed);

    let items = store.list().unwrap();
    assert_eq!(items, vec![first, second]);
}

#[test]
fn update_sets_and_clears_completion() {
    let store = store();
    store.create(&description("Buy milk")).unwrap();

    let done = store.update(id(1), true).unwrap();
    assert!(done.completed);
    assert!(store.get(id(1)).unwrap().unwrap().completed);

    let undone = store.update(id(1), false).unwrap();
    assert!(!undone.completed);
    assert!(!store.get(id(1)).unwrap().unwrap().completed);
}

#[test]
fn delete_removes_row() {
    let store = store();
    store.create(&description("Buy milk")).unwrap();
    store.delete(id(1)).unwrap();
    assert!(store.get(id(1)).unwrap().is_none());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn unknown_ids_report_not_found() {
    let store = store();
    assert!(store.get(id(4)).unwrap().is_none());
    assert_eq!(store.update(id(4), true), Err(StoreError::NotFound(id(4))));
    assert_eq!(store.delete(id(4)), Err(StoreError::NotFound(id(4))));
}

#[test]
fn ids_are_not_reused_after_deleting_highest_row() {
    let store = store();
    store.create(&description("a")).unwrap();
    store.create(&description("b")).unwrap();
    store.delete(id(2)).unwrap();
    let next = store.create(&description("c")).unwrap();
    assert_eq!(next.id, id(3));
}

#[test]
fn multibyte_descriptions_round_trip() {
    let store = store();
    let text = "é".repeat(25);
    let item = store.create(&description(&text)).unwrap();
    assert_eq!(store.get(item.id).unwrap().unwrap().description.as_str(), text);
}

#[test]
fn stores_do_not_share_databases() {
    let left = store();
    let right = store();
    left.create(&description("left")).unwrap();
    assert_eq!(left.list().unwrap().len(), 1);
    assert!(right.list().unwrap().is_empty());
}

// ============================================================================
// SECTION: Actions
// ============================================================================

#[test]
fn actions_run_against_sqlite() {
    let store = store();
    let created =
        create_item(&store, &FormFields::from_pairs([("description", "Buy milk")])).unwrap();
    assert_eq!(created.item_id, Some(id(1)));

    let patched =
        update_item(&store, &FormFields::from_pairs([("id", "1"), ("completed", "yes")])).unwrap();
    assert!(patched.is_applied());
    assert!(store.get(id(1)).unwrap().unwrap().completed);

    let deleted = delete_item(&store, &FormFields::from_pairs([("id", "1")])).unwrap();
    assert!(deleted.is_applied());
    let again = delete_item(&store, &FormFields::from_pairs([("id", "1")])).unwrap();
    assert!(!again.is_applied());
    assert_eq!(again.flashes[0].text, "Item 1 does not exist");
}

// ============================================================================
// SECTION: Concurrency
// ============================================================================

#[test]
fn concurrent_creates_get_distinct_ids() {
    let store = Arc::new(store());
    let handles: Vec<_> = (0 .. 8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for n in 0 .. 10 {
                    store.create(&description(&format!("worker {worker} item {n}"))).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let items = store.list().unwrap();
    assert_eq!(items.len(), 80);
    let ids: Vec<u64> = items.iter().map(|item| item.id.get()).collect();
    let expected: Vec<u64> = (1 ..= 80).collect();
    assert_eq!(ids, expected);
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn stored_descriptions_match_input(text in "[a-zA-Z0-9 ]{1,50}") {
        let store = store();
        let item = store.create(&description(&text)).unwrap();
        let loaded = store.get(item.id).unwrap().unwrap();
        prop_assert_eq!(loaded.description.as_str(), text.as_str());
    }
}

proptest! {
    #[test]
    fn create_action_adds_one_pending_row(
        seeded in 0usize .. 4,
        text in "[a-z é€🦀]{1,12}",
    ) {
        let store = seeded_store(seeded);
        let outcome = create_item(&store, &FormFields::from_pairs([("description", text.clone())]))
            .unwrap();
        prop_assert!(outcome.is_applied());

        let items = list_items(&store).unwrap();
        prop_assert_eq!(items.len(), seeded + 1);
        let created = items.last().unwrap();
        prop_assert_eq!(created.description.as_str(), text.as_str());
        prop_assert!(!created.completed);
    }

    #[test]
    fn create_action_rejects_over_limit_without_insert(
        seeded in 0usize .. 4,
        text in "[é€🦀]{26,40}",
    ) {
        let store = seeded_store(seeded);
        let outcome = create_item(&store, &FormFields::from_pairs([("description", text)]))
            .unwrap();
        prop_assert_eq!(outcome.failure, Some(FailureKind::Validation));
        prop_assert_eq!(outcome.flashes.len(), 1);
        prop_assert_eq!(outcome.flashes[0].level, FlashLevel::Error);
        prop_assert_eq!(list_items(&store).unwrap().len(), seeded);
    }

    #[test]
    fn unknown_ids_up_to_u64_max_are_not_found(raw in 2u64 ..= u64::MAX) {
        let store = seeded_store(1);
        let raw = raw.to_string();
        let update =
            FormFields::from_pairs([("id", raw.clone()), ("completed", "true".to_string())]);
        let updated = update_item(&store, &update).unwrap();
        prop_assert_eq!(updated.failure, Some(FailureKind::NotFound));
        prop_assert_eq!(updated.flashes.len(), 1);

        let deleted = delete_item(&store, &FormFields::from_pairs([("id", raw)])).unwrap();
        prop_assert_eq!(deleted.failure, Some(FailureKind::NotFound));
        let items = list_items(&store).unwrap();
        prop_assert_eq!(items.len(), 1);
        prop_assert!(!items[0].completed);
    }
}
