#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{Bill, BillStatus};
use crate::store::mock::{fixture_bills, MockCall, MockStore};
use crate::store::{BillsStore, StoreError};

// ── get_bills ─────────────────────────────────────────────────

#[test]
fn test_no_store_returns_empty_list() {
    let page = BillsList::new(None);
    assert!(page.get_bills().unwrap().is_empty());
}

#[test]
fn test_row_count_matches_store_collection() {
    let store = MockStore::with_fixtures();
    let expected = store.list().unwrap().len();

    let page = BillsList::new(Some(&store));
    assert_eq!(page.get_bills().unwrap().len(), expected);
}

#[test]
fn test_bills_are_ordered_anti_chronologically() {
    let store = MockStore::with_fixtures();
    let rows = BillsList::new(Some(&store)).get_bills().unwrap();

    assert!(!rows.is_empty());
    for pair in rows.windows(2) {
        assert!(
            pair[0].raw_date >= pair[1].raw_date,
            "{} should not come before {}",
            pair[1].raw_date,
            pair[0].raw_date
        );
    }
}

#[test]
fn test_dates_and_statuses_are_formatted_for_display() {
    let store = MockStore::with_fixtures();
    let rows = BillsList::new(Some(&store)).get_bills().unwrap();

    assert_eq!(rows[0].date, "4 Avr. 04");
    assert_eq!(rows[0].status, "En attente");
    assert_eq!(rows[1].date, "3 Mar. 03");
    assert_eq!(rows[1].status, "Accepté");
    assert_eq!(rows[3].date, "1 Jan. 01");
    assert_eq!(rows[3].status, "Refusé");
}

#[test]
fn test_corrupt_date_is_kept_raw_and_does_not_abort_list() {
    let mut bills = fixture_bills();
    bills[2].date = "not-a-date".into();
    let store = MockStore::with_bills(bills);

    let rows = BillsList::new(Some(&store)).get_bills().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2].date, "not-a-date");
    // The healthy neighbours are still formatted.
    assert_eq!(rows[0].date, "4 Avr. 04");
    assert_eq!(rows[3].date, "1 Jan. 01");
}

#[test]
fn test_list_rejection_propagates_404() {
    let store = MockStore::failing_list(StoreError::NotFound);
    let err = BillsList::new(Some(&store)).get_bills().unwrap_err();
    assert_eq!(err.to_string(), "Erreur 404");
}

#[test]
fn test_list_rejection_propagates_500() {
    let store = MockStore::failing_list(StoreError::Internal);
    let err = BillsList::new(Some(&store)).get_bills().unwrap_err();
    assert_eq!(err.to_string(), "Erreur 500");
}

// ── click actions ─────────────────────────────────────────────

#[test]
fn test_click_new_bill_navigates_without_store_calls() {
    let store = MockStore::with_fixtures();
    let page = BillsList::new(Some(&store));

    assert_eq!(page.click_new_bill(), Route::NewBill);
    assert_eq!(store.calls.len(), 0);
}

#[test]
fn test_click_icon_eye_opens_modal_once_without_store_calls() {
    let store = MockStore::with_fixtures();
    let page = BillsList::new(Some(&store));
    let rows = page.get_bills().unwrap();

    let modal = page.click_icon_eye(&rows[0]);
    assert_eq!(modal.file_url, rows[0].file_url);
    assert_eq!(modal.file_name, rows[0].file_name);
    // list() is a read on an immutable receiver; no mutating call was made.
    assert_eq!(store.count(MockCall::Upload), 0);
    assert_eq!(store.count(MockCall::Update), 0);
}

#[test]
fn test_eye_modal_works_without_a_store() {
    let page = BillsList::new(None);
    let row = BillRow {
        id: Some(1),
        expense_type: "Transports".into(),
        name: "test1".into(),
        date: "1 Jan. 01".into(),
        raw_date: "2001-01-01".into(),
        amount: rust_decimal_macros::dec!(100),
        status: "Refusé".into(),
        file_url: "https://localhost/receipts/test1.jpg".into(),
        file_name: "test1.jpg".into(),
    };
    let modal = page.click_icon_eye(&row);
    assert_eq!(modal.file_url, "https://localhost/receipts/test1.jpg");
}

// ── status labels straight from the model ─────────────────────

#[test]
fn test_row_uses_status_labels() {
    let mut bill = fixture_bills().remove(0);
    bill.status = BillStatus::Accepted;
    let store = MockStore::with_bills(vec![bill]);

    let rows = BillsList::new(Some(&store)).get_bills().unwrap();
    assert_eq!(rows[0].status, "Accepté");
}

#[test]
fn test_empty_store_collection_yields_empty_rows() {
    let store = MockStore::empty();
    assert!(BillsList::new(Some(&store)).get_bills().unwrap().is_empty());
}

// Keeps the fixture honest: the mock must return descending dates, since
// ordering is the store's responsibility, not the component's.
#[test]
fn test_fixture_collection_is_descending() {
    let bills: Vec<Bill> = fixture_bills();
    for pair in bills.windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }
}
