#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use std::str::FromStr;

use super::{BillsStore, ReceiptUpload, StoreError, StoredReceipt};
use crate::models::{Bill, BillStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockCall {
    Upload,
    Update,
}

/// In-memory store double: serves a fixed fixture set, records every call
/// in order, and fails on demand with a chosen `StoreError`.
pub(crate) struct MockStore {
    bills: Vec<Bill>,
    pub(crate) calls: Vec<MockCall>,
    pub(crate) uploads: Vec<ReceiptUpload>,
    pub(crate) updates: Vec<(i64, Bill)>,
    fail_list: Option<StoreError>,
    fail_upload: Option<StoreError>,
    fail_update: Option<StoreError>,
    next_key: i64,
}

impl MockStore {
    pub(crate) fn empty() -> Self {
        Self {
            bills: Vec::new(),
            calls: Vec::new(),
            uploads: Vec::new(),
            updates: Vec::new(),
            fail_list: None,
            fail_upload: None,
            fail_update: None,
            next_key: 1,
        }
    }

    pub(crate) fn with_fixtures() -> Self {
        let mut store = Self::empty();
        store.bills = fixture_bills();
        store.next_key = 100;
        store
    }

    pub(crate) fn with_bills(bills: Vec<Bill>) -> Self {
        let mut store = Self::empty();
        store.bills = bills;
        store.next_key = 100;
        store
    }

    pub(crate) fn failing_list(err: StoreError) -> Self {
        let mut store = Self::with_fixtures();
        store.fail_list = Some(err);
        store
    }

    pub(crate) fn failing_upload(err: StoreError) -> Self {
        let mut store = Self::empty();
        store.fail_upload = Some(err);
        store
    }

    pub(crate) fn failing_update(err: StoreError) -> Self {
        let mut store = Self::empty();
        store.fail_update = Some(err);
        store
    }

    pub(crate) fn count(&self, call: MockCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl BillsStore for MockStore {
    fn list(&self) -> Result<Vec<Bill>, StoreError> {
        if let Some(err) = self.fail_list {
            return Err(err);
        }
        Ok(self.bills.clone())
    }

    fn upload_receipt(&mut self, upload: &ReceiptUpload) -> Result<StoredReceipt, StoreError> {
        self.calls.push(MockCall::Upload);
        if let Some(err) = self.fail_upload {
            return Err(err);
        }
        self.uploads.push(upload.clone());
        let key = self.next_key;
        self.next_key += 1;
        Ok(StoredReceipt {
            file_url: format!("https://localhost/receipts/{key}"),
            key,
        })
    }

    fn update(&mut self, key: i64, bill: &Bill) -> Result<Bill, StoreError> {
        self.calls.push(MockCall::Update);
        if let Some(err) = self.fail_update {
            return Err(err);
        }
        let mut persisted = bill.clone();
        persisted.id = Some(key);
        self.updates.push((key, persisted.clone()));
        self.bills.insert(0, persisted.clone());
        Ok(persisted)
    }
}

/// The four-bill fixture set, already descending by date as the backend
/// returns it.
pub(crate) fn fixture_bills() -> Vec<Bill> {
    vec![
        fixture("encore", "Hôtel et logement", "400", "2004-04-04", BillStatus::Pending),
        fixture("test3", "Services en ligne", "300", "2003-03-03", BillStatus::Accepted),
        fixture("test2", "Restaurants et bars", "200", "2002-02-02", BillStatus::Refused),
        fixture("test1", "Transports", "100", "2001-01-01", BillStatus::Refused),
    ]
}

fn fixture(name: &str, expense_type: &str, amount: &str, date: &str, status: BillStatus) -> Bill {
    Bill {
        id: None,
        email: "a@a".into(),
        expense_type: expense_type.into(),
        name: name.into(),
        amount: Decimal::from_str(amount).unwrap(),
        date: date.into(),
        vat: Some(Decimal::from_str("20").unwrap()),
        pct: 20,
        commentary: String::new(),
        file_url: format!("https://localhost/receipts/{name}.jpg"),
        file_name: format!("{name}.jpg"),
        status,
        created_at: format!("{date}T00:00:00Z"),
    }
}
