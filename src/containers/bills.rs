use rust_decimal::Decimal;

use super::Route;
use crate::format;
use crate::store::{BillsStore, StoreError};

/// One bill prepared for display: date and status are already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub id: Option<i64>,
    pub expense_type: String,
    pub name: String,
    /// Display date (`"4 Avr. 04"`), or the raw wire value when formatting
    /// failed.
    pub date: String,
    /// Wire date (`YYYY-MM-DD`), kept for ordering.
    pub raw_date: String,
    pub amount: Decimal,
    pub status: String,
    pub file_url: String,
    pub file_name: String,
}

/// Receipt preview overlay opened by the eye action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptModal {
    pub file_url: String,
    pub file_name: String,
}

/// The bills page component: fetches, formats and hands out rows, and turns
/// the two click affordances into values the event loop can apply.
pub struct BillsList<'a> {
    store: Option<&'a dyn BillsStore>,
}

impl<'a> BillsList<'a> {
    pub fn new(store: Option<&'a dyn BillsStore>) -> Self {
        Self { store }
    }

    /// Fetch the bills and prepare them for the table. A store rejection
    /// propagates; a malformed date on a single record does not — the record
    /// keeps its raw date and the failure is logged. Ordering is whatever
    /// the store returned.
    pub fn get_bills(&self) -> Result<Vec<BillRow>, StoreError> {
        let Some(store) = self.store else {
            return Ok(Vec::new());
        };
        let bills = store.list()?;
        let rows = bills
            .into_iter()
            .map(|bill| {
                let date = match format::format_date(&bill.date) {
                    Ok(formatted) => formatted,
                    Err(err) => {
                        tracing::warn!(bill_id = ?bill.id, %err, "keeping raw date on corrupt bill");
                        bill.date.clone()
                    }
                };
                BillRow {
                    id: bill.id,
                    expense_type: bill.expense_type,
                    name: bill.name,
                    date,
                    raw_date: bill.date,
                    amount: bill.amount,
                    status: bill.status.label().to_string(),
                    file_url: bill.file_url,
                    file_name: bill.file_name,
                }
            })
            .collect();
        Ok(rows)
    }

    /// "Nouvelle note de frais" button. Pure navigation, no store access.
    pub fn click_new_bill(&self) -> Route {
        Route::NewBill
    }

    /// Eye icon on a row: open the receipt preview. No store access.
    pub fn click_icon_eye(&self, row: &BillRow) -> ReceiptModal {
        ReceiptModal {
            file_url: row.file_url.clone(),
            file_name: row.file_name.clone(),
        }
    }
}
