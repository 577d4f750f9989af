mod bills;
mod new_bill;

pub use bills::{BillRow, BillsList, ReceiptModal};
pub use new_bill::{FormFields, NewBillForm, ReceiptError, ReceiptState, SubmitError, UploadedReceipt};

/// Navigation targets. Components hand a `Route` back to the caller instead
/// of touching the screen themselves; the event loop applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Bills,
    NewBill,
}

#[cfg(test)]
#[path = "bills_tests.rs"]
mod bills_tests;
