mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

#[cfg(test)]
pub(crate) mod mock;

use thiserror::Error;

use crate::models::Bill;

/// Store rejection, rendered verbatim as the user-visible error banner.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("Erreur 404")]
    NotFound,
    #[error("Erreur 500")]
    Internal,
}

/// Payload of a receipt upload: the file content plus the identity of the
/// employee it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptUpload {
    pub email: String,
    pub file_name: String,
    pub content: Vec<u8>,
}

/// What a successful upload hands back: where the receipt now lives and the
/// key of the draft bill record it opened, used as the selector when the
/// form is finally submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReceipt {
    pub file_url: String,
    pub key: i64,
}

/// Data-access surface the two page components consume. Uploading a receipt
/// and finalizing the bill are separate calls; a bill record is only visible
/// in `list` once `update` has finalized it.
pub trait BillsStore {
    fn list(&self) -> Result<Vec<Bill>, StoreError>;
    fn upload_receipt(&mut self, upload: &ReceiptUpload) -> Result<StoredReceipt, StoreError>;
    fn update(&mut self, key: i64, bill: &Bill) -> Result<Bill, StoreError>;
}
