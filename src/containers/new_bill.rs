use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use super::Route;
use crate::models::{Bill, BillStatus, Session, EXPENSE_TYPES};
use crate::store::{BillsStore, ReceiptUpload, StoreError};

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReceiptError {
    #[error("Le fichier doit être au format jpg, jpeg ou png")]
    InvalidExtension,
    #[error("Justificatif illisible: {0}")]
    Unreadable(String),
    #[error("{0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Ajoutez un justificatif avant d'envoyer")]
    MissingReceipt,
    #[error("Justificatif en cours d'envoi, réessayez")]
    UploadInProgress,
    #[error("La note de frais a déjà été envoyée")]
    AlreadySubmitted,
    #[error("Montant invalide: '{0}'")]
    InvalidAmount(String),
    #[error("Date invalide: '{0}'")]
    InvalidDate(String),
    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Receipt metadata returned by a successful upload, carried until the form
/// is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedReceipt {
    pub file_url: String,
    pub key: i64,
    pub file_name: String,
}

/// Lifecycle of the receipt/submission pair. Submission is rejected unless
/// the upload has settled; a failed step falls back to the previous state so
/// the form stays usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptState {
    Empty,
    Uploading,
    Uploaded(UploadedReceipt),
    Submitting(UploadedReceipt),
    Submitted,
}

/// Raw form field values as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            expense_type: EXPENSE_TYPES[0].to_string(),
            name: String::new(),
            date: String::new(),
            amount: String::new(),
            vat: String::new(),
            pct: String::new(),
            commentary: String::new(),
        }
    }
}

/// The new-bill page component: validates and uploads the receipt as soon as
/// it is chosen, then assembles and persists the bill on submit.
pub struct NewBillForm {
    session: Session,
    pub fields: FormFields,
    state: ReceiptState,
}

impl NewBillForm {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            fields: FormFields::default(),
            state: ReceiptState::Empty,
        }
    }

    pub fn state(&self) -> &ReceiptState {
        &self.state
    }

    /// Filename shown next to the Justificatif field, once one is attached.
    pub fn receipt_file_name(&self) -> Option<&str> {
        match &self.state {
            ReceiptState::Uploaded(r) | ReceiptState::Submitting(r) => Some(&r.file_name),
            _ => None,
        }
    }

    /// Validate the chosen file's extension and, when valid, upload it right
    /// away. An invalid extension is a visible rejection and performs no
    /// store call. An upload failure is logged and leaves the form usable.
    pub fn attach_receipt(
        &mut self,
        store: &mut dyn BillsStore,
        path: &Path,
    ) -> Result<(), ReceiptError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        if !has_allowed_extension(&file_name) {
            tracing::warn!(%file_name, "rejected receipt with invalid extension");
            return Err(ReceiptError::InvalidExtension);
        }

        let content =
            std::fs::read(path).map_err(|err| ReceiptError::Unreadable(err.to_string()))?;

        self.state = ReceiptState::Uploading;
        let upload = ReceiptUpload {
            email: self.session.email.clone(),
            file_name: file_name.clone(),
            content,
        };
        match store.upload_receipt(&upload) {
            Ok(receipt) => {
                self.state = ReceiptState::Uploaded(UploadedReceipt {
                    file_url: receipt.file_url,
                    key: receipt.key,
                    file_name,
                });
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, %file_name, "receipt upload failed");
                self.state = ReceiptState::Empty;
                Err(err.into())
            }
        }
    }

    /// Assemble the bill from the field values and persist it. Requires a
    /// settled upload; on success navigates back to the bills page, on store
    /// failure stays put with the receipt still attached.
    pub fn submit(&mut self, store: &mut dyn BillsStore) -> Result<Route, SubmitError> {
        let receipt = match &self.state {
            ReceiptState::Uploaded(r) => r.clone(),
            ReceiptState::Uploading => return Err(SubmitError::UploadInProgress),
            ReceiptState::Empty => return Err(SubmitError::MissingReceipt),
            ReceiptState::Submitting(_) => return Err(SubmitError::UploadInProgress),
            ReceiptState::Submitted => return Err(SubmitError::AlreadySubmitted),
        };

        let bill = self.assemble_bill(&receipt)?;

        self.state = ReceiptState::Submitting(receipt.clone());
        match store.update(receipt.key, &bill) {
            Ok(_persisted) => {
                self.state = ReceiptState::Submitted;
                Ok(Route::Bills)
            }
            Err(err) => {
                tracing::warn!(%err, key = receipt.key, "bill submission failed");
                self.state = ReceiptState::Uploaded(receipt);
                Err(err.into())
            }
        }
    }

    fn assemble_bill(&self, receipt: &UploadedReceipt) -> Result<Bill, SubmitError> {
        let date = self.fields.date.trim();
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(SubmitError::InvalidDate(date.to_string()));
        }

        let amount_raw = self.fields.amount.trim();
        let amount = Decimal::from_str(amount_raw)
            .ok()
            .filter(|a| !a.is_sign_negative())
            .ok_or_else(|| SubmitError::InvalidAmount(amount_raw.to_string()))?;

        Ok(Bill {
            id: None,
            email: self.session.email.clone(),
            expense_type: self.fields.expense_type.clone(),
            name: self.fields.name.trim().to_string(),
            amount,
            date: date.to_string(),
            vat: Decimal::from_str(self.fields.vat.trim()).ok(),
            pct: self
                .fields
                .pct
                .trim()
                .parse::<u32>()
                .unwrap_or(Bill::DEFAULT_PCT),
            commentary: self.fields.commentary.trim().to_string(),
            file_url: receipt.file_url.clone(),
            file_name: receipt.file_name.clone(),
            status: BillStatus::Pending,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Case-insensitive suffix match against the allowed receipt formats.
fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
