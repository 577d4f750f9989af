use std::path::PathBuf;

use crate::containers::{BillRow, BillsList, NewBillForm, ReceiptModal, Route};
use crate::models::Session;
use crate::store::BillsStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Editing,
    Browse,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Editing => write!(f, "EDIT"),
            Self::Browse => write!(f, "FICHIER"),
        }
    }
}

/// Page headings, matching the product's copy.
pub(crate) fn route_title(route: Route) -> &'static str {
    match route {
        Route::Bills => "Mes notes de frais",
        Route::NewBill => "Envoyer une note de frais",
    }
}

/// Editable entries of the new-bill form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    ExpenseType,
    Name,
    Date,
    Amount,
    Vat,
    Pct,
    Commentary,
    Receipt,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::ExpenseType,
            Self::Name,
            Self::Date,
            Self::Amount,
            Self::Vat,
            Self::Pct,
            Self::Commentary,
            Self::Receipt,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::ExpenseType => "Type de dépense",
            Self::Name => "Nom de la dépense",
            Self::Date => "Date (AAAA-MM-JJ)",
            Self::Amount => "Montant TTC",
            Self::Vat => "TVA",
            Self::Pct => "%",
            Self::Commentary => "Commentaire",
            Self::Receipt => "Justificatif",
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) route: Route,
    pub(crate) input_mode: InputMode,
    pub(crate) session: Session,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Bills page
    pub(crate) bills: Vec<BillRow>,
    pub(crate) bill_index: usize,
    pub(crate) bill_scroll: usize,
    pub(crate) error_banner: Option<String>,
    pub(crate) receipt_modal: Option<ReceiptModal>,

    // New-bill page
    pub(crate) form: NewBillForm,
    pub(crate) field_index: usize,
    pub(crate) edit_buffer: String,

    // Receipt file browser overlay
    pub(crate) browser_path: PathBuf,
    pub(crate) browser_entries: Vec<PathBuf>,
    pub(crate) browser_index: usize,
    pub(crate) browser_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(session: Session) -> Self {
        let browser_path = directories::UserDirs::new()
            .map(|d| d.home_dir().to_path_buf())
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")));
        Self {
            running: true,
            route: Route::Bills,
            input_mode: InputMode::Normal,
            form: NewBillForm::new(session.clone()),
            session,
            status_message: String::new(),
            show_help: false,

            bills: Vec::new(),
            bill_index: 0,
            bill_scroll: 0,
            error_banner: None,
            receipt_modal: None,

            field_index: 0,
            edit_buffer: String::new(),

            browser_path,
            browser_entries: Vec::new(),
            browser_index: 0,
            browser_scroll: 0,

            visible_rows: 20,
        }
    }

    /// Re-fetch the bills table. A store rejection becomes the error banner,
    /// verbatim.
    pub(crate) fn refresh_bills(&mut self, store: Option<&dyn BillsStore>) {
        match BillsList::new(store).get_bills() {
            Ok(rows) => {
                self.bills = rows;
                self.error_banner = None;
                if self.bill_index >= self.bills.len() && !self.bills.is_empty() {
                    self.bill_index = self.bills.len() - 1;
                }
            }
            Err(err) => {
                self.bills.clear();
                self.bill_index = 0;
                self.bill_scroll = 0;
                self.error_banner = Some(err.to_string());
            }
        }
    }

    pub(crate) fn selected_bill(&self) -> Option<&BillRow> {
        self.bills.get(self.bill_index)
    }

    /// Start over with a blank form for the acting user.
    pub(crate) fn reset_form(&mut self) {
        self.form = NewBillForm::new(self.session.clone());
        self.field_index = 0;
        self.edit_buffer.clear();
    }

    pub(crate) fn refresh_browser(&mut self) {
        let mut entries: Vec<PathBuf> = Vec::new();

        if let Some(parent) = self.browser_path.parent() {
            entries.push(parent.to_path_buf());
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.browser_path) {
            let is_hidden = |p: &PathBuf| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'))
            };

            let all: Vec<PathBuf> = read_dir
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| !is_hidden(p))
                .collect();

            // Dirs first, then files, each sorted alphabetically. The
            // extension check happens on selection, so unsupported files
            // stay visible and picking one reports the validation message.
            let mut dirs: Vec<PathBuf> = all.iter().filter(|p| p.is_dir()).cloned().collect();
            let mut files: Vec<PathBuf> = all.iter().filter(|p| !p.is_dir()).cloned().collect();
            dirs.sort();
            files.sort();
            entries.extend(dirs);
            entries.extend(files);
        }

        self.browser_entries = entries;
        self.browser_index = 0;
        self.browser_scroll = 0;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
