use rust_decimal::Decimal;

/// The fixed expense categories an employee can file a bill under.
pub const EXPENSE_TYPES: &[&str] = &[
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Équipement et matériel",
    "Fournitures de bureau",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Refused => "refused",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "accepted" => Self::Accepted,
            "refused" => Self::Refused,
            _ => Self::Pending,
        }
    }

    /// User-facing label shown in the bills table.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Accepted => "Accepté",
            Self::Refused => "Refusé",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One expense-report record. `id` and `status` are store-assigned; the
/// `file_url`/`file_name` pair comes from a prior receipt upload and must be
/// set before the record is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub id: Option<i64>,
    pub email: String,
    pub expense_type: String,
    pub name: String,
    pub amount: Decimal,
    pub date: String,
    pub vat: Option<Decimal>,
    pub pct: u32,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub status: BillStatus,
    pub created_at: String,
}

impl Bill {
    /// Default percentage applied when the form's `pct` field is absent or
    /// unparsable.
    pub const DEFAULT_PCT: u32 = 20;
}
