pub(crate) const CURRENT_VERSION: i32 = 1;

pub(crate) const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS bills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL,
    expense_type TEXT NOT NULL DEFAULT '',
    name TEXT NOT NULL DEFAULT '',
    amount TEXT NOT NULL DEFAULT '0',
    date TEXT NOT NULL DEFAULT '',
    vat TEXT,
    pct INTEGER NOT NULL DEFAULT 20,
    commentary TEXT NOT NULL DEFAULT '',
    file_url TEXT NOT NULL DEFAULT '',
    file_name TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'pending',
    draft INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bills_date ON bills(date);
CREATE INDEX IF NOT EXISTS idx_bills_email ON bills(email);
";

/// (from_version, sql) pairs applied in order on existing databases.
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
