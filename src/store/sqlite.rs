use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::schema;
use super::{BillsStore, ReceiptUpload, StoreError, StoredReceipt};
use crate::models::{Bill, BillStatus};

/// Local sqlite-backed bills store. Receipts are copied into `receipts_dir`
/// at upload time; the bill row itself starts as a draft and becomes visible
/// to `list` once `update` finalizes it.
pub struct SqliteStore {
    conn: Connection,
    receipts_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(db_path: &Path, receipts_dir: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        std::fs::create_dir_all(receipts_dir).with_context(|| {
            format!("Failed to create receipts directory: {}", receipts_dir.display())
        })?;
        let mut store = Self {
            conn,
            receipts_dir: receipts_dir.to_path_buf(),
        };
        store.migrate().context("Database migration failed")?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory(receipts_dir: &Path) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        std::fs::create_dir_all(receipts_dir)?;
        let mut store = Self {
            conn,
            receipts_dir: receipts_dir.to_path_buf(),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn get_bill(&self, id: i64) -> Result<Bill, StoreError> {
        let result = self.conn.query_row(
            "SELECT id, email, expense_type, name, amount, date, vat, pct,
                    commentary, file_url, file_name, status, created_at
             FROM bills WHERE id = ?1",
            params![id],
            bill_from_row,
        );
        match result {
            Ok(bill) => Ok(bill),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound),
            Err(err) => Err(internal(err)),
        }
    }
}

impl BillsStore for SqliteStore {
    fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, email, expense_type, name, amount, date, vat, pct,
                        commentary, file_url, file_name, status, created_at
                 FROM bills WHERE draft = 0
                 ORDER BY date DESC, id DESC",
            )
            .map_err(internal)?;
        let rows = stmt.query_map([], bill_from_row).map_err(internal)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(internal)
    }

    fn upload_receipt(&mut self, upload: &ReceiptUpload) -> Result<StoredReceipt, StoreError> {
        let file_name = basename(&upload.file_name);
        let created_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO bills (email, file_name, created_at) VALUES (?1, ?2, ?3)",
                params![upload.email, file_name, created_at],
            )
            .map_err(internal)?;
        let key = self.conn.last_insert_rowid();

        let dest = self.receipts_dir.join(format!("{key}-{file_name}"));
        std::fs::write(&dest, &upload.content).map_err(internal)?;
        let file_url = dest.display().to_string();

        self.conn
            .execute(
                "UPDATE bills SET file_url = ?1 WHERE id = ?2",
                params![file_url, key],
            )
            .map_err(internal)?;

        Ok(StoredReceipt { file_url, key })
    }

    fn update(&mut self, key: i64, bill: &Bill) -> Result<Bill, StoreError> {
        let rows = self
            .conn
            .execute(
                "UPDATE bills SET email = ?1, expense_type = ?2, name = ?3, amount = ?4,
                        date = ?5, vat = ?6, pct = ?7, commentary = ?8, draft = 0
                 WHERE id = ?9",
                params![
                    bill.email,
                    bill.expense_type,
                    bill.name,
                    bill.amount.to_string(),
                    bill.date,
                    bill.vat.map(|v| v.to_string()),
                    bill.pct,
                    bill.commentary,
                    key,
                ],
            )
            .map_err(internal)?;
        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        self.get_bill(key)
    }
}

fn bill_from_row(row: &Row<'_>) -> rusqlite::Result<Bill> {
    let amount_str: String = row.get(4)?;
    let vat_str: Option<String> = row.get(6)?;
    let status_str: String = row.get(11)?;
    Ok(Bill {
        id: Some(row.get(0)?),
        email: row.get(1)?,
        expense_type: row.get(2)?,
        name: row.get(3)?,
        amount: Decimal::from_str(&amount_str).unwrap_or_default(),
        date: row.get(5)?,
        vat: vat_str.and_then(|v| Decimal::from_str(&v).ok()),
        pct: row.get(7)?,
        commentary: row.get(8)?,
        file_url: row.get(9)?,
        file_name: row.get(10)?,
        status: BillStatus::parse(&status_str),
        created_at: row.get(12)?,
    })
}

/// Last path component of a client-supplied filename. Browsers may hand over
/// values like `path\hello.png`; only the basename is kept.
fn basename(file_name: &str) -> String {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .to_string()
}

fn internal(err: impl std::fmt::Display) -> StoreError {
    tracing::error!(%err, "store operation failed");
    StoreError::Internal
}
