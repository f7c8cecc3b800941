use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::StoreUnavailable;

use super::model::{CompanyRow, Dataset};

/// Table holding the persisted dataset. Column names mirror the source file.
pub const TABLE: &str = "empresas";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS empresas (
    empresas TEXT NOT NULL,
    valor    REAL NOT NULL,
    change   REAL NOT NULL,
    change2  REAL NOT NULL,
    faixa    TEXT
)";

// ---------------------------------------------------------------------------
// Store – the only owner of the SQLite handle
// ---------------------------------------------------------------------------

/// Durable single-table mirror of a [`Dataset`].
///
/// Opening creates the table if it is absent; the connection is closed when
/// the `Store` is dropped.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreUnavailable> {
        let conn = Connection::open(path).map_err(|e| StoreUnavailable::new("open the database", e))?;
        log::debug!("Opened store at {}", path.display());
        Self::init(conn)
    }

    /// Private in-memory store, discarded on drop.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreUnavailable> {
        let conn = Connection::open_in_memory().map_err(|e| StoreUnavailable::new("open the database", e))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreUnavailable> {
        conn.execute_batch(CREATE_TABLE)
            .map_err(|e| StoreUnavailable::new("create the table", e))?;
        Ok(Self { conn })
    }

    /// Replace the whole table with `dataset`.
    ///
    /// The table is dropped and recreated, so a table left by an older schema
    /// is replaced too. Runs in one transaction: readers see either the old
    /// table or the new one, never a mix.
    pub fn save(&mut self, dataset: &Dataset) -> Result<(), StoreUnavailable> {
        let write = |e| StoreUnavailable::new("write the table", e);

        let tx = self.conn.transaction().map_err(write)?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {TABLE}; {CREATE_TABLE}"))
            .map_err(write)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO empresas (empresas, valor, change, change2, faixa)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(write)?;
            for row in &dataset.rows {
                stmt.execute(params![
                    row.company,
                    row.value,
                    row.change_abs,
                    row.change_pct,
                    row.bin_label,
                ])
                .map_err(write)?;
            }
        }
        tx.commit().map_err(write)?;

        log::info!("Saved {} rows to table '{TABLE}'", dataset.len());
        Ok(())
    }

    /// Read every persisted row in storage order.
    pub fn load_all(&self) -> Result<Dataset, StoreUnavailable> {
        let read = |e| StoreUnavailable::new("read the table", e);

        let mut stmt = self
            .conn
            .prepare("SELECT empresas, valor, change, change2, faixa FROM empresas ORDER BY rowid")
            .map_err(read)?;
        let rows = stmt
            .query_map([], |r| {
                Ok(CompanyRow {
                    company: r.get(0)?,
                    value: r.get(1)?,
                    change_abs: r.get(2)?,
                    change_pct: r.get(3)?,
                    bin_label: r.get(4)?,
                })
            })
            .map_err(read)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read)?;

        log::info!("Loaded {} rows from table '{TABLE}'", rows.len());
        Ok(Dataset::new(rows))
    }
}
