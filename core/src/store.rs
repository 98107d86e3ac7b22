//! SQLite persistence layer.
//!
//! RULE: Only the store modules talk to the database.
//! The engine calls store methods — it never executes SQL directly.
//!
//! Every mutating engine operation runs inside one `with_txn` call:
//! an IMMEDIATE transaction over the single shared connection. The
//! closure either returns Ok and the transaction commits, or returns
//! Err and the transaction rolls back with nothing written.

use crate::error::LedgerResult;
use parking_lot::Mutex;
use rusqlite::{Connection, TransactionBehavior};
use std::sync::Arc;

mod account;
mod client;
mod transaction;

pub use account::AccountRecord;
pub use client::{ClientRecord, ClientUpdate};
pub use transaction::TransactionRecord;

#[derive(Clone)]
pub struct LedgerStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl LedgerStore {
    pub fn open(path: &str) -> LedgerResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LedgerResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database
    /// (isolated). For file-based databases, this opens the same file.
    pub fn reopen(&self) -> LedgerResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> LedgerResult<()> {
        self.conn
            .lock()
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    /// Run `f` inside one serialized transaction.
    ///
    /// The mutex plus the IMMEDIATE transaction make the whole
    /// read-compute-write-append sequence indivisible with respect to
    /// every concurrent operation, whichever rows it touches.
    pub fn with_txn<T>(&self, f: impl FnOnce(&LedgerTx<'_>) -> LedgerResult<T>) -> LedgerResult<T> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = f(&LedgerTx { tx: &tx })?;
        tx.commit()?;
        Ok(out)
    }
}

/// Handle to one open transaction. The row-level operations live in
/// the per-table submodules. Dropping the underlying transaction
/// without commit rolls everything back.
pub struct LedgerTx<'a> {
    tx: &'a rusqlite::Transaction<'a>,
}
