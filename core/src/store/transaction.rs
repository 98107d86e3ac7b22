use super::{LedgerStore, LedgerTx};
use crate::error::LedgerResult;
use crate::types::{AccountId, TxnId};
use chrono::{DateTime, Utc};
use rusqlite::params;
use serde::Serialize;

/// One committed transfer. Immutable once written.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    pub id: TxnId,
    pub sender_id: AccountId,
    pub recipient_id: AccountId,
    pub amount: f64,
    pub fee: f64,
    pub created_at: DateTime<Utc>,
}

impl LedgerTx<'_> {
    /// Append-only insert. The timestamp is assigned here, at commit
    /// time, not when the request arrived.
    pub fn append_transaction(
        &self,
        sender_id: AccountId,
        recipient_id: AccountId,
        amount: f64,
        fee: f64,
    ) -> LedgerResult<TxnId> {
        self.tx.execute(
            "INSERT INTO transactions (sender_id, recipient_id, amount, fee, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![sender_id, recipient_id, amount, fee, Utc::now()],
        )?;
        Ok(self.tx.last_insert_rowid())
    }
}

impl LedgerStore {
    pub fn transaction_count(&self) -> LedgerResult<i64> {
        self.with_txn(|tx| {
            tx.tx
                .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
                .map_err(Into::into)
        })
    }

    pub fn transactions_for_account(
        &self,
        account: AccountId,
    ) -> LedgerResult<Vec<TransactionRecord>> {
        self.with_txn(|tx| {
            let mut stmt = tx.tx.prepare(
                "SELECT id, sender_id, recipient_id, amount, fee, created_at
                 FROM transactions
                 WHERE sender_id = ?1 OR recipient_id = ?1
                 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![account], |row| {
                Ok(TransactionRecord {
                    id: row.get(0)?,
                    sender_id: row.get(1)?,
                    recipient_id: row.get(2)?,
                    amount: row.get(3)?,
                    fee: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    /// Sum of every fee ever charged. By construction this equals the
    /// cumulative credit to the bank fee account.
    pub fn total_fees_charged(&self) -> LedgerResult<f64> {
        self.with_txn(|tx| {
            tx.tx
                .query_row(
                    "SELECT COALESCE(SUM(fee), 0.0) FROM transactions",
                    [],
                    |row| row.get(0),
                )
                .map_err(Into::into)
        })
    }
}
