use super::{LedgerStore, LedgerTx};
use crate::error::{LedgerError, LedgerResult};
use crate::types::{AccountId, AccountKind, ClientId};
use rusqlite::{params, OptionalExtension};
use serde::Serialize;

/// One row of the account store, by name rather than position.
#[derive(Debug, Clone, Serialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub client_id: ClientId,
    pub kind: AccountKind,
    pub holder_name: String,
    pub balance: f64,
}

fn account_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<AccountRecord> {
    Ok(AccountRecord {
        id: row.get(0)?,
        client_id: row.get(1)?,
        kind: row.get(2)?,
        holder_name: row.get(3)?,
        balance: row.get(4)?,
    })
}

impl LedgerTx<'_> {
    pub fn get_account(&self, id: AccountId) -> LedgerResult<Option<AccountRecord>> {
        self.tx
            .query_row(
                "SELECT id, client_id, kind, holder_name, balance
                 FROM accounts WHERE id = ?1",
                params![id],
                account_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Fetch an account or fail with the engine-level NotFound.
    pub fn expect_account(&self, id: AccountId) -> LedgerResult<AccountRecord> {
        self.get_account(id)?.ok_or(LedgerError::AccountNotFound(id))
    }

    pub fn update_balance(&self, id: AccountId, new_balance: f64) -> LedgerResult<()> {
        let changed = self.tx.execute(
            "UPDATE accounts SET balance = ?1 WHERE id = ?2",
            params![new_balance, id],
        )?;
        if changed == 0 {
            return Err(LedgerError::AccountNotFound(id));
        }
        Ok(())
    }

    pub fn insert_account(
        &self,
        client_id: ClientId,
        kind: AccountKind,
        holder_name: &str,
        balance: f64,
    ) -> LedgerResult<AccountId> {
        self.tx.execute(
            "INSERT INTO accounts (client_id, kind, holder_name, balance)
             VALUES (?1, ?2, ?3, ?4)",
            params![client_id, kind, holder_name, balance],
        )?;
        Ok(self.tx.last_insert_rowid())
    }

    /// Insert with a caller-chosen id. Used to pin the bank fee
    /// account at its well-known id.
    pub fn insert_account_with_id(
        &self,
        id: AccountId,
        client_id: ClientId,
        kind: AccountKind,
        holder_name: &str,
        balance: f64,
    ) -> LedgerResult<()> {
        self.tx.execute(
            "INSERT INTO accounts (id, client_id, kind, holder_name, balance)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, client_id, kind, holder_name, balance],
        )?;
        Ok(())
    }

    /// At most one settlement account per client is permitted.
    pub fn settlement_account_exists(&self, client_id: ClientId) -> LedgerResult<bool> {
        let count: i64 = self.tx.query_row(
            "SELECT COUNT(*) FROM accounts WHERE client_id = ?1 AND kind = ?2",
            params![client_id, AccountKind::Settlement],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Propagate a renamed owner onto every account they hold.
    pub fn sync_holder_name(&self, client_id: ClientId, name: &str) -> LedgerResult<()> {
        self.tx.execute(
            "UPDATE accounts SET holder_name = ?1 WHERE client_id = ?2",
            params![name, client_id],
        )?;
        Ok(())
    }
}

impl LedgerStore {
    pub fn get_account(&self, id: AccountId) -> LedgerResult<Option<AccountRecord>> {
        self.with_txn(|tx| tx.get_account(id))
    }

    pub fn insert_account(
        &self,
        client_id: ClientId,
        kind: AccountKind,
        holder_name: &str,
        balance: f64,
    ) -> LedgerResult<AccountId> {
        self.with_txn(|tx| tx.insert_account(client_id, kind, holder_name, balance))
    }
}
