use super::{LedgerStore, LedgerTx};
use crate::error::{LedgerError, LedgerResult};
use crate::types::{Classification, ClientId};
use rusqlite::{params, OptionalExtension};
use serde::Serialize;

/// One row of the client directory. Written by the registration
/// subsystem; the engine reads it and rewrites contact fields only
/// through the info-update operation.
#[derive(Debug, Clone, Serialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub classification: Classification,
    pub display_name: String,
    pub director_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Replacement identity fields for one client. The password hash is
/// produced by the (external) credential subsystem; the engine stores
/// it opaquely.
#[derive(Debug, Clone)]
pub struct ClientUpdate {
    pub display_name: String,
    pub director_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl LedgerTx<'_> {
    pub fn get_client(&self, id: ClientId) -> LedgerResult<Option<ClientRecord>> {
        self.tx
            .query_row(
                "SELECT id, classification, display_name, director_name, phone, email
                 FROM clients WHERE id = ?1",
                params![id],
                |row| {
                    Ok(ClientRecord {
                        id: row.get(0)?,
                        classification: row.get(1)?,
                        display_name: row.get(2)?,
                        director_name: row.get(3)?,
                        phone: row.get(4)?,
                        email: row.get(5)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn expect_client(&self, id: ClientId) -> LedgerResult<ClientRecord> {
        self.get_client(id)?.ok_or(LedgerError::ClientNotFound(id))
    }

    /// Classification lookup for fee policy. NotFound maps to the
    /// owning account's client being absent.
    pub fn client_classification(&self, id: ClientId) -> LedgerResult<Classification> {
        Ok(self.expect_client(id)?.classification)
    }

    pub fn insert_client(
        &self,
        classification: Classification,
        display_name: &str,
        director_name: Option<&str>,
    ) -> LedgerResult<ClientId> {
        self.tx.execute(
            "INSERT INTO clients (classification, display_name, director_name)
             VALUES (?1, ?2, ?3)",
            params![classification, display_name, director_name],
        )?;
        Ok(self.tx.last_insert_rowid())
    }

    pub fn update_client(&self, id: ClientId, update: &ClientUpdate) -> LedgerResult<()> {
        let changed = self.tx.execute(
            "UPDATE clients
             SET display_name = ?1, director_name = ?2, phone = ?3, email = ?4,
                 password_hash = COALESCE(?5, password_hash)
             WHERE id = ?6",
            params![
                update.display_name,
                update.director_name,
                update.phone,
                update.email,
                update.password_hash,
                id
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::ClientNotFound(id));
        }
        Ok(())
    }
}

impl LedgerStore {
    pub fn get_client(&self, id: ClientId) -> LedgerResult<Option<ClientRecord>> {
        self.with_txn(|tx| tx.get_client(id))
    }

    /// Seed helper for tests and tooling; real registration lives
    /// outside the engine.
    pub fn insert_client(
        &self,
        classification: Classification,
        display_name: &str,
        director_name: Option<&str>,
    ) -> LedgerResult<ClientId> {
        self.with_txn(|tx| tx.insert_client(classification, display_name, director_name))
    }
}
