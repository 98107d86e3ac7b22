//! Shared primitive types used across the entire ledger.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Row id of a client directory entry.
pub type ClientId = i64;

/// Row id of an account.
pub type AccountId = i64;

/// Row id of a transaction log entry.
pub type TxnId = i64;

/// Client classification. Drives every fee and eligibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Individual,
    LegalEntity,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Individual => "individual",
            Classification::LegalEntity => "legal_entity",
        }
    }

    /// The account kind a client of this classification opens.
    pub fn account_kind(self) -> AccountKind {
        match self {
            Classification::Individual => AccountKind::Personal,
            Classification::LegalEntity => AccountKind::Settlement,
        }
    }
}

/// Account kind. Personal accounts belong to individuals and are
/// withdrawal-eligible; settlement accounts belong to legal entities,
/// at most one per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Personal,
    Settlement,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountKind::Personal => "personal",
            AccountKind::Settlement => "settlement",
        }
    }
}

impl ToSql for Classification {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Classification {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "individual" => Ok(Classification::Individual),
            "legal_entity" => Ok(Classification::LegalEntity),
            other => Err(FromSqlError::Other(
                format!("unknown classification '{other}'").into(),
            )),
        }
    }
}

impl ToSql for AccountKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AccountKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "personal" => Ok(AccountKind::Personal),
            "settlement" => Ok(AccountKind::Settlement),
            other => Err(FromSqlError::Other(
                format!("unknown account kind '{other}'").into(),
            )),
        }
    }
}
