use crate::types::{AccountId, AccountKind, ClientId};
use thiserror::Error;

/// Why the fee policy refused a sender/recipient/operation combination.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    #[error("transfers to the sender's own account are not allowed")]
    SelfTransfer,

    #[error("settlement accounts may not transfer to individuals")]
    SettlementToIndividual,

    #[error("salary may only be paid from a legal entity to an individual")]
    SalaryNotAllowed,
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("client {0} not found")]
    ClientNotFound(ClientId),

    #[error("operation forbidden: {0}")]
    Forbidden(#[from] ForbiddenReason),

    #[error("insufficient funds in account {account}: balance {balance:.2}, required {required:.2}")]
    InsufficientFunds {
        account: AccountId,
        balance: f64,
        required: f64,
    },

    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("account {account} is a {} account and does not support withdrawals", .kind.as_str())]
    WrongAccountKind {
        account: AccountId,
        kind: AccountKind,
    },

    #[error("withdrawal of {amount:.2} exceeds the individual cap of {cap:.2}")]
    WithdrawalCapExceeded { amount: f64, cap: f64 },

    #[error("client {0} already has a settlement account")]
    AlreadyExists(ClientId),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
