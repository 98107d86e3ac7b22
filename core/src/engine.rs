//! The ledger transfer engine — the heart of the system.
//!
//! For any requested money movement it decides whether the movement
//! is permitted, what fee or tax applies, and applies the balance
//! mutations and the transaction-log append as one atomic unit.
//!
//! RULES:
//!   - Every mutating operation is a single store transaction. It
//!     fully commits or fully rolls back; no partial state survives
//!     a rejection.
//!   - Policy comes from `policy::assess_fee`. The engine adds only
//!     the affordability check, once the fee is known.
//!   - Every fee and tax is credited to the configured bank fee
//!     account, so the fee column of the transaction log always sums
//!     to that account's cumulative credit.

use crate::{
    config::LedgerConfig,
    error::{LedgerError, LedgerResult},
    policy::{self, OperationKind},
    store::{AccountRecord, ClientUpdate, LedgerStore},
    types::{AccountId, AccountKind, Classification, ClientId, TxnId},
};
use serde::Serialize;

pub struct LedgerEngine {
    store: LedgerStore,
    config: LedgerConfig,
}

/// Outcome of a deposit or withdrawal.
#[derive(Debug, Clone, Serialize)]
pub struct CashReceipt {
    pub account: AccountId,
    pub holder_name: String,
    pub new_balance: f64,
}

/// Outcome of a committed transfer or salary payment.
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    pub txn_id: TxnId,
    pub sender: AccountId,
    pub recipient: AccountId,
    pub amount: f64,
    pub fee: f64,
    pub sender_balance: f64,
}

impl LedgerEngine {
    /// Wire an engine to a migrated store. Creates the bank fee
    /// account at its well-known id on first use.
    pub fn new(store: LedgerStore, config: LedgerConfig) -> LedgerResult<Self> {
        store.with_txn(|tx| {
            if tx.get_account(config.bank_fee_account)?.is_none() {
                let bank =
                    tx.insert_client(Classification::LegalEntity, "Bank fee account", None)?;
                tx.insert_account_with_id(
                    config.bank_fee_account,
                    bank,
                    AccountKind::Settlement,
                    "Bank fee account",
                    0.0,
                )?;
                log::info!("created bank fee account {}", config.bank_fee_account);
            }
            Ok(())
        })?;
        Ok(Self { store, config })
    }

    pub fn with_defaults(store: LedgerStore) -> LedgerResult<Self> {
        Self::new(store, LedgerConfig::default())
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Credit an account. Whether non-positive amounts are refused is
    /// an explicit configuration choice, not an accident.
    pub fn deposit(&self, account: AccountId, amount: f64) -> LedgerResult<CashReceipt> {
        if self.config.reject_nonpositive_deposits && amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.store.with_txn(|tx| {
            let acct = tx.expect_account(account)?;
            let new_balance = acct.balance + amount;
            tx.update_balance(account, new_balance)?;
            log::debug!("deposit {amount:.2} -> account {account}, balance {new_balance:.2}");
            Ok(CashReceipt {
                account,
                holder_name: acct.holder_name,
                new_balance,
            })
        })
    }

    /// Withdraw cash from a personal account.
    ///
    /// Check order: account exists, account kind, amount validity,
    /// the individual cap, then funds.
    pub fn withdraw(&self, account: AccountId, amount: f64) -> LedgerResult<CashReceipt> {
        self.store.with_txn(|tx| {
            let acct = tx.expect_account(account)?;
            if acct.kind == AccountKind::Settlement {
                return Err(LedgerError::WrongAccountKind {
                    account,
                    kind: acct.kind,
                });
            }
            if amount <= 0.0 {
                return Err(LedgerError::InvalidAmount(amount));
            }
            let owner = tx.client_classification(acct.client_id)?;
            if owner == Classification::Individual && amount > self.config.individual_withdrawal_cap
            {
                return Err(LedgerError::WithdrawalCapExceeded {
                    amount,
                    cap: self.config.individual_withdrawal_cap,
                });
            }
            if acct.balance < amount {
                return Err(LedgerError::InsufficientFunds {
                    account,
                    balance: acct.balance,
                    required: amount,
                });
            }
            let new_balance = acct.balance - amount;
            tx.update_balance(account, new_balance)?;
            log::debug!("withdraw {amount:.2} <- account {account}, balance {new_balance:.2}");
            Ok(CashReceipt {
                account,
                holder_name: acct.holder_name,
                new_balance,
            })
        })
    }

    /// Peer transfer between two accounts under the transfer fee table.
    pub fn transfer(
        &self,
        sender: AccountId,
        recipient: AccountId,
        amount: f64,
    ) -> LedgerResult<TransferReceipt> {
        self.move_funds(OperationKind::Transfer, sender, recipient, amount)
    }

    /// Salary disbursement. Same shape as a transfer, but the salary
    /// fee table permits only legal-entity→individual.
    pub fn pay_salary(
        &self,
        sender: AccountId,
        recipient: AccountId,
        amount: f64,
    ) -> LedgerResult<TransferReceipt> {
        self.move_funds(OperationKind::Salary, sender, recipient, amount)
    }

    fn move_funds(
        &self,
        op: OperationKind,
        sender: AccountId,
        recipient: AccountId,
        amount: f64,
    ) -> LedgerResult<TransferReceipt> {
        if amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.store.with_txn(|tx| {
            let from = tx.expect_account(sender)?;
            let to = tx.expect_account(recipient)?;
            let sender_class = tx.client_classification(from.client_id)?;
            let recipient_class = tx.client_classification(to.client_id)?;

            let quote = policy::assess_fee(
                op,
                sender_class,
                recipient_class,
                sender == recipient,
                amount,
            )
            .map_err(|reason| {
                log::warn!("{op:?} {sender} -> {recipient} refused: {reason}");
                LedgerError::from(reason)
            })?;

            let required = quote.required(amount);
            if from.balance < required {
                return Err(LedgerError::InsufficientFunds {
                    account: sender,
                    balance: from.balance,
                    required,
                });
            }

            let sender_balance = from.balance - quote.total(amount);
            tx.update_balance(sender, sender_balance)?;
            tx.update_balance(recipient, to.balance + amount)?;
            if quote.fee > 0.0 {
                // Re-read inside the transaction: the recipient credit
                // above must be visible when the recipient IS the sink.
                let sink = tx.expect_account(self.config.bank_fee_account)?;
                tx.update_balance(sink.id, sink.balance + quote.fee)?;
            }
            let txn_id = tx.append_transaction(sender, recipient, amount, quote.fee)?;

            log::debug!(
                "{op:?} {sender} -> {recipient}: amount {amount:.2}, fee {:.2}, txn {txn_id}",
                quote.fee
            );
            Ok(TransferReceipt {
                txn_id,
                sender,
                recipient,
                amount,
                fee: quote.fee,
                sender_balance,
            })
        })
    }

    /// Open a zero-balance account for a registered client.
    /// Individuals get personal accounts, legal entities settlement
    /// accounts — and only one of the latter per client.
    pub fn create_account(
        &self,
        client: ClientId,
        classification: Classification,
    ) -> LedgerResult<AccountRecord> {
        self.store.with_txn(|tx| {
            let record = tx.expect_client(client)?;
            let kind = classification.account_kind();
            if kind == AccountKind::Settlement && tx.settlement_account_exists(client)? {
                return Err(LedgerError::AlreadyExists(client));
            }
            let id = tx.insert_account(client, kind, &record.display_name, 0.0)?;
            log::debug!("opened {} account {id} for client {client}", kind.as_str());
            Ok(AccountRecord {
                id,
                client_id: client,
                kind,
                holder_name: record.display_name,
                balance: 0.0,
            })
        })
    }

    /// Rewrite a client's identity fields and keep the denormalized
    /// holder name on their accounts in sync, atomically.
    pub fn update_client_info(&self, client: ClientId, update: &ClientUpdate) -> LedgerResult<()> {
        self.store.with_txn(|tx| {
            tx.update_client(client, update)?;
            tx.sync_holder_name(client, &update.display_name)?;
            Ok(())
        })
    }

    /// Read-only balance view.
    pub fn balance(&self, account: AccountId) -> LedgerResult<f64> {
        self.store.with_txn(|tx| Ok(tx.expect_account(account)?.balance))
    }
}
