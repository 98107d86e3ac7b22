//! ledger-core — a small banking ledger's transfer engine.
//!
//! Clients (individuals or legal entities) own accounts; money moves
//! between accounts through deposits, withdrawals, peer transfers and
//! salary disbursements, each governed by classification-dependent
//! fee and tax rules. The engine enforces the invariants: balances
//! are never committed negative by a withdrawal, every collected fee
//! lands on the bank fee account, and each operation commits all of
//! its row mutations and its log append atomically or not at all.
//!
//! Registration, credential handling and any user interface live
//! outside this crate; they reach the engine through
//! [`engine::LedgerEngine`] and seed data through [`store::LedgerStore`].

pub mod config;
pub mod engine;
pub mod error;
pub mod policy;
pub mod store;
pub mod types;
