//! Peer-transfer tests.
//!
//! Covers the fee table for all classification pairs, the
//! affordability rules (including the principal-only check on the
//! individual→individual path), full rollback on rejection, and fee
//! conservation into the bank fee account.

use ledger_core::{
    engine::LedgerEngine,
    error::{ForbiddenReason, LedgerError},
    store::LedgerStore,
    types::{AccountId, Classification},
};

fn build() -> LedgerEngine {
    let store = LedgerStore::in_memory().expect("open in-memory store");
    store.migrate().expect("migrate");
    LedgerEngine::with_defaults(store).expect("build engine")
}

fn individual(engine: &LedgerEngine, name: &str, balance: f64) -> AccountId {
    let client = engine
        .store()
        .insert_client(Classification::Individual, name, None)
        .unwrap();
    let acct = engine
        .create_account(client, Classification::Individual)
        .unwrap();
    if balance > 0.0 {
        engine.deposit(acct.id, balance).unwrap();
    }
    acct.id
}

fn legal_entity(engine: &LedgerEngine, name: &str, balance: f64) -> AccountId {
    let client = engine
        .store()
        .insert_client(Classification::LegalEntity, name, Some("Director"))
        .unwrap();
    let acct = engine
        .create_account(client, Classification::LegalEntity)
        .unwrap();
    if balance > 0.0 {
        engine.deposit(acct.id, balance).unwrap();
    }
    acct.id
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn individual_transfer_at_threshold_is_free() {
    let engine = build();
    let sender = individual(&engine, "Alice", 150_000.0);
    let recipient = individual(&engine, "Bob", 0.0);

    let receipt = engine.transfer(sender, recipient, 100_000.0).unwrap();
    assert_eq!(receipt.fee, 0.0);
    assert!(close(engine.balance(sender).unwrap(), 50_000.0));
    assert!(close(engine.balance(recipient).unwrap(), 100_000.0));
    assert_eq!(engine.store().transaction_count().unwrap(), 1);
}

#[test]
fn individual_transfer_above_threshold_charges_one_percent() {
    let engine = build();
    let sender = individual(&engine, "Alice", 200_000.0);
    let recipient = individual(&engine, "Bob", 0.0);
    let bank = engine.config().bank_fee_account;

    let receipt = engine.transfer(sender, recipient, 100_001.0).unwrap();
    assert!(close(receipt.fee, 1_000.01));
    assert!(close(engine.balance(sender).unwrap(), 200_000.0 - 100_001.0 - 1_000.01));
    assert!(close(engine.balance(recipient).unwrap(), 100_001.0));
    assert!(close(engine.balance(bank).unwrap(), 1_000.01));
}

/// The individual→individual path checks the sender balance against
/// the principal only. The commission is still charged, so the
/// committed balance may drop below zero. Deliberate policy.
#[test]
fn individual_affordability_is_checked_against_principal_only() {
    let engine = build();
    let sender = individual(&engine, "Alice", 100_001.0);
    let recipient = individual(&engine, "Bob", 0.0);

    let receipt = engine.transfer(sender, recipient, 100_001.0).unwrap();
    assert!(close(receipt.fee, 1_000.01));
    assert!(close(engine.balance(sender).unwrap(), -1_000.01));
    assert!(close(engine.balance(recipient).unwrap(), 100_001.0));
}

#[test]
fn business_transfer_requires_principal_plus_tax() {
    let engine = build();
    let sender = legal_entity(&engine, "Acme", 1_199.0);
    let recipient = legal_entity(&engine, "Globex", 0.0);

    let err = engine.transfer(sender, recipient, 1_000.0).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds { required, .. } if close(required, 1_200.0)));

    // Topping up by one unit makes the same transfer affordable.
    engine.deposit(sender, 1.0).unwrap();
    let receipt = engine.transfer(sender, recipient, 1_000.0).unwrap();
    assert!(close(receipt.fee, 200.0));
    assert!(close(engine.balance(sender).unwrap(), 0.0));
    assert!(close(engine.balance(recipient).unwrap(), 1_000.0));
    assert!(close(
        engine.balance(engine.config().bank_fee_account).unwrap(),
        200.0
    ));
}

#[test]
fn individual_to_business_pays_the_same_tax() {
    let engine = build();
    let sender = individual(&engine, "Alice", 2_000.0);
    let recipient = legal_entity(&engine, "Acme", 0.0);

    let receipt = engine.transfer(sender, recipient, 1_000.0).unwrap();
    assert!(close(receipt.fee, 200.0));
    assert!(close(engine.balance(sender).unwrap(), 800.0));
}

#[test]
fn settlement_to_individual_is_forbidden() {
    let engine = build();
    let sender = legal_entity(&engine, "Acme", 10_000.0);
    let recipient = individual(&engine, "Alice", 0.0);

    let err = engine.transfer(sender, recipient, 100.0).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Forbidden(ForbiddenReason::SettlementToIndividual)
    ));
    assert!(close(engine.balance(sender).unwrap(), 10_000.0));
    assert_eq!(engine.store().transaction_count().unwrap(), 0);
}

#[test]
fn self_transfer_is_forbidden_regardless_of_amount() {
    let engine = build();
    let account = individual(&engine, "Alice", 500.0);

    for amount in [1.0, 500.0, 1_000_000.0] {
        let err = engine.transfer(account, account, amount).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Forbidden(ForbiddenReason::SelfTransfer)
        ));
    }
    assert!(close(engine.balance(account).unwrap(), 500.0));
}

#[test]
fn nonpositive_transfer_amounts_are_invalid() {
    let engine = build();
    let sender = individual(&engine, "Alice", 500.0);
    let recipient = individual(&engine, "Bob", 0.0);

    for amount in [0.0, -25.0] {
        let err = engine.transfer(sender, recipient, amount).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }
}

#[test]
fn missing_accounts_are_reported() {
    let engine = build();
    let sender = individual(&engine, "Alice", 500.0);

    let err = engine.transfer(sender, 9_999, 10.0).unwrap_err();
    assert!(matches!(err, LedgerError::AccountNotFound(9_999)));

    let err = engine.transfer(9_999, sender, 10.0).unwrap_err();
    assert!(matches!(err, LedgerError::AccountNotFound(9_999)));
}

/// A rejected transfer leaves every balance and the transaction log
/// exactly as they were.
#[test]
fn rejection_rolls_back_completely() {
    let engine = build();
    let sender = legal_entity(&engine, "Acme", 1_000.0);
    let recipient = legal_entity(&engine, "Globex", 50.0);
    let bank = engine.config().bank_fee_account;

    // Needs 1_200, has 1_000.
    let err = engine.transfer(sender, recipient, 1_000.0).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds { .. }));

    assert!(close(engine.balance(sender).unwrap(), 1_000.0));
    assert!(close(engine.balance(recipient).unwrap(), 50.0));
    assert!(close(engine.balance(bank).unwrap(), 0.0));
    assert_eq!(engine.store().transaction_count().unwrap(), 0);
}

/// Every fee ever logged equals the bank fee account's balance.
#[test]
fn fees_are_conserved_into_the_bank_account() {
    let engine = build();
    let alice = individual(&engine, "Alice", 500_000.0);
    let bob = individual(&engine, "Bob", 50_000.0);
    let acme = legal_entity(&engine, "Acme", 100_000.0);
    let globex = legal_entity(&engine, "Globex", 0.0);

    engine.transfer(alice, bob, 150_000.0).unwrap(); // 1% commission
    engine.transfer(alice, acme, 10_000.0).unwrap(); // 20% tax
    engine.transfer(acme, globex, 5_000.0).unwrap(); // 20% tax
    engine.transfer(bob, alice, 1_000.0).unwrap(); // free
    engine.pay_salary(acme, bob, 2_000.0).unwrap(); // 42% tax

    let bank = engine.config().bank_fee_account;
    let collected = engine.balance(bank).unwrap();
    let logged = engine.store().total_fees_charged().unwrap();
    assert!(close(collected, logged));
    assert!(close(collected, 1_500.0 + 2_000.0 + 1_000.0 + 840.0));
    assert_eq!(engine.store().transaction_count().unwrap(), 5);
}

#[test]
fn transaction_records_carry_amount_and_fee() {
    let engine = build();
    let sender = individual(&engine, "Alice", 10_000.0);
    let recipient = legal_entity(&engine, "Acme", 0.0);

    let receipt = engine.transfer(sender, recipient, 1_000.0).unwrap();
    let records = engine.store().transactions_for_account(sender).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, receipt.txn_id);
    assert_eq!(records[0].sender_id, sender);
    assert_eq!(records[0].recipient_id, recipient);
    assert!(close(records[0].amount, 1_000.0));
    assert!(close(records[0].fee, 200.0));
}
