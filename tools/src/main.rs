//! ledger-demo: headless end-to-end exercise of the ledger engine.
//!
//! Usage:
//!   ledger-demo                     # in-memory database
//!   ledger-demo --db bank.db       # persistent file
//!   ledger-demo --config cfg.json  # override engine configuration

use anyhow::Result;
use ledger_core::{
    config::LedgerConfig,
    engine::LedgerEngine,
    store::LedgerStore,
    types::Classification,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let config = match flag_value(&args, "--config") {
        Some(path) => LedgerConfig::from_file(path)?,
        None => LedgerConfig::default(),
    };

    println!("ledger-demo");
    println!("  db:               {db}");
    println!("  bank fee account: {}", config.bank_fee_account);
    println!();

    let store = if db == ":memory:" {
        LedgerStore::in_memory()?
    } else {
        LedgerStore::open(db)?
    };
    store.migrate()?;
    let engine = LedgerEngine::new(store, config)?;

    // Seed a tiny bank: two individuals and two legal entities.
    let alice = engine
        .store()
        .insert_client(Classification::Individual, "Alice Ivanova", None)?;
    let bob = engine
        .store()
        .insert_client(Classification::Individual, "Bob Petrov", None)?;
    let acme = engine
        .store()
        .insert_client(Classification::LegalEntity, "Acme LLC", Some("D. Director"))?;
    let globex = engine
        .store()
        .insert_client(Classification::LegalEntity, "Globex LLC", Some("E. Director"))?;

    let alice_acct = engine.create_account(alice, Classification::Individual)?.id;
    let bob_acct = engine.create_account(bob, Classification::Individual)?.id;
    let acme_acct = engine.create_account(acme, Classification::LegalEntity)?.id;
    let globex_acct = engine.create_account(globex, Classification::LegalEntity)?.id;

    engine.deposit(alice_acct, 250_000.0)?;
    engine.deposit(acme_acct, 50_000.0)?;

    // A free peer transfer, a commissioned one, a taxed business
    // transfer and a salary run.
    print_receipt("free transfer", &engine.transfer(alice_acct, bob_acct, 50_000.0)?)?;
    print_receipt(
        "commissioned transfer",
        &engine.transfer(alice_acct, bob_acct, 150_000.0)?,
    )?;
    print_receipt(
        "taxed transfer",
        &engine.transfer(acme_acct, globex_acct, 10_000.0)?,
    )?;
    print_receipt("salary", &engine.pay_salary(acme_acct, bob_acct, 5_000.0)?)?;

    // And a couple of rejections, shown rather than hidden.
    for (label, result) in [
        ("self transfer", engine.transfer(bob_acct, bob_acct, 10.0)),
        (
            "settlement to individual",
            engine.transfer(globex_acct, alice_acct, 100.0),
        ),
    ] {
        match result {
            Ok(_) => println!("{label}: unexpectedly committed"),
            Err(e) => println!("{label}: rejected ({e})"),
        }
    }
    match engine.withdraw(acme_acct, 100.0) {
        Ok(_) => println!("settlement withdrawal: unexpectedly committed"),
        Err(e) => println!("settlement withdrawal: rejected ({e})"),
    }
    println!();

    println!("final balances:");
    for (name, acct) in [
        ("Alice", alice_acct),
        ("Bob", bob_acct),
        ("Acme", acme_acct),
        ("Globex", globex_acct),
        ("bank fees", engine.config().bank_fee_account),
    ] {
        println!("  {name:10} {:>12.2}", engine.balance(acct)?);
    }
    println!(
        "transactions logged: {}, fees collected: {:.2}",
        engine.store().transaction_count()?,
        engine.store().total_fees_charged()?
    );

    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn print_receipt(label: &str, receipt: &ledger_core::engine::TransferReceipt) -> Result<()> {
    println!("{label}: {}", serde_json::to_string(receipt)?);
    Ok(())
}
