//! Fee policy resolver.
//!
//! RULE: this module is pure. It never touches the store and never
//! consults balances — affordability is the engine's job, and which
//! balance figure the engine must compare against is part of the
//! quote (`AffordabilityBasis`).

use crate::error::ForbiddenReason;
use crate::types::Classification;
use serde::Serialize;

/// Individual→individual transfers are free up to this amount.
pub const INDIVIDUAL_FEE_THRESHOLD: f64 = 100_000.0;

/// Commission above the threshold on individual→individual transfers.
pub const INDIVIDUAL_FEE_RATE: f64 = 0.01;

/// Tax on any transfer into a settlement account.
pub const BUSINESS_TAX_RATE: f64 = 0.20;

/// Payroll tax on legal-entity→individual salary payments.
pub const SALARY_TAX_RATE: f64 = 0.42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Transfer,
    Salary,
}

/// Which figure the sender's balance is checked against.
///
/// The individual→individual path historically checks the principal
/// only, so the commission can push the committed balance below the
/// principal remainder. The tax paths check principal plus fee. This
/// asymmetry is deliberate policy and covered by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffordabilityBasis {
    Principal,
    PrincipalPlusFee,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeQuote {
    pub fee: f64,
    pub basis: AffordabilityBasis,
}

impl FeeQuote {
    /// The figure the sender must hold for the engine to proceed.
    pub fn required(&self, amount: f64) -> f64 {
        match self.basis {
            AffordabilityBasis::Principal => amount,
            AffordabilityBasis::PrincipalPlusFee => amount + self.fee,
        }
    }

    /// The figure actually debited from the sender on commit.
    pub fn total(&self, amount: f64) -> f64 {
        amount + self.fee
    }
}

/// Decide the fee for a requested movement, or refuse it.
///
/// `self_transfer` is true when sender and recipient are the same
/// account id. Rules are evaluated in priority order; the first match
/// wins. Non-positive amounts are rejected by the engine before this
/// runs.
pub fn assess_fee(
    op: OperationKind,
    sender: Classification,
    recipient: Classification,
    self_transfer: bool,
    amount: f64,
) -> Result<FeeQuote, ForbiddenReason> {
    use Classification::{Individual, LegalEntity};

    match op {
        OperationKind::Transfer => {
            if self_transfer {
                return Err(ForbiddenReason::SelfTransfer);
            }
            match (sender, recipient) {
                (LegalEntity, Individual) => Err(ForbiddenReason::SettlementToIndividual),
                (Individual, Individual) => {
                    let fee = if amount > INDIVIDUAL_FEE_THRESHOLD {
                        amount * INDIVIDUAL_FEE_RATE
                    } else {
                        0.0
                    };
                    Ok(FeeQuote {
                        fee,
                        basis: AffordabilityBasis::Principal,
                    })
                }
                // Legal→legal and individual→legal both pay the business tax.
                (_, LegalEntity) => Ok(FeeQuote {
                    fee: amount * BUSINESS_TAX_RATE,
                    basis: AffordabilityBasis::PrincipalPlusFee,
                }),
            }
        }
        OperationKind::Salary => match (sender, recipient) {
            (LegalEntity, Individual) => Ok(FeeQuote {
                fee: amount * SALARY_TAX_RATE,
                basis: AffordabilityBasis::PrincipalPlusFee,
            }),
            _ => Err(ForbiddenReason::SalaryNotAllowed),
        },
    }
}
