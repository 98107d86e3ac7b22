use crate::error::LedgerResult;
use crate::types::AccountId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine configuration. Everything here has a sensible default, so a
/// plain `LedgerConfig::default()` gives the canonical rule set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// The account that accumulates every fee and tax the engine
    /// collects. One explicit well-known id — never hard-coded at the
    /// call sites.
    pub bank_fee_account: AccountId,

    /// When true, deposits of zero or negative amounts fail with
    /// `InvalidAmount`. When false, any amount is credited unchecked.
    pub reject_nonpositive_deposits: bool,

    /// Per-operation withdrawal cap for individual clients. Exactly
    /// the cap is still permitted.
    pub individual_withdrawal_cap: f64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            bank_fee_account: 1,
            reject_nonpositive_deposits: true,
            individual_withdrawal_cap: 1_000_000.0,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a JSON file. Missing fields fall back
    /// to the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let raw = fs::read_to_string(path).map_err(anyhow::Error::from)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
