//! Append-only platform ledger and its read model.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::billing::types::Charge;
use crate::billing::PLATFORM_WALLET_ID;

/// One booked charge. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub charge_id: String,
    /// Full charge amount.
    pub gross_amount: f64,
    /// The platform split line's resolved amount.
    pub platform_amount: f64,
    pub booked_at: DateTime<Utc>,
}

/// Append-only ledger of settled platform shares. Each charge books at most
/// once, regardless of how many confirmations arrive for it.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    booked: HashSet<String>,
    platform_balance: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Books a confirmed charge: appends an entry and adds the platform
    /// split to the balance. Returns `false` (and changes nothing) when the
    /// charge was already booked or carries no platform split line.
    pub fn book(&mut self, charge: &Charge) -> bool {
        if self.booked.contains(&charge.id) {
            tracing::debug!(charge_id = %charge.id, "charge already booked; ignoring");
            return false;
        }
        let Some(platform_line) = charge.split_for(PLATFORM_WALLET_ID) else {
            tracing::debug!(charge_id = %charge.id, "charge has no platform split line");
            return false;
        };

        self.booked.insert(charge.id.clone());
        self.platform_balance += platform_line.resolved_amount;
        self.entries.push(LedgerEntry {
            charge_id: charge.id.clone(),
            gross_amount: charge.amount,
            platform_amount: platform_line.resolved_amount,
            booked_at: Utc::now(),
        });
        true
    }

    pub fn platform_balance(&self) -> f64 {
        self.platform_balance
    }

    /// Entries in booking order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Snapshot for a polling consumer: balance plus reverse-chronological
    /// entries. Always consistent with the ledger, never ahead of it.
    pub fn view(&self) -> LedgerView {
        LedgerView {
            platform_balance: self.platform_balance,
            entries: self.entries.iter().rev().cloned().collect(),
        }
    }
}

/// Read model over the ledger, newest entry first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerView {
    pub platform_balance: f64,
    pub entries: Vec<LedgerEntry>,
}
