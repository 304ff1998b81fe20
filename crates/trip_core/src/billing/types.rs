use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::round_to_cents;

/// Holder details supplied by the caller when settling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingProfile {
    pub legal_name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
}

/// A billing identity at the payment processor. Looked up by tax id;
/// created idempotently, at most one per tax id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingIdentity {
    pub id: String,
    pub legal_name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Card at point of sale; confirmed synchronously.
    PointOfSale,
    /// Instant bank transfer; pending until an external confirmation.
    InstantTransfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeStatus {
    Pending,
    Confirmed,
}

/// How a beneficiary's share is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SplitShare {
    Percentual(f64),
    Fixed(f64),
}

/// One beneficiary's share of a charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitLine {
    pub beneficiary_id: String,
    pub share: SplitShare,
    /// The share resolved against the charge amount, rounded to cents.
    pub resolved_amount: f64,
}

impl SplitLine {
    pub fn resolve(beneficiary_id: impl Into<String>, share: SplitShare, amount: f64) -> Self {
        let resolved_amount = match share {
            SplitShare::Fixed(fixed) => round_to_cents(fixed),
            SplitShare::Percentual(percent) => round_to_cents(amount * percent / 100.0),
        };
        Self {
            beneficiary_id: beneficiary_id.into(),
            share,
            resolved_amount,
        }
    }
}

/// Payment payload for an instant transfer: an opaque encoded string plus a
/// scannable-code reference, valid until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantTransferPayload {
    pub payload: String,
    pub code_ref: String,
    pub expires_at: DateTime<Utc>,
}

/// An immutable charge. Append-only at the provider; `status` is the only
/// field that ever changes, and only through `confirm_instant_transfer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub id: String,
    pub identity_id: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: ChargeStatus,
    pub split_lines: Vec<SplitLine>,
    pub transfer: Option<InstantTransferPayload>,
    pub created_at: DateTime<Utc>,
}

impl Charge {
    /// The split line for the given beneficiary, if any.
    pub fn split_for(&self, beneficiary_id: &str) -> Option<&SplitLine> {
        self.split_lines
            .iter()
            .find(|line| line.beneficiary_id == beneficiary_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentual_share_resolves_against_the_amount() {
        let line = SplitLine::resolve("wallet", SplitShare::Percentual(20.0), 100.0);
        assert!((line.resolved_amount - 20.0).abs() < 1e-9);
    }

    #[test]
    fn fixed_share_ignores_the_amount() {
        let line = SplitLine::resolve("wallet", SplitShare::Fixed(3.5), 100.0);
        assert!((line.resolved_amount - 3.5).abs() < 1e-9);
    }

    #[test]
    fn resolved_shares_are_rounded_to_cents() {
        let line = SplitLine::resolve("wallet", SplitShare::Percentual(20.0), 7.22);
        assert!((line.resolved_amount - 1.44).abs() < 1e-9);
    }
}
