use thiserror::Error;

/// Settlement failure taxonomy. Input errors are user-actionable; provider
/// errors are surfaced without automatic retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    #[error("charge amount must be a positive value")]
    InvalidAmount,
    #[error("billing profile is missing a {0}")]
    MissingField(&'static str),
    #[error("unknown charge id: {0}")]
    UnknownCharge(String),
    /// Raised by [`BillingProvider`](crate::billing::BillingProvider)
    /// implementations backed by an external processor; the in-memory
    /// reference implementation never fails.
    #[error("billing provider failure: {0}")]
    Provider(String),
}
