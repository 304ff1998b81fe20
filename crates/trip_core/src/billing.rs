//! Settlement: billing identities, split charges and ledger booking.

pub mod engine;
pub mod error;
pub mod provider;
pub mod types;

pub use engine::SettlementEngine;
pub use error::SettlementError;
pub use provider::{BillingProvider, ChargeRequest, InMemoryBilling};
pub use types::{
    BillingIdentity, BillingProfile, Charge, ChargeStatus, InstantTransferPayload, PaymentMethod,
    SplitLine, SplitShare,
};

/// Beneficiary id of the platform wallet.
pub const PLATFORM_WALLET_ID: &str = "5ca8bff7-873a-4de5-867f-ba92a26547a5";

/// Beneficiary id of the service provider (single-provider scope).
pub const PROVIDER_WALLET_ID: &str = "provider_wallet_001";

/// Platform share of every charge, in percent.
pub const PLATFORM_SPLIT_PERCENT: f64 = 20.0;

/// Provider share of every charge, in percent.
pub const PROVIDER_SPLIT_PERCENT: f64 = 80.0;
