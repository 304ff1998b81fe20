//! Settlement engine: validate, resolve identity, create the split charge
//! and book the ledger.

use bevy_ecs::prelude::Resource;

use crate::billing::error::SettlementError;
use crate::billing::provider::{BillingProvider, ChargeRequest};
use crate::billing::types::{
    BillingIdentity, BillingProfile, Charge, ChargeStatus, PaymentMethod, SplitShare,
};
use crate::billing::{
    PLATFORM_SPLIT_PERCENT, PLATFORM_WALLET_ID, PROVIDER_SPLIT_PERCENT, PROVIDER_WALLET_ID,
};
use crate::ledger::{Ledger, LedgerView};
use crate::pricing::round_to_cents;

/// Drives settlement against a [`BillingProvider`] and owns the platform
/// ledger. Settlement is atomic per charge: validation happens before any
/// provider call, and booking cannot fail once a charge exists.
#[derive(Resource)]
pub struct SettlementEngine {
    provider: Box<dyn BillingProvider>,
    ledger: Ledger,
}

impl SettlementEngine {
    pub fn new(provider: Box<dyn BillingProvider>) -> Self {
        Self {
            provider,
            ledger: Ledger::new(),
        }
    }

    /// Looks up the billing identity by tax id, creating it if absent.
    /// Idempotent per tax id: two calls with the same tax id return the same
    /// identity and never create a duplicate.
    pub fn resolve_identity(
        &mut self,
        profile: &BillingProfile,
    ) -> Result<BillingIdentity, SettlementError> {
        if profile.tax_id.trim().is_empty() {
            return Err(SettlementError::MissingField("tax id"));
        }
        if let Some(existing) = self.provider.find_identity(&profile.tax_id)? {
            return Ok(existing);
        }
        self.provider.create_identity(profile)
    }

    /// Settles an amount: resolves the identity, creates a 20/80 split
    /// charge, and books the ledger for synchronously confirmed methods.
    ///
    /// The amount is normalized to cents before the charge is created, so
    /// the cent-rounded split lines can never sum past it.
    ///
    /// `InstantTransfer` charges come back `Pending` with a transfer payload;
    /// the ledger is only booked when [`Self::confirm_instant_transfer`]
    /// arrives.
    pub fn settle(
        &mut self,
        amount: f64,
        method: PaymentMethod,
        profile: &BillingProfile,
    ) -> Result<Charge, SettlementError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(SettlementError::InvalidAmount);
        }
        let amount = round_to_cents(amount);
        if amount <= 0.0 {
            return Err(SettlementError::InvalidAmount);
        }
        validate_profile(method, profile)?;

        let identity = self.resolve_identity(profile)?;
        let charge = self.provider.create_charge(ChargeRequest {
            identity_id: identity.id,
            amount,
            method,
            split: vec![
                (
                    PLATFORM_WALLET_ID.to_owned(),
                    SplitShare::Percentual(PLATFORM_SPLIT_PERCENT),
                ),
                (
                    PROVIDER_WALLET_ID.to_owned(),
                    SplitShare::Percentual(PROVIDER_SPLIT_PERCENT),
                ),
            ],
            description: Some("Trip settlement".to_owned()),
        })?;

        if charge.status == ChargeStatus::Confirmed {
            self.ledger.book(&charge);
        }
        Ok(charge)
    }

    /// Applies an external instant-transfer confirmation. Books the ledger
    /// entry exactly once; repeated confirmations return the charge without
    /// booking again.
    pub fn confirm_instant_transfer(
        &mut self,
        charge_id: &str,
    ) -> Result<Charge, SettlementError> {
        let charge = self.provider.confirm_instant_transfer(charge_id)?;
        self.ledger.book(&charge);
        Ok(charge)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Snapshot for the operational read model.
    pub fn ledger_view(&self) -> LedgerView {
        self.ledger.view()
    }
}

/// Field requirements per method: tax id always; full holder details for
/// point of sale.
fn validate_profile(
    method: PaymentMethod,
    profile: &BillingProfile,
) -> Result<(), SettlementError> {
    if profile.tax_id.trim().is_empty() {
        return Err(SettlementError::MissingField("tax id"));
    }
    if method == PaymentMethod::PointOfSale {
        if profile.legal_name.trim().is_empty() {
            return Err(SettlementError::MissingField("legal name"));
        }
        if profile.email.trim().is_empty() {
            return Err(SettlementError::MissingField("email"));
        }
        if profile.phone.trim().is_empty() {
            return Err(SettlementError::MissingField("phone"));
        }
    }
    Ok(())
}
