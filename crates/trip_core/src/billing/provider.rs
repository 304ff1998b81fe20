//! Billing collaborator: the external payment processor behind a trait.

use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::billing::error::SettlementError;
use crate::billing::types::{
    BillingIdentity, BillingProfile, Charge, ChargeStatus, InstantTransferPayload, PaymentMethod,
    SplitLine, SplitShare,
};
use crate::billing::PLATFORM_WALLET_ID;

/// Instant-transfer payloads expire after one hour.
const TRANSFER_EXPIRY_SECS: i64 = 3600;

/// Request for a new charge.
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub identity_id: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub split: Vec<(String, SplitShare)>,
    pub description: Option<String>,
}

/// External payment processor. The engine never fabricates a confirmed
/// instant transfer itself; confirmation must arrive through
/// [`BillingProvider::confirm_instant_transfer`].
pub trait BillingProvider: Send + Sync {
    fn find_identity(&self, tax_id: &str) -> Result<Option<BillingIdentity>, SettlementError>;
    fn create_identity(&mut self, profile: &BillingProfile)
        -> Result<BillingIdentity, SettlementError>;
    fn create_charge(&mut self, request: ChargeRequest) -> Result<Charge, SettlementError>;
    /// Flips the charge to `Confirmed`. Confirming an already-confirmed
    /// charge returns it unchanged.
    fn confirm_instant_transfer(&mut self, charge_id: &str) -> Result<Charge, SettlementError>;
}

fn random_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    format!("{}_{}", prefix, suffix.to_lowercase())
}

/// Synthesizes the opaque encoded transfer string for an amount.
fn transfer_payload(amount: f64) -> String {
    let digits = format!("{:.2}", amount).replace('.', "");
    format!(
        "00020126580014br.gov.bcb.pix0136{PLATFORM_WALLET_ID}520400005303986540{digits}5802BR5913TripTransport6009SaoPaulo62070503***6304"
    )
}

fn scannable_code_ref(payload: &str) -> String {
    format!("https://api.qrserver.com/v1/create-qr-code/?size=250x250&data={payload}")
}

/// In-memory reference implementation. Identities are unique per tax id;
/// charges are append-only.
#[derive(Default)]
pub struct InMemoryBilling {
    identities: Vec<BillingIdentity>,
    charges: Vec<Charge>,
}

impl InMemoryBilling {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charge(&self, charge_id: &str) -> Option<&Charge> {
        self.charges.iter().find(|charge| charge.id == charge_id)
    }

    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }
}

impl BillingProvider for InMemoryBilling {
    fn find_identity(&self, tax_id: &str) -> Result<Option<BillingIdentity>, SettlementError> {
        Ok(self
            .identities
            .iter()
            .find(|identity| identity.tax_id == tax_id)
            .cloned())
    }

    fn create_identity(
        &mut self,
        profile: &BillingProfile,
    ) -> Result<BillingIdentity, SettlementError> {
        let identity = BillingIdentity {
            id: random_id("cus"),
            legal_name: profile.legal_name.clone(),
            tax_id: profile.tax_id.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            created_at: Utc::now(),
        };
        self.identities.push(identity.clone());
        tracing::debug!(identity_id = %identity.id, "billing identity created");
        Ok(identity)
    }

    fn create_charge(&mut self, request: ChargeRequest) -> Result<Charge, SettlementError> {
        let split_lines: Vec<SplitLine> = request
            .split
            .into_iter()
            .map(|(beneficiary_id, share)| {
                SplitLine::resolve(beneficiary_id, share, request.amount)
            })
            .collect();

        let (status, transfer) = match request.method {
            PaymentMethod::PointOfSale => (ChargeStatus::Confirmed, None),
            PaymentMethod::InstantTransfer => {
                let payload = transfer_payload(request.amount);
                let code_ref = scannable_code_ref(&payload);
                (
                    ChargeStatus::Pending,
                    Some(InstantTransferPayload {
                        payload,
                        code_ref,
                        expires_at: Utc::now() + Duration::seconds(TRANSFER_EXPIRY_SECS),
                    }),
                )
            }
        };

        let charge = Charge {
            id: random_id("pay"),
            identity_id: request.identity_id,
            amount: request.amount,
            method: request.method,
            status,
            split_lines,
            transfer,
            created_at: Utc::now(),
        };
        self.charges.push(charge.clone());
        tracing::debug!(charge_id = %charge.id, ?status, "charge created");
        Ok(charge)
    }

    fn confirm_instant_transfer(&mut self, charge_id: &str) -> Result<Charge, SettlementError> {
        let charge = self
            .charges
            .iter_mut()
            .find(|charge| charge.id == charge_id)
            .ok_or_else(|| SettlementError::UnknownCharge(charge_id.to_owned()))?;
        charge.status = ChargeStatus::Confirmed;
        Ok(charge.clone())
    }
}
