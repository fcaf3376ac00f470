//! Views of the records Stripe owns, plus the caller-side parameter types
//! shared across operations. Only the fields this crate reads are typed;
//! everything else stays with the provider.

use serde::{Deserialize, Serialize};

/// Envelope used by Stripe list endpoints.
#[derive(Debug, Deserialize)]
pub struct List<T> {
    pub object: String,
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
    pub email: Option<String>,
    /// Card used when a charge names no explicit source.
    pub default_source: Option<String>,
    #[serde(default)]
    pub livemode: bool,
    pub created: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub id: String,
    pub customer: Option<String>,
    pub brand: Option<String>,
    pub country: Option<String>,
    pub exp_month: Option<u8>,
    pub exp_year: Option<u16>,
    pub last4: Option<String>,
    pub funding: Option<String>,
    /// Set locally by `list_cards`; Stripe does not return this field.
    #[serde(default)]
    pub is_default: bool,
}

/// A connected (vendor) account on the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    #[serde(default)]
    pub charges_enabled: bool,
    #[serde(default)]
    pub payouts_enabled: bool,
    #[serde(default)]
    pub details_submitted: bool,
    pub default_currency: Option<String>,
}

/// Single-use token, e.g. for account or bank-account data.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub id: String,
    pub object: String,
    #[serde(rename = "type")]
    pub token_type: Option<String>,
    pub client_ip: Option<String>,
    pub created: Option<i64>,
    #[serde(default)]
    pub used: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Charge {
    pub id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    pub customer: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub captured: bool,
    pub receipt_email: Option<String>,
    pub statement_descriptor: Option<String>,
    pub transfer_group: Option<String>,
    pub created: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transfer {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub destination: Option<String>,
    pub transfer_group: Option<String>,
    pub created: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferReversal {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub transfer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payout {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: Option<String>,
    pub arrival_date: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Refund {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub charge: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub livemode: bool,
    pub available: Vec<BalanceFunds>,
    #[serde(default)]
    pub pending: Vec<BalanceFunds>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceFunds {
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub id: String,
    pub account: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeFile {
    pub id: String,
    pub purpose: Option<String>,
    pub size: Option<u64>,
    #[serde(rename = "type")]
    pub format: Option<String>,
    pub url: Option<String>,
    pub created: Option<i64>,
}

/// Confirmation returned by Stripe delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Deleted {
    pub id: String,
    #[serde(default)]
    pub deleted: bool,
}

/// Residential address submitted with identity data.
#[derive(Debug, Clone)]
pub struct AccountAddress {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 code, e.g. "US".
    pub country: String,
}

#[derive(Debug, Clone, Copy)]
pub struct DateOfBirth {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

#[derive(Debug, Clone)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

/// Identifiers of previously uploaded verification documents.
#[derive(Debug, Clone, Default)]
pub struct VerificationDocuments {
    pub front: Option<String>,
    pub back: Option<String>,
}

/// Role a person holds on a connected account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonRelationship {
    #[serde(
        rename = "relationship[representative]",
        skip_serializing_if = "Option::is_none"
    )]
    pub representative: Option<bool>,
    #[serde(
        rename = "relationship[director]",
        skip_serializing_if = "Option::is_none"
    )]
    pub director: Option<bool>,
    #[serde(
        rename = "relationship[executive]",
        skip_serializing_if = "Option::is_none"
    )]
    pub executive: Option<bool>,
    #[serde(rename = "relationship[owner]", skip_serializing_if = "Option::is_none")]
    pub owner: Option<bool>,
    #[serde(
        rename = "relationship[percent_ownership]",
        skip_serializing_if = "Option::is_none"
    )]
    pub percent_ownership: Option<f64>,
    #[serde(rename = "relationship[title]", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Caller-supplied destination for a grouped multi-transfer payment.
#[derive(Debug, Clone)]
pub struct TransferSpec {
    /// Connected account receiving this share.
    pub account: String,
    /// Share of the payment in decimal currency units.
    pub amount: f64,
}

/// A [`TransferSpec`] annotated with the identifier of the transfer it
/// produced.
#[derive(Debug, Clone)]
pub struct AllocatedTransfer {
    pub account: String,
    pub amount: f64,
    pub transfer_id: String,
}

/// Result of a grouped multi-transfer payment: the collecting charge plus
/// the per-vendor transfers in input order.
#[derive(Debug)]
pub struct MultiTransferPayment {
    pub charge: Charge,
    pub transfers: Vec<AllocatedTransfer>,
}
