use futures::future;
use serde::Serialize;

use super::StripeClient;
use crate::error::StripeError;
use crate::models::{
    AllocatedTransfer, Balance, Charge, MultiTransferPayment, Payout, Refund, Transfer,
    TransferReversal, TransferSpec,
};
use crate::utils::to_minor_units;

/// Parameters for a charge split between the platform and one vendor.
///
/// `Default` gives `usd` currency and immediate capture.
#[derive(Debug, Clone)]
pub struct DestinationChargeParams {
    pub customer: String,
    /// Connected account receiving the vendor share.
    pub vendor: String,
    /// Total charge in decimal currency units.
    pub amount: f64,
    /// Vendor share in decimal currency units.
    pub vendor_amount: f64,
    pub currency: String,
    pub receipt_email: Option<String>,
    pub description: Option<String>,
    pub statement_descriptor: Option<String>,
    pub capture: bool,
}

impl Default for DestinationChargeParams {
    fn default() -> Self {
        Self {
            customer: String::new(),
            vendor: String::new(),
            amount: 0.0,
            vendor_amount: 0.0,
            currency: "usd".to_string(),
            receipt_email: None,
            description: None,
            statement_descriptor: None,
            capture: true,
        }
    }
}

/// Parameters for a charge whose proceeds fan out to several vendors.
///
/// `Default` gives `usd` currency and immediate capture.
#[derive(Debug, Clone)]
pub struct MultiTransferParams {
    pub customer: String,
    /// Total charge in decimal currency units.
    pub amount: f64,
    pub transfers: Vec<TransferSpec>,
    /// Group label tying the charge and its transfers together.
    pub transfer_group: String,
    pub currency: String,
    pub receipt_email: Option<String>,
    pub description: Option<String>,
    pub statement_descriptor: Option<String>,
    pub capture: bool,
}

impl Default for MultiTransferParams {
    fn default() -> Self {
        Self {
            customer: String::new(),
            amount: 0.0,
            transfers: Vec::new(),
            transfer_group: String::new(),
            currency: "usd".to_string(),
            receipt_email: None,
            description: None,
            statement_descriptor: None,
            capture: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct DestinationChargeRequest<'a> {
    capture: bool,
    customer: &'a str,
    amount: i64,
    currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "destination[account]")]
    destination_account: &'a str,
    #[serde(rename = "destination[amount]")]
    destination_amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statement_descriptor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct GroupChargeRequest<'a> {
    capture: bool,
    customer: &'a str,
    amount: i64,
    currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    transfer_group: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statement_descriptor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct TransferRequest<'a> {
    amount: i64,
    currency: &'a str,
    destination: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    transfer_group: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ReversalRequest {
    amount: i64,
}

#[derive(Debug, Serialize)]
struct RefundRequest<'a> {
    charge: &'a str,
}

#[derive(Debug, Serialize)]
struct PayoutRequest<'a> {
    amount: i64,
    currency: &'a str,
}

impl StripeClient {
    /// Charge a customer and route a share of the proceeds to one vendor.
    pub async fn create_destination_charge(
        &self,
        params: &DestinationChargeParams,
    ) -> Result<Charge, StripeError> {
        let request = DestinationChargeRequest {
            capture: params.capture,
            customer: &params.customer,
            amount: to_minor_units(params.amount),
            currency: &params.currency,
            description: params.description.as_deref(),
            destination_account: &params.vendor,
            destination_amount: to_minor_units(params.vendor_amount),
            receipt_email: params.receipt_email.as_deref(),
            statement_descriptor: params.statement_descriptor.as_deref(),
        };
        let charge: Charge = self.post_form("/charges", &request, None).await?;
        tracing::info!(charge_id = %charge.id, amount = charge.amount, "destination charge created");
        Ok(charge)
    }

    /// Charge a customer once, then fan the proceeds out to several
    /// vendors under one transfer group.
    ///
    /// All transfers are issued concurrently and joined. A failed transfer
    /// fails the whole operation; the charge and any transfers that already
    /// completed are not reversed.
    pub async fn create_multi_transfer_payment(
        &self,
        params: &MultiTransferParams,
    ) -> Result<MultiTransferPayment, StripeError> {
        let request = GroupChargeRequest {
            capture: params.capture,
            customer: &params.customer,
            amount: to_minor_units(params.amount),
            currency: &params.currency,
            description: params.description.as_deref(),
            transfer_group: &params.transfer_group,
            receipt_email: params.receipt_email.as_deref(),
            statement_descriptor: params.statement_descriptor.as_deref(),
        };
        let charge: Charge = self.post_form("/charges", &request, None).await?;

        let transfer_calls = params.transfers.iter().map(|spec| {
            self.create_transfer(
                spec.amount,
                &spec.account,
                Some(&params.transfer_group),
                &params.currency,
            )
        });
        let created = future::try_join_all(transfer_calls).await?;

        let transfers = params
            .transfers
            .iter()
            .zip(created)
            .map(|(spec, transfer)| AllocatedTransfer {
                account: spec.account.clone(),
                amount: spec.amount,
                transfer_id: transfer.id,
            })
            .collect();

        tracing::info!(
            charge_id = %charge.id,
            transfer_count = params.transfers.len(),
            transfer_group = %params.transfer_group,
            "multi-transfer payment completed"
        );
        Ok(MultiTransferPayment { charge, transfers })
    }

    /// Move already-collected funds from the platform balance to a vendor.
    pub async fn create_transfer(
        &self,
        amount: f64,
        destination: &str,
        transfer_group: Option<&str>,
        currency: &str,
    ) -> Result<Transfer, StripeError> {
        let request = TransferRequest {
            amount: to_minor_units(amount),
            currency,
            destination,
            transfer_group,
        };
        self.post_form("/transfers", &request, None).await
    }

    /// Return part of a transfer to the platform balance.
    pub async fn reverse_transfer(
        &self,
        transfer_id: &str,
        amount: f64,
    ) -> Result<TransferReversal, StripeError> {
        let request = ReversalRequest {
            amount: to_minor_units(amount),
        };
        self.post_form(
            &format!("/transfers/{}/reversals", transfer_id),
            &request,
            None,
        )
        .await
    }

    /// Refund a charge in full.
    pub async fn refund_charge(&self, charge_id: &str) -> Result<Refund, StripeError> {
        self.post_form("/refunds", &RefundRequest { charge: charge_id }, None)
            .await
    }

    /// Pay out from a vendor's Stripe balance to their bank account.
    pub async fn create_payout(
        &self,
        account_id: &str,
        amount: f64,
        currency: &str,
    ) -> Result<Payout, StripeError> {
        let request = PayoutRequest {
            amount: to_minor_units(amount),
            currency,
        };
        self.post_form("/payouts", &request, Some(account_id)).await
    }

    /// Read a vendor's available and pending balance.
    pub async fn retrieve_balance(&self, account_id: &str) -> Result<Balance, StripeError> {
        self.get("/balance", Some(account_id)).await
    }
}
