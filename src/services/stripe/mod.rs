//! Stripe Connect API client.
//!
//! Shapes form-encoded requests for the marketplace operations (customers
//! and cards, connected accounts and KYC, charges, transfers, payouts,
//! refunds, file uploads) and passes Stripe's responses and errors back
//! unchanged. Nested parameters use Stripe's bracket notation, expressed as
//! flat request structs with renamed fields.

mod accounts;
mod customers;
mod files;
mod payments;

pub use accounts::KycParams;
pub use files::UploadedFile;
pub use payments::{DestinationChargeParams, MultiTransferParams};

use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StripeConfig;
use crate::error::{ApiError, ApiErrorEnvelope, StripeError};

/// Client for the Stripe API. Cheap to clone; all operations borrow it
/// immutably.
#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    config: StripeConfig,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// POST a form-encoded body, optionally on behalf of a connected
    /// account.
    async fn post_form<B, T>(
        &self,
        path: &str,
        body: &B,
        stripe_account: Option<&str>,
    ) -> Result<T, StripeError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.api_base_url, path);
        let mut request = self
            .http
            .post(&url)
            .bearer_auth(self.config.secret_key().expose_secret())
            .form(body);
        if let Some(account) = stripe_account {
            request = request.header("Stripe-Account", account);
        }
        self.dispatch(request).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        stripe_account: Option<&str>,
    ) -> Result<T, StripeError> {
        let url = format!("{}{}", self.config.api_base_url, path);
        let mut request = self
            .http
            .get(&url)
            .bearer_auth(self.config.secret_key().expose_secret());
        if let Some(account) = stripe_account {
            request = request.header("Stripe-Account", account);
        }
        self.dispatch(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, StripeError> {
        let url = format!("{}{}", self.config.api_base_url, path);
        let request = self
            .http
            .delete(&url)
            .bearer_auth(self.config.secret_key().expose_secret());
        self.dispatch(request).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StripeError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, body = %body, "stripe response");

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            let error = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error)
                .unwrap_or_else(|_| ApiError {
                    message: Some(body.clone()),
                    ..ApiError::default()
                });
            tracing::error!(
                status = %status,
                code = ?error.code,
                message = ?error.message,
                "stripe request failed"
            );
            Err(StripeError::Api {
                status: status.as_u16(),
                error,
            })
        }
    }
}
