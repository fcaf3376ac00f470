use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Error object returned by Stripe in the body of a non-2xx response,
/// carried back to the caller unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub param: Option<String>,
    pub decline_code: Option<String>,
    pub doc_url: Option<String>,
    /// Charge the error relates to, for card errors.
    pub charge: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message.as_deref().unwrap_or("unknown error");
        match self.code.as_deref() {
            Some(code) => write!(f, "{} ({})", message, code),
            None => write!(f, "{}", message),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Error)]
pub enum StripeError {
    /// Stripe rejected the request.
    #[error("stripe returned {status}: {error}")]
    Api { status: u16, error: ApiError },

    /// The request never produced a response from Stripe.
    #[error("request to stripe failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful response carried a body this crate could not decode.
    #[error("failed to decode stripe response: {0}")]
    Decode(#[from] serde_json::Error),
}
