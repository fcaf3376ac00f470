use anyhow::Result;
use dotenvy::dotenv;
use secrecy::Secret;
use std::env;

/// Deployment mode selecting which Stripe secret key is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Production,
    Test,
}

impl Environment {
    /// Read the `ENVIRONMENT` variable; only the exact value `production`
    /// selects the live key.
    fn from_process_env() -> Self {
        match env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Self::Production,
            _ => Self::Test,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StripeConfig {
    pub environment: Environment,
    pub secret_key_prod: Secret<String>,
    pub secret_key_test: Secret<String>,
    pub api_base_url: String,
    pub files_base_url: String,
}

impl StripeConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        // A missing key is not an error here; it surfaces when Stripe
        // rejects the call.
        let secret_key_prod = Secret::new(env::var("STRIPE_KEY_PROD").unwrap_or_default());
        let secret_key_test = Secret::new(env::var("STRIPE_KEY_TEST").unwrap_or_default());

        Ok(Self {
            environment: Environment::from_process_env(),
            secret_key_prod,
            secret_key_test,
            api_base_url: "https://api.stripe.com/v1".to_string(),
            files_base_url: "https://files.stripe.com/v1".to_string(),
        })
    }

    /// Secret key matching the configured deployment environment.
    pub fn secret_key(&self) -> &Secret<String> {
        match self.environment {
            Environment::Production => &self.secret_key_prod,
            Environment::Test => &self.secret_key_test,
        }
    }
}
