use secrecy::Secret;
use stripe_gateway::config::{Environment, StripeConfig};
use stripe_gateway::StripeClient;
use wiremock::MockServer;

pub const TEST_KEY: &str = "sk_test_gateway";

/// A stub Stripe server and a client pointed at it.
pub struct TestGateway {
    pub server: MockServer,
    pub client: StripeClient,
}

impl TestGateway {
    pub async fn spawn() -> Self {
        let server = MockServer::start().await;

        let config = StripeConfig {
            environment: Environment::Test,
            secret_key_prod: Secret::new("sk_live_unused".to_string()),
            secret_key_test: Secret::new(TEST_KEY.to_string()),
            api_base_url: format!("{}/v1", server.uri()),
            files_base_url: format!("{}/v1", server.uri()),
        };

        TestGateway {
            client: StripeClient::new(config),
            server,
        }
    }

    /// Form parameters of the `index`-th request the stub received.
    pub async fn form_params(&self, index: usize) -> Vec<(String, String)> {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording enabled");
        serde_urlencoded::from_bytes(&requests[index].body).expect("body was form encoded")
    }
}

/// First value recorded for `key`, if any.
pub fn value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, v)| v.as_str())
}
