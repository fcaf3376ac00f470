use serde::Serialize;

use super::StripeClient;
use crate::error::StripeError;
use crate::models::{Card, Customer, Deleted, List};

#[derive(Debug, Serialize)]
struct CreateCustomerRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct AttachSourceRequest<'a> {
    source: &'a str,
}

#[derive(Debug, Serialize)]
struct DefaultSourceRequest<'a> {
    default_source: &'a str,
}

impl StripeClient {
    /// Register a new platform customer.
    pub async fn create_customer(&self, email: &str) -> Result<Customer, StripeError> {
        let customer: Customer = self
            .post_form("/customers", &CreateCustomerRequest { email }, None)
            .await?;
        tracing::info!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }

    /// Attach a tokenized card to a customer.
    pub async fn attach_card(&self, customer_id: &str, token: &str) -> Result<Card, StripeError> {
        self.post_form(
            &format!("/customers/{}/sources", customer_id),
            &AttachSourceRequest { source: token },
            None,
        )
        .await
    }

    /// Make the given card the customer's default payment source.
    pub async fn set_default_card(
        &self,
        customer_id: &str,
        card_id: &str,
    ) -> Result<Customer, StripeError> {
        self.post_form(
            &format!("/customers/{}", customer_id),
            &DefaultSourceRequest {
                default_source: card_id,
            },
            None,
        )
        .await
    }

    /// List a customer's cards with the default one flagged.
    ///
    /// Two reads: the source list, then the customer record naming the
    /// default source.
    pub async fn list_cards(&self, customer_id: &str) -> Result<Vec<Card>, StripeError> {
        let sources: List<Card> = self
            .get(&format!("/customers/{}/sources", customer_id), None)
            .await?;
        let customer: Customer = self.get(&format!("/customers/{}", customer_id), None).await?;

        let cards = sources
            .data
            .into_iter()
            .map(|mut card| {
                card.is_default = customer.default_source.as_deref() == Some(card.id.as_str());
                card
            })
            .collect();
        Ok(cards)
    }

    /// Detach a card from a customer.
    pub async fn delete_card(
        &self,
        customer_id: &str,
        card_id: &str,
    ) -> Result<Deleted, StripeError> {
        self.delete(&format!("/customers/{}/sources/{}", customer_id, card_id))
            .await
    }
}
