use chrono::Utc;
use serde::Serialize;

use super::StripeClient;
use crate::error::StripeError;
use crate::models::{
    Account, AccountAddress, DateOfBirth, Deleted, Person, PersonName, PersonRelationship, Token,
    VerificationDocuments,
};
use crate::utils::currency_for_country;

/// Placeholder profile Stripe requires on custom accounts before the vendor
/// supplies a real one. 7299 is the generic personal-services MCC.
const BUSINESS_PROFILE_URL: &str = "www.randomurl.com";
const BUSINESS_PROFILE_MCC: &str = "7299";

#[derive(Debug, Serialize)]
struct CreateAccountRequest<'a> {
    email: &'a str,
    country: &'a str,
    #[serde(rename = "type")]
    account_type: &'static str,
    #[serde(rename = "requested_capabilities[0]")]
    capability_card_payments: &'static str,
    #[serde(rename = "requested_capabilities[1]")]
    capability_transfers: &'static str,
}

#[derive(Debug, Serialize)]
struct ExternalAccountRequest<'a> {
    #[serde(rename = "external_account[object]")]
    object: &'static str,
    #[serde(rename = "external_account[country]")]
    country: &'a str,
    #[serde(
        rename = "external_account[currency]",
        skip_serializing_if = "Option::is_none"
    )]
    currency: Option<&'static str>,
    #[serde(rename = "external_account[account_number]")]
    account_number: &'a str,
    #[serde(
        rename = "external_account[routing_number]",
        skip_serializing_if = "Option::is_none"
    )]
    routing_number: Option<&'a str>,
    #[serde(
        rename = "external_account[account_holder_name]",
        skip_serializing_if = "Option::is_none"
    )]
    account_holder_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AccountKycRequest<'a> {
    business_type: &'static str,
    #[serde(rename = "business_profile[url]")]
    business_profile_url: &'static str,
    #[serde(rename = "business_profile[mcc]")]
    business_profile_mcc: &'static str,
    #[serde(rename = "individual[first_name]")]
    first_name: &'a str,
    #[serde(rename = "individual[last_name]")]
    last_name: &'a str,
    #[serde(rename = "individual[email]")]
    email: &'a str,
    #[serde(rename = "individual[phone]")]
    phone: &'a str,
    #[serde(rename = "individual[address][line1]")]
    address_line1: &'a str,
    #[serde(
        rename = "individual[address][line2]",
        skip_serializing_if = "Option::is_none"
    )]
    address_line2: Option<&'a str>,
    #[serde(rename = "individual[address][city]")]
    address_city: &'a str,
    #[serde(rename = "individual[address][state]")]
    address_state: &'a str,
    #[serde(rename = "individual[address][postal_code]")]
    address_postal_code: &'a str,
    #[serde(rename = "individual[address][country]")]
    address_country: &'a str,
    #[serde(rename = "individual[dob][day]")]
    dob_day: u8,
    #[serde(rename = "individual[dob][month]")]
    dob_month: u8,
    #[serde(rename = "individual[dob][year]")]
    dob_year: u16,
    #[serde(
        rename = "individual[ssn_last_4]",
        skip_serializing_if = "Option::is_none"
    )]
    ssn_last_4: Option<&'a str>,
    #[serde(
        rename = "individual[id_number]",
        skip_serializing_if = "Option::is_none"
    )]
    id_number: Option<&'a str>,
    #[serde(
        rename = "individual[id_number_type]",
        skip_serializing_if = "Option::is_none"
    )]
    id_number_type: Option<&'static str>,
    #[serde(
        rename = "individual[verification][document][front]",
        skip_serializing_if = "Option::is_none"
    )]
    document_front: Option<&'a str>,
    #[serde(
        rename = "individual[verification][document][back]",
        skip_serializing_if = "Option::is_none"
    )]
    document_back: Option<&'a str>,
    #[serde(rename = "tos_acceptance[date]")]
    tos_date: i64,
    #[serde(rename = "tos_acceptance[ip]")]
    tos_ip: &'a str,
    #[serde(
        rename = "settings[payouts][schedule][interval]",
        skip_serializing_if = "Option::is_none"
    )]
    payout_interval: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct ManualPayoutsRequest {
    #[serde(rename = "settings[payouts][schedule][interval]")]
    interval: &'static str,
}

#[derive(Debug, Serialize)]
struct CreatePersonRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    #[serde(flatten)]
    relationship: &'a PersonRelationship,
}

/// Identity data submitted to enable payouts on a connected account.
///
/// Country-specific fields are applied by [`StripeClient::submit_kyc`]:
/// the US tax fields go out only for US addresses, Indian vendors get a
/// PAN-typed id number, and the manual-payout settings block is dropped
/// for India.
#[derive(Debug, Clone)]
pub struct KycParams {
    pub email: String,
    pub phone: String,
    pub address: AccountAddress,
    pub dob: DateOfBirth,
    pub name: PersonName,
    /// Originating address of the vendor accepting the terms of service.
    pub remote_ip: String,
    pub documents: Option<VerificationDocuments>,
    /// Last four digits of the US social security number.
    pub ssn_last_four: Option<String>,
    /// Government id number: SSN for US vendors, PAN for Indian vendors.
    pub personal_id_number: Option<String>,
}

impl StripeClient {
    /// Create a custom connected account for a vendor, requesting the card
    /// payment and transfer capabilities.
    pub async fn create_connected_account(
        &self,
        email: &str,
        country: &str,
    ) -> Result<Account, StripeError> {
        let request = CreateAccountRequest {
            email,
            country,
            account_type: "custom",
            capability_card_payments: "card_payments",
            capability_transfers: "transfers",
        };
        let account: Account = self.post_form("/accounts", &request, None).await?;
        tracing::info!(account_id = %account.id, country = %country, "connected account created");
        Ok(account)
    }

    pub async fn delete_connected_account(
        &self,
        account_id: &str,
    ) -> Result<Deleted, StripeError> {
        self.delete(&format!("/accounts/{}", account_id)).await
    }

    pub async fn retrieve_connected_account(
        &self,
        account_id: &str,
    ) -> Result<Account, StripeError> {
        self.get(&format!("/accounts/{}", account_id), None).await
    }

    /// Create a single-use token from caller-shaped parameters.
    ///
    /// The parameter set is passed through unchanged; keys follow Stripe's
    /// bracket notation (e.g. `account[tos_shown_and_accepted]`).
    pub async fn create_account_token<P>(&self, params: &P) -> Result<Token, StripeError>
    where
        P: Serialize + ?Sized,
    {
        self.post_form("/tokens", params, None).await
    }

    /// Attach an external bank account to a connected account.
    ///
    /// # Arguments
    /// * `routing_number` - Omitted from the request for countries settling
    ///   in eur, which has no routing numbers
    /// * `account_holder_name` - Included only when supplied
    /// * `country` - Determines the settlement currency
    pub async fn attach_bank_account(
        &self,
        account_id: &str,
        routing_number: &str,
        account_number: &str,
        account_holder_name: Option<&str>,
        country: &str,
    ) -> Result<Account, StripeError> {
        let currency = currency_for_country(country);
        let routing_number = if currency == Some("eur") {
            None
        } else {
            Some(routing_number)
        };

        let request = ExternalAccountRequest {
            object: "bank_account",
            country,
            currency,
            account_number,
            routing_number,
            account_holder_name,
        };
        self.post_form(&format!("/accounts/{}", account_id), &request, None)
            .await
    }

    /// Submit individual KYC details on a connected account, accepting the
    /// terms of service at the current timestamp.
    pub async fn submit_kyc(
        &self,
        account_id: &str,
        params: &KycParams,
    ) -> Result<Account, StripeError> {
        let country = params.address.country.as_str();

        let mut ssn_last_4 = None;
        let mut id_number = None;
        let mut id_number_type = None;
        if country == "US" {
            ssn_last_4 = params.ssn_last_four.as_deref();
            id_number = params.personal_id_number.as_deref();
        }
        if country == "IN" {
            id_number = params.personal_id_number.as_deref();
            id_number_type = Some("PAN");
        }

        // Indian accounts do not take the manual-payout settings block.
        let payout_interval = if country == "IN" { None } else { Some("manual") };

        let (document_front, document_back) = match &params.documents {
            Some(documents) => (documents.front.as_deref(), documents.back.as_deref()),
            None => (None, None),
        };

        let request = AccountKycRequest {
            business_type: "individual",
            business_profile_url: BUSINESS_PROFILE_URL,
            business_profile_mcc: BUSINESS_PROFILE_MCC,
            first_name: &params.name.first,
            last_name: &params.name.last,
            email: &params.email,
            phone: &params.phone,
            address_line1: &params.address.line1,
            address_line2: params.address.line2.as_deref(),
            address_city: &params.address.city,
            address_state: &params.address.state,
            address_postal_code: &params.address.postal_code,
            address_country: country,
            dob_day: params.dob.day,
            dob_month: params.dob.month,
            dob_year: params.dob.year,
            ssn_last_4,
            id_number,
            id_number_type,
            document_front,
            document_back,
            tos_date: Utc::now().timestamp(),
            tos_ip: &params.remote_ip,
            payout_interval,
        };

        let account: Account = self
            .post_form(&format!("/accounts/{}", account_id), &request, None)
            .await?;
        tracing::info!(account_id = %account.id, country = %country, "kyc details submitted");
        Ok(account)
    }

    /// Switch the account's payout schedule to manual release.
    pub async fn set_manual_payouts(&self, account_id: &str) -> Result<Account, StripeError> {
        self.post_form(
            &format!("/accounts/{}", account_id),
            &ManualPayoutsRequest { interval: "manual" },
            None,
        )
        .await
    }

    /// Register a person (representative, owner, ...) on a connected
    /// account.
    pub async fn create_person(
        &self,
        account_id: &str,
        name: &PersonName,
        relationship: &PersonRelationship,
    ) -> Result<Person, StripeError> {
        let request = CreatePersonRequest {
            first_name: &name.first,
            last_name: &name.last,
            relationship,
        };
        self.post_form(&format!("/accounts/{}/persons", account_id), &request, None)
            .await
    }
}
