mod common;

use common::{value, TestGateway};
use serde_json::json;
use stripe_gateway::models::TransferSpec;
use stripe_gateway::{DestinationChargeParams, MultiTransferParams, StripeError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, Request, Respond, ResponseTemplate};

/// Responds to a transfer creation with an id derived from the requested
/// destination, so tests can tie each result back to its call.
struct EchoTransfer;

impl Respond for EchoTransfer {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let params: Vec<(String, String)> =
            serde_urlencoded::from_bytes(&request.body).expect("transfer body was form encoded");
        let destination = params
            .iter()
            .find(|(name, _)| name == "destination")
            .map(|(_, v)| v.clone())
            .expect("transfer carried a destination");
        let amount: i64 = params
            .iter()
            .find(|(name, _)| name == "amount")
            .and_then(|(_, v)| v.parse().ok())
            .expect("transfer carried an integer amount");

        ResponseTemplate::new(200).set_body_json(json!({
            "id": format!("tr_{}", destination),
            "object": "transfer",
            "amount": amount,
            "currency": "usd",
            "destination": destination,
            "transfer_group": "group_9"
        }))
    }
}

fn charge_body(id: &str, amount: i64) -> serde_json::Value {
    json!({
        "id": id,
        "object": "charge",
        "amount": amount,
        "currency": "usd",
        "customer": "cus_1",
        "status": "succeeded",
        "captured": true
    })
}

#[tokio::test]
async fn destination_charges_convert_amounts_to_minor_units() {
    let gateway = TestGateway::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(charge_body("ch_1", 1099)))
        .expect(1)
        .mount(&gateway.server)
        .await;

    let charge = gateway
        .client
        .create_destination_charge(&DestinationChargeParams {
            customer: "cus_1".to_string(),
            vendor: "acct_1".to_string(),
            amount: 10.99,
            vendor_amount: 5.5,
            ..DestinationChargeParams::default()
        })
        .await
        .unwrap();
    assert_eq!(charge.id, "ch_1");

    let params = gateway.form_params(0).await;
    assert_eq!(value(&params, "amount"), Some("1099"));
    assert_eq!(value(&params, "currency"), Some("usd"));
    assert_eq!(value(&params, "capture"), Some("true"));
    assert_eq!(value(&params, "destination[account]"), Some("acct_1"));
    assert_eq!(value(&params, "destination[amount]"), Some("550"));
    assert!(value(&params, "receipt_email").is_none());
    assert!(value(&params, "statement_descriptor").is_none());
}

#[tokio::test]
async fn destination_charges_include_optional_fields_when_supplied() {
    let gateway = TestGateway::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(charge_body("ch_1", 2000)))
        .mount(&gateway.server)
        .await;

    gateway
        .client
        .create_destination_charge(&DestinationChargeParams {
            customer: "cus_1".to_string(),
            vendor: "acct_1".to_string(),
            amount: 20.0,
            vendor_amount: 15.0,
            receipt_email: Some("buyer@example.com".to_string()),
            description: Some("order 42".to_string()),
            statement_descriptor: Some("MARKETPLACE".to_string()),
            ..DestinationChargeParams::default()
        })
        .await
        .unwrap();

    let params = gateway.form_params(0).await;
    assert_eq!(value(&params, "receipt_email"), Some("buyer@example.com"));
    assert_eq!(value(&params, "description"), Some("order 42"));
    assert_eq!(value(&params, "statement_descriptor"), Some("MARKETPLACE"));
}

#[tokio::test]
async fn multi_transfer_payment_issues_one_charge_and_one_transfer_per_vendor() {
    let gateway = TestGateway::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(charge_body("ch_1", 10000)))
        .expect(1)
        .mount(&gateway.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/transfers"))
        .respond_with(EchoTransfer)
        .expect(3)
        .mount(&gateway.server)
        .await;

    let result = gateway
        .client
        .create_multi_transfer_payment(&MultiTransferParams {
            customer: "cus_1".to_string(),
            amount: 100.0,
            transfers: vec![
                TransferSpec {
                    account: "acct_a".to_string(),
                    amount: 40.0,
                },
                TransferSpec {
                    account: "acct_b".to_string(),
                    amount: 35.5,
                },
                TransferSpec {
                    account: "acct_c".to_string(),
                    amount: 10.0,
                },
            ],
            transfer_group: "group_9".to_string(),
            ..MultiTransferParams::default()
        })
        .await
        .unwrap();

    assert_eq!(result.charge.id, "ch_1");
    assert_eq!(result.transfers.len(), 3);
    assert_eq!(result.transfers[0].transfer_id, "tr_acct_a");
    assert_eq!(result.transfers[1].transfer_id, "tr_acct_b");
    assert_eq!(result.transfers[2].transfer_id, "tr_acct_c");
    assert_eq!(result.transfers[1].account, "acct_b");
    assert_eq!(result.transfers[1].amount, 35.5);

    let requests = gateway.server.received_requests().await.unwrap();
    let charges = requests
        .iter()
        .filter(|r| r.url.path() == "/v1/charges")
        .count();
    let transfers = requests
        .iter()
        .filter(|r| r.url.path() == "/v1/transfers")
        .count();
    assert_eq!(charges, 1);
    assert_eq!(transfers, 3);

    let charge_params = gateway.form_params(0).await;
    assert_eq!(value(&charge_params, "amount"), Some("10000"));
    assert_eq!(value(&charge_params, "transfer_group"), Some("group_9"));

    for request in requests.iter().filter(|r| r.url.path() == "/v1/transfers") {
        let params: Vec<(String, String)> = serde_urlencoded::from_bytes(&request.body).unwrap();
        assert_eq!(value(&params, "transfer_group"), Some("group_9"));
        assert_eq!(value(&params, "currency"), Some("usd"));
    }
}

#[tokio::test]
async fn multi_transfer_payment_fails_when_any_transfer_fails() {
    let gateway = TestGateway::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(charge_body("ch_1", 10000)))
        .expect(1)
        .mount(&gateway.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/transfers"))
        .and(body_string_contains("destination=acct_bad"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "type": "invalid_request_error",
                "message": "No such destination: acct_bad"
            }
        })))
        .mount(&gateway.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/transfers"))
        .respond_with(EchoTransfer)
        .mount(&gateway.server)
        .await;

    let err = gateway
        .client
        .create_multi_transfer_payment(&MultiTransferParams {
            customer: "cus_1".to_string(),
            amount: 100.0,
            transfers: vec![
                TransferSpec {
                    account: "acct_a".to_string(),
                    amount: 50.0,
                },
                TransferSpec {
                    account: "acct_bad".to_string(),
                    amount: 50.0,
                },
            ],
            transfer_group: "group_9".to_string(),
            ..MultiTransferParams::default()
        })
        .await
        .unwrap_err();

    match err {
        StripeError::Api { status, error } => {
            assert_eq!(status, 400);
            assert_eq!(
                error.message.as_deref(),
                Some("No such destination: acct_bad")
            );
        }
        other => panic!("expected Api error, got {:?}", other),
    }

    // The charge is not rolled back.
    let requests = gateway.server.received_requests().await.unwrap();
    assert_eq!(
        requests
            .iter()
            .filter(|r| r.url.path() == "/v1/charges")
            .count(),
        1
    );
}

#[tokio::test]
async fn payouts_run_on_behalf_of_the_connected_account() {
    let gateway = TestGateway::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/payouts"))
        .and(header("Stripe-Account", "acct_7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "po_1",
            "object": "payout",
            "amount": 7550,
            "currency": "usd",
            "status": "pending"
        })))
        .expect(1)
        .mount(&gateway.server)
        .await;

    let payout = gateway
        .client
        .create_payout("acct_7", 75.5, "usd")
        .await
        .unwrap();
    assert_eq!(payout.id, "po_1");

    let params = gateway.form_params(0).await;
    assert_eq!(value(&params, "amount"), Some("7550"));
    assert_eq!(value(&params, "currency"), Some("usd"));
}

#[tokio::test]
async fn balance_reads_use_the_connected_account_header() {
    let gateway = TestGateway::spawn().await;

    Mock::given(method("GET"))
        .and(path("/v1/balance"))
        .and(header("Stripe-Account", "acct_7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "balance",
            "livemode": false,
            "available": [{"amount": 12000, "currency": "usd"}],
            "pending": [{"amount": 300, "currency": "usd"}]
        })))
        .expect(1)
        .mount(&gateway.server)
        .await;

    let balance = gateway.client.retrieve_balance("acct_7").await.unwrap();
    assert_eq!(balance.available[0].amount, 12000);
    assert_eq!(balance.pending[0].amount, 300);
}

#[tokio::test]
async fn transfer_reversals_post_to_the_transfer_subresource() {
    let gateway = TestGateway::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/transfers/tr_1/reversals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "trr_1",
            "object": "transfer_reversal",
            "amount": 1250,
            "currency": "usd",
            "transfer": "tr_1"
        })))
        .expect(1)
        .mount(&gateway.server)
        .await;

    let reversal = gateway.client.reverse_transfer("tr_1", 12.5).await.unwrap();
    assert_eq!(reversal.id, "trr_1");

    let params = gateway.form_params(0).await;
    assert_eq!(value(&params, "amount"), Some("1250"));
}

#[tokio::test]
async fn refunds_reference_the_charge() {
    let gateway = TestGateway::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/refunds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "re_1",
            "object": "refund",
            "amount": 1099,
            "currency": "usd",
            "charge": "ch_1",
            "status": "succeeded"
        })))
        .expect(1)
        .mount(&gateway.server)
        .await;

    let refund = gateway.client.refund_charge("ch_1").await.unwrap();
    assert_eq!(refund.charge.as_deref(), Some("ch_1"));

    let params = gateway.form_params(0).await;
    assert_eq!(value(&params, "charge"), Some("ch_1"));
}

#[tokio::test]
async fn standalone_transfers_carry_their_group() {
    let gateway = TestGateway::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/transfers"))
        .respond_with(EchoTransfer)
        .expect(1)
        .mount(&gateway.server)
        .await;

    let transfer = gateway
        .client
        .create_transfer(19.99, "acct_9", Some("group_2"), "usd")
        .await
        .unwrap();
    assert_eq!(transfer.id, "tr_acct_9");
    assert_eq!(transfer.amount, 1999);

    let params = gateway.form_params(0).await;
    assert_eq!(value(&params, "amount"), Some("1999"));
    assert_eq!(value(&params, "destination"), Some("acct_9"));
    assert_eq!(value(&params, "transfer_group"), Some("group_2"));
}
