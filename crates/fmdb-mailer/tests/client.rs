//! Integration tests for `MailerClient` using wiremock HTTP mocks.

use fmdb_mailer::{render_contact_email, ContactForm, MailerClient, MailerError, OutboundEmail};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_email() -> OutboundEmail {
    let form = ContactForm {
        name: "Jane Farmer".to_string(),
        email: "jane@example.com".to_string(),
        phone: None,
        address: None,
        market_name: "Jane's Market".to_string(),
        products: None,
        website: None,
        message: "Please list us.".to_string(),
    };
    render_contact_email(&form, "no-reply@example.com", "contact@example.com")
}

#[tokio::test]
async fn send_posts_json_message_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(serde_json::json!({
            "to": "contact@example.com",
            "reply_to": "jane@example.com",
            "subject": "New Market Listing Request from Jane Farmer - Jane's Market"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        MailerClient::new(&server.uri(), Some("test-token"), 30).expect("client construction");
    client.send(&sample_email()).await.expect("send succeeds");
}

#[tokio::test]
async fn send_without_token_omits_authorization() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = MailerClient::new(&server.uri(), None, 30).expect("client construction");
    client.send(&sample_email()).await.expect("send succeeds");
}

#[tokio::test]
async fn send_surfaces_relay_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(422).set_body_string("bad recipient"))
        .mount(&server)
        .await;

    let client = MailerClient::new(&server.uri(), None, 30).expect("client construction");
    let err = client.send(&sample_email()).await.expect_err("must fail");

    match err {
        MailerError::Relay { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body, "bad recipient");
        }
        other => panic!("expected Relay error, got {other:?}"),
    }
}
