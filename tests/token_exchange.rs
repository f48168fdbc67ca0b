// tests/token_exchange.rs
use codegate_core::application::{dto::AuditStatus, error::AuthError};
use codegate_core::domain::grant::ScopeSet;
use codegate_core::infrastructure::security::hmac::HmacKey;
use std::sync::Arc;

mod support;

use support::{
    ACCESS_SECRET, CODE_SECRET, RecordingAuditSink, TEST_AUDIENCE, TEST_SUBJECT, fixed_now,
    test_signer,
};

fn scopes() -> ScopeSet {
    ScopeSet::from_iter(["invoices.read", "payments.read"])
}

#[tokio::test]
async fn exchange_returns_bearer_pair_with_expected_lifetimes() {
    let services = support::build_services();

    let code = services
        .code_grants
        .issue(TEST_SUBJECT, TEST_AUDIENCE, scopes())
        .unwrap();

    let response = services
        .tokens
        .exchange_code_for_tokens(&code, TEST_AUDIENCE)
        .await
        .unwrap();

    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, 3600);
    assert_eq!(response.scope, "invoices.read payments.read");

    let signer = test_signer();
    let now = fixed_now().timestamp();

    let access = signer.decode_access(&response.access_token).unwrap();
    assert_eq!(access.subject, TEST_SUBJECT);
    assert_eq!(access.audience, TEST_AUDIENCE);
    assert_eq!(access.scopes, scopes());
    assert_eq!(access.expires_at - now, 3600);

    let refresh = signer.decode_refresh(&response.refresh_token).unwrap();
    assert_eq!(refresh.subject, TEST_SUBJECT);
    assert_eq!(refresh.expires_at - now, 2_592_000);
}

#[tokio::test]
async fn access_and_refresh_are_signed_with_keys_distinct_from_the_code_key() {
    let services = support::build_services();

    let code = services
        .code_grants
        .issue(TEST_SUBJECT, TEST_AUDIENCE, scopes())
        .unwrap();
    let response = services
        .tokens
        .exchange_code_for_tokens(&code, TEST_AUDIENCE)
        .await
        .unwrap();

    // The code key must not validate either minted token, nor the access
    // key the refresh token.
    let code_key = HmacKey::new(CODE_SECRET);
    let access_key = HmacKey::new(ACCESS_SECRET);
    assert!(
        code_key
            .verify::<serde_json::Value>(&response.access_token)
            .is_err()
    );
    assert!(
        code_key
            .verify::<serde_json::Value>(&response.refresh_token)
            .is_err()
    );
    assert!(
        access_key
            .verify::<serde_json::Value>(&response.refresh_token)
            .is_err()
    );
}

#[tokio::test]
async fn refresh_token_carries_no_scopes() {
    let services = support::build_services();

    let token = services
        .tokens
        .mint_refresh_token(TEST_SUBJECT, TEST_AUDIENCE)
        .unwrap();
    let claims = test_signer().decode_refresh(&token).unwrap();

    // RefreshClaims has no scopes field; check the raw payload to be sure
    // nothing leaked into the encoding.
    let raw: serde_json::Value = HmacKey::new(support::REFRESH_SECRET).verify(&token).unwrap();
    assert!(raw.get("scopes").is_none());
    assert_eq!(claims.subject, TEST_SUBJECT);
}

#[tokio::test]
async fn second_exchange_of_the_same_code_is_replayed() {
    let services = support::build_services();

    let code = services
        .code_grants
        .issue(TEST_SUBJECT, TEST_AUDIENCE, scopes())
        .unwrap();

    services
        .tokens
        .exchange_code_for_tokens(&code, TEST_AUDIENCE)
        .await
        .unwrap();

    let err = services
        .tokens
        .exchange_code_for_tokens(&code, TEST_AUDIENCE)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Replayed));
}

#[tokio::test]
async fn concurrent_exchanges_of_one_code_have_exactly_one_winner() {
    let services = support::build_services();

    let code = services
        .code_grants
        .issue(TEST_SUBJECT, TEST_AUDIENCE, scopes())
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let services = Arc::clone(&services);
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            services
                .tokens
                .exchange_code_for_tokens(&code, TEST_AUDIENCE)
                .await
        }));
    }

    let mut successes = 0;
    let mut replays = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AuthError::Replayed) => replays += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(replays, 7);
}

#[tokio::test]
async fn exchange_audits_grants_and_denials() {
    let audit = Arc::new(RecordingAuditSink::default());
    let services = support::ServicesBuilder::default()
        .with_audit_sink(audit.clone())
        .build();

    let code = services
        .code_grants
        .issue(TEST_SUBJECT, TEST_AUDIENCE, scopes())
        .unwrap();

    services
        .tokens
        .exchange_code_for_tokens(&code, TEST_AUDIENCE)
        .await
        .unwrap();
    let _ = services
        .tokens
        .exchange_code_for_tokens(&code, TEST_AUDIENCE)
        .await;

    let events = audit.events();
    assert_eq!(events.len(), 2);

    assert_eq!(events[0].action, "token_exchange");
    assert_eq!(events[0].status, AuditStatus::Granted);
    assert_eq!(events[0].subject.as_deref(), Some(TEST_SUBJECT));

    assert_eq!(events[1].status, AuditStatus::Denied);
    assert_eq!(events[1].reason.as_deref(), Some("replayed"));
}

#[tokio::test]
async fn audit_outage_does_not_block_the_exchange() {
    let services = support::ServicesBuilder::default()
        .with_audit_sink(Arc::new(support::FailingAuditSink))
        .build();

    let code = services
        .code_grants
        .issue(TEST_SUBJECT, TEST_AUDIENCE, scopes())
        .unwrap();

    let response = services
        .tokens
        .exchange_code_for_tokens(&code, TEST_AUDIENCE)
        .await
        .unwrap();
    assert_eq!(response.token_type, "Bearer");
}
