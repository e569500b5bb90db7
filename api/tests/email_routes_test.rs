//! Integration tests for the email OTP endpoints

mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use serde_json::{json, Value};

use common::{context, cors, last_token, ContextOptions, MAX_PAYLOAD, TEST_CODE_STR};
use mt_api::create_app;
use mt_core::domain::entities::purpose::Purpose;
use mt_core::services::otp::{DELIVERY_FAILED_DETAIL, DELIVERY_SUCCESS_DETAIL};

fn send_body(email: &str, purpose: &str) -> Value {
    json!({
        "email": email,
        "user_name": "Jane Doe",
        "email_purpose": purpose,
        "subject": "Verify your account"
    })
}

#[actix_web::test]
async fn test_send_otp_success_hides_code_by_default() {
    let ctx = context(ContextOptions::default());
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), MAX_PAYLOAD)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/email/send-otp")
        .set_json(send_body("  Jane@Example.com ", "Email Verify"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["detail"], json!(DELIVERY_SUCCESS_DETAIL));
    assert!(body.get("otp_code").is_none());
    assert!(body.get("url").is_none());

    let sent = ctx.mail.sent_envelopes();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipients, vec!["jane@example.com".to_string()]);
    assert_eq!(sent[0].subject, "Verify your account");
    assert!(sent[0]
        .body
        .url
        .starts_with("https://admin.example.com/email-verify/"));
}

#[actix_web::test]
async fn test_send_otp_exposes_code_in_development() {
    let ctx = context(ContextOptions {
        expose_code: true,
        ..Default::default()
    });
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), MAX_PAYLOAD)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/email/send-otp")
        .set_json(send_body("jane@example.com", "password reset"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["otp_code"], json!(TEST_CODE_STR));
    let url = body["url"].as_str().unwrap();
    assert!(url.contains("/password-reset/"));
    assert!(body["expires_at"].is_string());
}

#[actix_web::test]
async fn test_send_otp_delivery_failure_is_bad_gateway() {
    let ctx = context(ContextOptions {
        mail_fails: true,
        expose_code: true,
        ..Default::default()
    });
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), MAX_PAYLOAD)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/email/send-otp")
        .set_json(send_body("jane@example.com", "Email Verify"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["detail"], json!(DELIVERY_FAILED_DETAIL));
    assert!(body.get("otp_code").is_none());
}

#[actix_web::test]
async fn test_send_otp_rejects_bad_input() {
    let ctx = context(ContextOptions::default());
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), MAX_PAYLOAD)).await;

    let cases = vec![
        send_body("not-an-email", "Email Verify"),
        send_body("jane@example.com", "Account Deletion"),
        json!({ "email": "jane@example.com" }),
    ];

    for payload in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/email/send-otp")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
    }
    assert!(ctx.mail.sent_envelopes().is_empty());
}

#[actix_web::test]
async fn test_verify_otp_round_trip() {
    let ctx = context(ContextOptions::default());
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), MAX_PAYLOAD)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/email/send-otp")
        .set_json(send_body("jane@example.com", "Email Verify"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let token = last_token(&ctx.mail);

    let req = test::TestRequest::post()
        .uri("/api/v1/email/verify-otp")
        .set_json(json!({ "token": token, "code": TEST_CODE_STR }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["identity"], json!("jane@example.com"));
    assert_eq!(body["purpose"], json!(Purpose::EmailVerify.label()));
}

#[actix_web::test]
async fn test_verify_otp_failure_statuses() {
    let ctx = context(ContextOptions::default());
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), MAX_PAYLOAD)).await;

    let issued = ctx
        .otp_service
        .issue("jane@example.com", Purpose::EmailVerify, Duration::minutes(10))
        .await
        .unwrap();
    let expired = ctx
        .otp_service
        .issue("jane@example.com", Purpose::EmailVerify, Duration::minutes(-5))
        .await
        .unwrap();

    let signature_start = issued.token.rfind('.').unwrap() + 1;
    let mut tampered = issued.token.clone();
    let replacement = if tampered[signature_start..].starts_with('A') { "B" } else { "A" };
    tampered.replace_range(signature_start..signature_start + 1, replacement);

    let cases = vec![
        (issued.token.clone(), "000000", StatusCode::BAD_REQUEST, "code_mismatch"),
        (expired.token.clone(), TEST_CODE_STR, StatusCode::GONE, "expired"),
        ("not.a.token".to_string(), TEST_CODE_STR, StatusCode::UNAUTHORIZED, "malformed"),
    ];

    for (token, code, status, reason) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/email/verify-otp")
            .set_json(json!({ "token": token, "code": code }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status, "reason: {}", reason);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["details"]["reason"], json!(reason));
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/email/verify-otp")
        .set_json(json!({ "token": tampered, "code": TEST_CODE_STR }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_verify_otp_single_use() {
    let ctx = context(ContextOptions {
        single_use: true,
        ..Default::default()
    });
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), MAX_PAYLOAD)).await;

    let issued = ctx
        .otp_service
        .issue("jane@example.com", Purpose::PasswordReset, Duration::minutes(10))
        .await
        .unwrap();

    let verify = || {
        test::TestRequest::post()
            .uri("/api/v1/email/verify-otp")
            .set_json(json!({ "token": issued.token, "code": TEST_CODE_STR }))
            .to_request()
    };

    assert_eq!(test::call_service(&app, verify()).await.status(), StatusCode::OK);

    let resp = test::call_service(&app, verify()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["reason"], json!("already_used"));
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = context(ContextOptions::default());
    let app = test::init_service(create_app(ctx.state.clone(), &cors(), MAX_PAYLOAD)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/email/verify-otp")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"token\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("BAD_REQUEST"));
}
