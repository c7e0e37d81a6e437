//! JWT 签发与校验集成测试
//!
//! 覆盖令牌生命周期、线上格式契约和篡改场景

use cat_weight_tracker::auth::jwt::{JwtService, MAX_TOKEN_LEN};
use chrono::{Duration, Utc};

mod common;
use common::create_test_config;

fn service() -> JwtService {
    JwtService::from_config(&create_test_config()).expect("Failed to create JWT service")
}

#[test]
fn test_issue_then_validate_resolves_same_subject() {
    let service = service();

    let token = service.issue("alice").unwrap();
    let claims = service.validate_token(&token).unwrap();

    assert_eq!(claims.sub, "alice");
}

#[test]
fn test_wire_format_is_three_segments_with_minimal_claims() {
    let service = service();
    let token = service.issue("alice").unwrap();

    // 紧凑 JWS：header.payload.signature
    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3);

    // 载荷只包含 sub 和 exp 两个声明
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    let payload = URL_SAFE_NO_PAD.decode(segments[1]).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
    let object = json.as_object().unwrap();

    assert_eq!(object.len(), 2);
    assert_eq!(object["sub"], "alice");
    assert!(object["exp"].is_i64());
}

#[test]
fn test_default_ttl_comes_from_config() {
    let service = service();
    let token = service.issue("alice").unwrap();
    let claims = service.validate_token(&token).unwrap();

    // 测试配置的有效期为 5 分钟
    let expected = Utc::now().timestamp() + 5 * 60;
    assert!((claims.exp - expected).abs() <= 2);
    assert_eq!(service.expires_in_secs(), 5 * 60);
}

#[test]
fn test_elapsed_ttl_is_rejected() {
    let service = service();

    let token = service
        .issue_with_ttl("alice", Duration::seconds(-1))
        .unwrap();
    assert!(service.validate_token(&token).is_err());
}

#[test]
fn test_exp_at_current_second_is_expired() {
    let service = service();

    // 严格要求 now < exp，到期瞬间即失效
    let token = service.issue_with_ttl("alice", Duration::zero()).unwrap();
    assert!(service.validate_token(&token).is_err());
}

#[test]
fn test_foreign_secret_is_rejected() {
    let issuer = service();

    let mut other_config = create_test_config();
    other_config.security.jwt_secret =
        secrecy::Secret::new("a-completely-different-secret-32-chars!".to_string());
    let verifier = JwtService::from_config(&other_config).unwrap();

    let token = issuer.issue("alice").unwrap();
    assert!(verifier.validate_token(&token).is_err());
}

#[test]
fn test_tampered_payload_is_rejected() {
    let service = service();
    let token = service.issue("alice").unwrap();

    // 篡改载荷段中的一个字符
    let mut segments: Vec<String> = token.split('.').map(|s| s.to_string()).collect();
    let mut payload = segments[1].clone().into_bytes();
    payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
    segments[1] = String::from_utf8(payload).unwrap();
    let tampered = segments.join(".");

    assert!(service.validate_token(&tampered).is_err());
}

#[test]
fn test_oversized_token_rejected_before_decode() {
    let service = service();

    let oversized = "x".repeat(MAX_TOKEN_LEN + 1);
    assert!(service.validate_token(&oversized).is_err());
    assert!(service.validate_token("").is_err());
}
