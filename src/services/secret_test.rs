use gateway::Method;
use serde_json::json;

use super::*;
use crate::services::test_helpers::{only_request, replying, url};

const SECRET: &str = r#"{"id":2,"name":"core","secret":"s3cr3t","rad_sec":false,"source_subnets":["10.0.0.0/8"]}"#;

#[tokio::test]
async fn create_omits_unset_fields() {
    let (transport, gw) = replying(201, SECRET);
    let input = SecretCreate {
        name: "core".into(),
        secret: "s3cr3t".into(),
        rad_sec: None,
        description: None,
        source_subnets: vec!["10.0.0.0/8".into()],
    };

    let created = SecretService::new(&gw).create(&input).await.unwrap();
    assert_eq!(created.source_subnets, vec!["10.0.0.0/8"]);

    let request = only_request(&transport);
    assert_eq!(request.url, url("/radius/secrets"));
    assert_eq!(
        request.body,
        Some(json!({ "name": "core", "secret": "s3cr3t", "source_subnets": ["10.0.0.0/8"] }))
    );
}

#[tokio::test]
async fn encrypt_posts_empty_object() {
    let (transport, gw) = replying(200, SECRET);
    SecretService::new(&gw).encrypt(2).await.unwrap();

    let request = only_request(&transport);
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, url("/radius/secrets/2/encrypt"));
    assert_eq!(request.body, Some(json!({})));
}

#[tokio::test]
async fn update_patches_only_given_fields() {
    let (transport, gw) = replying(200, SECRET);
    let input = SecretUpdate { rad_sec: Some(true), ..SecretUpdate::default() };
    SecretService::new(&gw).update(2, &input).await.unwrap();

    let request = only_request(&transport);
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.body, Some(json!({ "rad_sec": true })));
}

#[tokio::test]
async fn malformed_record_is_a_decode_error() {
    let (_, gw) = replying(200, r#"{"id":"two"}"#);
    let err = SecretService::new(&gw).get(2).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Gateway(gateway::GatewayError::Decode(_))));
}
