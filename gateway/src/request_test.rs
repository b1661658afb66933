use super::*;
use serde_json::json;

#[test]
fn with_bearer_overwrites_existing_authorization() {
    let request = ApiRequest::get("http://localhost/api/nas/nas/")
        .header(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
    let authed = request.with_bearer("abc").unwrap();

    assert_eq!(authed.authorization(), Some("Bearer abc"));
    assert_eq!(authed.headers.get_all(AUTHORIZATION).iter().count(), 1);
    // Original request is untouched so it can be replayed with another token.
    assert_eq!(request.authorization(), Some("Basic Zm9vOmJhcg=="));
}

#[test]
fn with_bearer_rejects_control_characters() {
    let err = ApiRequest::get("http://localhost").with_bearer("bad\ntoken").unwrap_err();
    assert!(matches!(err, GatewayError::InvalidHeader(_)));
}

#[test]
fn query_and_json_builders() {
    let request = ApiRequest::post("http://localhost/api/nas/groups/")
        .query("page", 2)
        .query("page_size", 25)
        .json(&json!({ "name": "core" }))
        .unwrap();

    assert_eq!(request.method, Method::POST);
    assert_eq!(
        request.query,
        vec![("page".to_owned(), "2".to_owned()), ("page_size".to_owned(), "25".to_owned())]
    );
    assert_eq!(request.body, Some(json!({ "name": "core" })));
}

#[test]
fn into_result_maps_statuses() {
    assert!(ApiResponse::new(204, "").into_result().is_ok());
    assert!(matches!(
        ApiResponse::new(401, "expired").into_result(),
        Err(GatewayError::Unauthorized { body }) if body == "expired"
    ));
    assert!(matches!(
        ApiResponse::new(403, "forbidden").into_result(),
        Err(GatewayError::Http { status: 403, .. })
    ));
}

#[test]
fn json_decodes_body() {
    #[derive(serde::Deserialize)]
    struct Tokens {
        access: String,
    }
    let response = ApiResponse::new(200, r#"{"access":"fresh-123"}"#);
    let tokens: Tokens = response.json().unwrap();
    assert_eq!(tokens.access, "fresh-123");

    let bad = ApiResponse::new(200, "<html>");
    assert!(matches!(bad.json::<Tokens>(), Err(GatewayError::Decode(_))));
}
