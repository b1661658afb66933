use super::*;

#[test]
fn status_reports_response_codes() {
    let unauthorized = GatewayError::Unauthorized { body: String::new() };
    let not_found = GatewayError::Http { status: 404, body: "missing".into() };
    let transport = GatewayError::Transport(TransportError("connection refused".into()));

    assert_eq!(unauthorized.status(), Some(401));
    assert_eq!(not_found.status(), Some(404));
    assert_eq!(transport.status(), None);
}

#[test]
fn only_authentication_failures_require_reauthentication() {
    assert!(GatewayError::AuthenticationFailed("expired".into()).requires_reauthentication());
    assert!(!GatewayError::Unauthorized { body: String::new() }.requires_reauthentication());
    assert!(!GatewayError::Http { status: 500, body: String::new() }.requires_reauthentication());
}

#[test]
fn display_includes_status_and_body() {
    let err = GatewayError::Http { status: 409, body: "duplicate name".into() };
    assert_eq!(err.to_string(), "http status 409: duplicate name");
}

#[test]
fn storage_error_is_transparent() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = GatewayError::from(StoreError::from(io));
    assert!(err.to_string().starts_with("session store io failed"));
}
