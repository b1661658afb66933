use super::*;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers must hold `ENV_LOCK` so no other test touches the environment.
unsafe fn clear_console_env() {
    unsafe {
        std::env::remove_var("RADIUS_CONSOLE_API_URL");
        std::env::remove_var("RADIUS_CONSOLE_AUTH_ENDPOINTS");
        std::env::remove_var("RADIUS_CONSOLE_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("RADIUS_CONSOLE_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn new_trims_trailing_slash() {
    let cfg = GatewayConfig::new("https://radius.example/api/");
    assert_eq!(cfg.api_url, "https://radius.example/api");
    assert_eq!(cfg.login_url(), "https://radius.example/api/auth/token/");
    assert_eq!(cfg.refresh_url(), "https://radius.example/api/auth/token/refresh/");
}

#[test]
fn login_and_refresh_urls_are_auth_endpoints() {
    let cfg = GatewayConfig::new("http://api.test/api");
    assert_eq!(cfg.login_url(), "http://api.test/api/auth/token/");
    assert_eq!(cfg.refresh_url(), "http://api.test/api/auth/token/refresh/");
    assert!(cfg.is_auth_endpoint(&cfg.login_url()));
    assert!(cfg.is_auth_endpoint(&cfg.refresh_url()));
}

#[test]
fn endpoint_joins_relative_and_keeps_absolute() {
    let cfg = GatewayConfig::new("http://localhost/api");
    assert_eq!(cfg.endpoint("/nas/nas/"), "http://localhost/api/nas/nas/");
    assert_eq!(cfg.endpoint("nas/groups/"), "http://localhost/api/nas/groups/");
    assert_eq!(cfg.endpoint("https://other.example/x"), "https://other.example/x");
}

#[test]
fn auth_allowlist_matches_substrings() {
    let cfg = GatewayConfig::new("http://localhost/api");
    assert!(cfg.is_auth_endpoint("http://localhost/api/auth/token/"));
    assert!(cfg.is_auth_endpoint("http://localhost/api/auth/token/refresh/"));
    assert!(cfg.is_auth_endpoint("http://localhost/api/authentication/token/refresh/"));
    assert!(cfg.is_auth_endpoint("http://localhost/api/admin-users/login/"));
    assert!(!cfg.is_auth_endpoint("http://localhost/api/nas/nas/"));
    assert!(!cfg.is_auth_endpoint("http://localhost/api/admin-users/me/"));
}

#[test]
fn empty_allowlist_entry_never_matches() {
    let mut cfg = GatewayConfig::new("http://localhost/api");
    cfg.auth_endpoints = vec![String::new()];
    assert!(!cfg.is_auth_endpoint("http://localhost/api/nas/nas/"));
}

#[test]
fn profile_url_is_optional() {
    let mut cfg = GatewayConfig::new("http://localhost/api");
    assert_eq!(cfg.profile_url().as_deref(), Some("http://localhost/api/admin-users/me/"));
    cfg.profile_path = None;
    assert_eq!(cfg.profile_url(), None);
}

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_console_env() };

    let cfg = GatewayConfig::from_env();
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.auth_endpoints.len(), DEFAULT_AUTH_ENDPOINTS.len());
    assert_eq!(cfg.timeouts, HttpTimeouts::default());
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_console_env();
        std::env::set_var("RADIUS_CONSOLE_API_URL", "https://radius.example/api/");
        std::env::set_var("RADIUS_CONSOLE_AUTH_ENDPOINTS", " /login/ , ,/token/refresh/ ");
        std::env::set_var("RADIUS_CONSOLE_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("RADIUS_CONSOLE_CONNECT_TIMEOUT_SECS", "not-a-number");
    }

    let cfg = GatewayConfig::from_env();
    assert_eq!(cfg.api_url, "https://radius.example/api");
    assert_eq!(cfg.auth_endpoints, vec!["/login/".to_owned(), "/token/refresh/".to_owned()]);
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 5, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS });

    unsafe { clear_console_env() };
}
