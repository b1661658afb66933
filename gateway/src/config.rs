//! Gateway configuration parsed from environment variables.
//!
//! The auth-endpoint allowlist is configuration rather than code: any request
//! whose URL contains one of its entries bypasses bearer attachment and the
//! refresh path entirely.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_AUTH_ENDPOINTS: &[&str] = &["/auth/token/", "/authentication/token/", "/admin-users/login/"];
pub const DEFAULT_LOGIN_PATH: &str = "/auth/token/";
pub const DEFAULT_REFRESH_PATH: &str = "/auth/token/refresh/";
pub const DEFAULT_PROFILE_PATH: &str = "/admin-users/me/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// API root without a trailing slash, e.g. `https://radius.example/api`.
    pub api_url: String,
    /// URL substrings identifying authentication endpoints.
    pub auth_endpoints: Vec<String>,
    pub login_path: String,
    pub refresh_path: String,
    /// Identity lookup issued after login; `None` keeps the email-only snapshot.
    pub profile_path: Option<String>,
    pub timeouts: HttpTimeouts,
}

impl GatewayConfig {
    /// Config for `api_url` with every other setting at its default.
    #[must_use]
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            auth_endpoints: DEFAULT_AUTH_ENDPOINTS.iter().map(|s| (*s).to_owned()).collect(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            refresh_path: DEFAULT_REFRESH_PATH.to_owned(),
            profile_path: Some(DEFAULT_PROFILE_PATH.to_owned()),
            timeouts: HttpTimeouts::default(),
        }
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `RADIUS_CONSOLE_API_URL`: default `http://127.0.0.1:8000/api`
    /// - `RADIUS_CONSOLE_AUTH_ENDPOINTS`: comma-separated URL substrings
    /// - `RADIUS_CONSOLE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `RADIUS_CONSOLE_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = env_string("RADIUS_CONSOLE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let mut config = Self::new(&api_url);
        if let Some(raw) = env_string("RADIUS_CONSOLE_AUTH_ENDPOINTS") {
            config.auth_endpoints = parse_endpoint_list(&raw);
        }
        config.timeouts = HttpTimeouts {
            request_secs: env_parse("RADIUS_CONSOLE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("RADIUS_CONSOLE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        config
    }

    /// Absolute URL for an API path (`"/nas/nas/"` -> `"{api_url}/nas/nas/"`).
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.api_url)
        } else {
            format!("{}/{path}", self.api_url)
        }
    }

    #[must_use]
    pub fn is_auth_endpoint(&self, url: &str) -> bool {
        self.auth_endpoints
            .iter()
            .any(|endpoint| !endpoint.is_empty() && url.contains(endpoint.as_str()))
    }

    #[must_use]
    pub fn login_url(&self) -> String {
        self.endpoint(&self.login_path)
    }

    #[must_use]
    pub fn refresh_url(&self) -> String {
        self.endpoint(&self.refresh_path)
    }

    #[must_use]
    pub fn profile_url(&self) -> Option<String> {
        self.profile_path.as_deref().map(|path| self.endpoint(path))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn parse_endpoint_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn env_string(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
