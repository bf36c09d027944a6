/// Production portal base URL.
pub const DEFAULT_BASE_URL: &str = "https://mina-sidor.tekniskaverken.se";

/// Connection settings for the customer portal.
///
/// `base_url` is overridable so tests can point the client at a mock server.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Disables TLS certificate verification for every request. Off by
    /// default; only enabled through the explicit CLI flag.
    pub danger_accept_invalid_certs: bool,
}

impl PortalConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: username.into(),
            password: password.into(),
            danger_accept_invalid_certs: false,
        }
    }
}
