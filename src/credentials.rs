use std::fmt;

/// The API key used to authenticate against the PostNL APIs.
///
/// Sent as the `apikey` header for REST requests and as the password of the WS-Security
/// username token for SOAP requests. The key never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    key: String,
}

impl ApiKey {
    /// Creates a new `ApiKey`.
    pub fn new(key: impl Into<String>) -> ApiKey {
        ApiKey { key: key.into() }
    }

    /// Returns the key in plain text.
    pub fn expose(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        ApiKey::new(key)
    }
}
