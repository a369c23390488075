use std::collections::HashMap;

/// Header carrying the hex-encoded Ed25519 signature of an interaction
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Header carrying the timestamp that prefixes the signed payload
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Header that triggers the global command registration path
pub const MODIFY_COMMANDS_HEADER: &str = "modify-global-commands";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Missing required header: {0}")]
pub struct MissingHeader(pub String);

/// Read-only, case-insensitive view over inbound request headers
///
/// Names are normalized to lowercase on construction. When a header appears
/// more than once, the first value wins.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    entries: HashMap<String, String>,
}

impl Headers {
    /// Look up a header value by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Look up a header that must be present
    pub fn require(&self, name: &str) -> Result<&str, MissingHeader> {
        self.get(name)
            .ok_or_else(|| MissingHeader(name.to_ascii_lowercase()))
    }

    /// Whether the header is present with a non-empty value
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = HashMap::new();
        for (name, value) in iter {
            entries
                .entry(name.as_ref().to_ascii_lowercase())
                .or_insert_with(|| value.into());
        }
        Self { entries }
    }
}

/// Headers whose values are not valid UTF-8 are dropped.
impl From<&axum::http::HeaderMap> for Headers {
    fn from(map: &axum::http::HeaderMap) -> Self {
        map.iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str(), value.to_string()))
            })
            .collect()
    }
}
