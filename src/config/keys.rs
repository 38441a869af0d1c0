//! API keys sourced from the process environment
//!
//! Keys are read once and never change for the lifetime of the process.
//! A missing variable yields an empty key rather than an error; callers that
//! actually need a key check [`ApiKeys::openai_configured`] and friends.

use std::sync::OnceLock;

static KEYS: OnceLock<ApiKeys> = OnceLock::new();

/// Mapping-service key, with the bundler-prefixed name as a fallback
const MAPS_KEY_VARS: [&str; 2] = ["GOOGLE_MAPS_API_KEY", "VITE_GOOGLE_MAPS_API_KEY"];

/// Image-generation key, with the bundler-prefixed name as a fallback
const OPENAI_KEY_VARS: [&str; 2] = ["OPENAI_API_KEY", "VITE_OPENAI_API_KEY"];

/// Immutable process-wide secrets
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    maps_api_key: String,
    openai_api_key: String,
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("maps_api_key", &redact(&self.maps_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .finish()
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl ApiKeys {
    /// Read keys from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build keys from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| lookup(name).filter(|v| !v.is_empty()))
                .unwrap_or_default()
        };

        Self {
            maps_api_key: first(&MAPS_KEY_VARS),
            openai_api_key: first(&OPENAI_KEY_VARS),
        }
    }

    /// Install the process-wide keys. Returns false if keys were already set.
    pub fn init(keys: ApiKeys) -> bool {
        KEYS.set(keys).is_ok()
    }

    /// Process-wide keys, read from the environment on first use
    pub fn global() -> &'static ApiKeys {
        KEYS.get_or_init(ApiKeys::from_env)
    }

    /// Mapping-service API key (empty when unset)
    pub fn maps_api_key(&self) -> &str {
        &self.maps_api_key
    }

    /// Image-generation API key (empty when unset)
    pub fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }

    /// Whether a mapping-service key is available
    pub fn maps_configured(&self) -> bool {
        !self.maps_api_key.is_empty()
    }

    /// Whether an image-generation key is available
    pub fn openai_configured(&self) -> bool {
        !self.openai_api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let keys = ApiKeys::from_lookup(lookup(&[]));
        assert_eq!(keys.maps_api_key(), "");
        assert!(!keys.maps_configured());
        assert!(!keys.openai_configured());
    }

    #[test]
    fn test_prefixed_fallback() {
        let keys = ApiKeys::from_lookup(lookup(&[("VITE_GOOGLE_MAPS_API_KEY", "maps-123")]));
        assert_eq!(keys.maps_api_key(), "maps-123");
    }

    #[test]
    fn test_plain_name_wins() {
        let keys = ApiKeys::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "primary"),
            ("VITE_OPENAI_API_KEY", "secondary"),
        ]));
        assert_eq!(keys.openai_api_key(), "primary");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let keys = ApiKeys::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-secret")]));
        let rendered = format!("{:?}", keys);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
