//! Store configuration loaded from environment variables.
//!
//! The backend choice is made once at process start: if a remote key-value
//! REST URL is configured the remote backend is used exclusively, otherwise
//! state is persisted to a fixed relative file path. Both credential
//! variables accept two naming aliases.
//!
//! | Env var | Alias | Meaning |
//! |---------|-------|---------|
//! | `KV_REST_API_URL`   | `UPSTASH_REDIS_REST_URL`   | remote KV REST base URL |
//! | `KV_REST_API_TOKEN` | `UPSTASH_REDIS_REST_TOKEN` | remote KV bearer token  |

/// Accepted names for the remote KV REST URL, in precedence order.
pub const KV_URL_VARS: [&str; 2] = ["KV_REST_API_URL", "UPSTASH_REDIS_REST_URL"];

/// Accepted names for the remote KV bearer token, in precedence order.
pub const KV_TOKEN_VARS: [&str; 2] = ["KV_REST_API_TOKEN", "UPSTASH_REDIS_REST_TOKEN"];

/// Remote key-value credentials resolved from the environment.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Remote KV REST base URL, when configured.
    pub kv_url: Option<String>,
    /// Remote KV bearer token, when configured.
    pub kv_token: Option<String>,
}

impl StoreConfig {
    /// Load the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    ///
    /// The first alias that resolves to a non-empty string wins. Empty
    /// strings count as unset, so `KV_REST_API_URL=""` does not select
    /// the remote backend.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            kv_url: first_non_empty(&KV_URL_VARS, &lookup),
            kv_token: first_non_empty(&KV_TOKEN_VARS, &lookup),
        }
    }

    /// Whether the remote backend should be selected.
    ///
    /// Per the interface contract this depends on the URL alone; a missing
    /// token merely means every remote request will fail and be swallowed.
    pub fn remote_configured(&self) -> bool {
        self.kv_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

fn first_non_empty(
    names: &[&str],
    lookup: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    names
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn unset_environment_yields_no_remote() {
        let config = StoreConfig::from_lookup(|_| None);
        assert!(config.kv_url.is_none());
        assert!(config.kv_token.is_none());
        assert!(!config.remote_configured());
    }

    #[test]
    fn primary_name_wins_over_alias() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("KV_REST_API_URL", "https://primary.example"),
            ("UPSTASH_REDIS_REST_URL", "https://alias.example"),
        ]));
        assert_eq!(config.kv_url.as_deref(), Some("https://primary.example"));
        assert!(config.remote_configured());
    }

    #[test]
    fn alias_is_accepted_when_primary_missing() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("UPSTASH_REDIS_REST_URL", "https://alias.example"),
            ("UPSTASH_REDIS_REST_TOKEN", "secret"),
        ]));
        assert_eq!(config.kv_url.as_deref(), Some("https://alias.example"));
        assert_eq!(config.kv_token.as_deref(), Some("secret"));
    }

    #[test]
    fn empty_url_counts_as_unset() {
        let config = StoreConfig::from_lookup(lookup_from(&[("KV_REST_API_URL", "")]));
        assert!(!config.remote_configured());
    }
}
