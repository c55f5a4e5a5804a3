use std::collections::HashMap;
use std::env::{self, VarError};

use crate::models::{CredentialRecord, ExchangeId};

const ENV_PREFIX: &str = "API_";
const API_KEY_SUFFIX: &str = "_APIKEY";
const SECRET_KEY_SUFFIX: &str = "_SECRETKEY";

/// Read-only view of environment variables
pub trait EnvSource: Send + Sync {
    /// Value of `key`, or `None` when unset
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                log::warn!("Environment variable {} is not valid unicode, ignoring it", key);
                None
            }
        }
    }
}

/// In-memory environment, for embedding callers and tests
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

impl FromIterator<(String, String)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Names of the API key and secret key variables for `exchange`
pub fn env_var_names(exchange: ExchangeId<'_>) -> (String, String) {
    let name = exchange.env_key();
    (
        format!("{}{}{}", ENV_PREFIX, name, API_KEY_SUFFIX),
        format!("{}{}{}", ENV_PREFIX, name, SECRET_KEY_SUFFIX),
    )
}

/// Read both credential variables; unset ones become empty strings
pub(crate) fn read_credentials(env: &dyn EnvSource, exchange: ExchangeId<'_>) -> CredentialRecord {
    let (api_key_var, secret_key_var) = env_var_names(exchange);

    let api_key = env.var(&api_key_var).unwrap_or_default();
    let secret_key = env.var(&secret_key_var).unwrap_or_default();

    if api_key.is_empty() {
        log::debug!("{} is not set", api_key_var);
    }
    if secret_key.is_empty() {
        log::debug!("{} is not set", secret_key_var);
    }

    CredentialRecord { api_key, secret_key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_names() {
        let (api, secret) = env_var_names(ExchangeId::new("kraken"));
        assert_eq!(api, "API_KRAKEN_APIKEY");
        assert_eq!(secret, "API_KRAKEN_SECRETKEY");
    }

    #[test]
    fn test_env_var_names_ignore_case() {
        assert_eq!(
            env_var_names(ExchangeId::new("Kraken")),
            env_var_names(ExchangeId::new("KRAKEN"))
        );
    }

    #[test]
    fn test_empty_exchange_still_builds_names() {
        let (api, secret) = env_var_names(ExchangeId::new(""));
        assert_eq!(api, "API__APIKEY");
        assert_eq!(secret, "API__SECRETKEY");
    }

    #[test]
    fn test_read_credentials() {
        let env = MapEnv::new()
            .with("API_BINANCE_APIKEY", "binance-key")
            .with("API_BINANCE_SECRETKEY", "binance-secret");

        let record = read_credentials(&env, ExchangeId::new("Binance"));
        assert_eq!(record, CredentialRecord::new("binance-key", "binance-secret"));
    }

    #[test]
    fn test_missing_variables_become_empty() {
        let env = MapEnv::new().with("API_BITGET_APIKEY", "only-key");

        let record = read_credentials(&env, ExchangeId::new("bitget"));
        assert_eq!(record.api_key, "only-key");
        assert_eq!(record.secret_key, "");

        let record = read_credentials(&env, ExchangeId::new("kucoin"));
        assert!(record.is_empty());
    }

    #[test]
    fn test_map_env_from_iter() {
        let env: MapEnv = vec![("A".to_string(), "1".to_string())].into_iter().collect();
        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert_eq!(env.var("B"), None);
    }

    #[test]
    fn test_process_env() {
        temp_env::with_var("API_TESTEX_APIKEY", Some("process-key"), || {
            assert_eq!(ProcessEnv.var("API_TESTEX_APIKEY").as_deref(), Some("process-key"));
        });
        temp_env::with_var("API_TESTEX_APIKEY", None::<&str>, || {
            assert_eq!(ProcessEnv.var("API_TESTEX_APIKEY"), None);
        });
    }
}
