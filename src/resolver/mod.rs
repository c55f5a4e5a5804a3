//! Exchange credential resolution
//!
//! A [`CredentialResolver`] reads the API key / secret pair for an exchange
//! from exactly one of two sources, chosen by [`ResolverConfig`]:
//! - Environment mode: `API_<NAME>_APIKEY` and `API_<NAME>_SECRETKEY`
//! - File mode: `<home>/config/secrets/api_<name>`

pub mod env_source;
pub mod file_source;

use std::path::PathBuf;

use crate::config::{ResolutionMode, ResolverConfig};
use crate::error::{CredentialError, Result};
use crate::models::{CredentialRecord, ExchangeId};

use env_source::{EnvSource, ProcessEnv};

type HomeLookup = fn() -> Option<PathBuf>;

pub struct CredentialResolver {
    config: ResolverConfig,
    env: Box<dyn EnvSource>,
    home_lookup: HomeLookup,
}

impl CredentialResolver {
    /// Create a resolver that reads the process environment
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_env(config, ProcessEnv)
    }

    /// Create a resolver that reads variables from a custom source
    pub fn with_env(config: ResolverConfig, env: impl EnvSource + 'static) -> Self {
        Self {
            config,
            env: Box::new(env),
            home_lookup: dirs::home_dir,
        }
    }

    /// Create a resolver whose mode comes from the `USE_ENV` process variable
    pub fn from_process_env() -> Self {
        Self::new(ResolverConfig::from_env())
    }

    #[cfg(test)]
    pub(crate) fn with_home_lookup(mut self, lookup: HomeLookup) -> Self {
        self.home_lookup = lookup;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn mode(&self) -> ResolutionMode {
        self.config.mode()
    }

    /// Resolve credentials for `exchange` from the configured source
    pub fn resolve(&self, exchange: &str) -> Result<CredentialRecord> {
        match self.mode() {
            ResolutionMode::Environment => self.resolve_from_env(exchange),
            ResolutionMode::File => self.resolve_from_file(exchange),
        }
    }

    /// Resolve credentials from environment variables.
    ///
    /// Fails with `ModeMismatch` unless the resolver is in environment mode.
    /// Unset variables resolve to empty strings.
    pub fn resolve_from_env(&self, exchange: &str) -> Result<CredentialRecord> {
        if self.mode() != ResolutionMode::Environment {
            return Err(CredentialError::ModeMismatch {
                exchange: exchange.to_string(),
            });
        }

        let exchange = ExchangeId::new(exchange);
        log::debug!("Resolving credentials for '{}' from environment", exchange);
        Ok(env_source::read_credentials(self.env.as_ref(), exchange))
    }

    /// Resolve credentials from the exchange's secrets file
    pub fn resolve_from_file(&self, exchange: &str) -> Result<CredentialRecord> {
        let path = self.secrets_path(exchange)?;
        log::debug!("Resolving credentials for '{}' from {}", exchange, path.display());
        file_source::read_credentials(&path)
    }

    /// Secrets file path for `exchange`
    pub fn secrets_path(&self, exchange: &str) -> Result<PathBuf> {
        let home = self.home_dir()?;
        Ok(file_source::secrets_path(&home, ExchangeId::new(exchange)))
    }

    /// Names of the API key and secret key variables for `exchange`
    pub fn env_var_names(&self, exchange: &str) -> (String, String) {
        env_source::env_var_names(ExchangeId::new(exchange))
    }

    fn home_dir(&self) -> Result<PathBuf> {
        if let Some(home) = &self.config.home_dir {
            return Ok(home.clone());
        }

        match (self.home_lookup)() {
            Some(home) => Ok(home),
            None if self.config.legacy_empty_home_prefix => {
                log::warn!("Home directory unavailable, looking for secrets under /config/secrets");
                Ok(PathBuf::from("/"))
            }
            None => Err(CredentialError::HomeDirectoryUnavailable),
        }
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

/// Resolve credentials for `exchange`, choosing the source from `USE_ENV`.
///
/// `USE_ENV` is read on every call.
pub fn resolve_credentials(exchange: &str) -> Result<CredentialRecord> {
    CredentialResolver::from_process_env().resolve(exchange)
}

/// Resolve credentials for `exchange` from the process environment.
///
/// Fails with `ModeMismatch` unless `USE_ENV` is exactly `"true"`.
pub fn resolve_credentials_from_env(exchange: &str) -> Result<CredentialRecord> {
    CredentialResolver::from_process_env().resolve_from_env(exchange)
}
