use std::path::PathBuf;

use serde::Deserialize;

use crate::resolver::env_source::{EnvSource, ProcessEnv};

/// Setting that switches credential lookup to environment variables.
pub const USE_ENV_VAR: &str = "USE_ENV";

/// Which source a resolver reads credentials from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    Environment,
    File,
}

/// Resolver configuration
///
/// Defaults to file mode with the home directory looked up from the OS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Read `API_<NAME>_APIKEY` / `API_<NAME>_SECRETKEY` instead of secrets files
    pub use_environment_credentials: bool,
    /// Overrides the home directory that secrets files live under
    pub home_dir: Option<PathBuf>,
    /// Use an empty path prefix when the home directory cannot be determined,
    /// instead of failing with `HomeDirectoryUnavailable`
    pub legacy_empty_home_prefix: bool,
}

impl ResolverConfig {
    /// Build a config from the `USE_ENV` process environment variable
    pub fn from_env() -> Self {
        Self::from_env_source(&ProcessEnv)
    }

    /// Build a config from `USE_ENV` as seen by `env`.
    ///
    /// Only the exact, case-sensitive value `"true"` enables environment mode.
    pub fn from_env_source(env: &dyn EnvSource) -> Self {
        let use_env = env.var(USE_ENV_VAR).as_deref() == Some("true");
        Self::default().with_environment_credentials(use_env)
    }

    pub fn with_environment_credentials(mut self, enabled: bool) -> Self {
        self.use_environment_credentials = enabled;
        self
    }

    pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    pub fn with_legacy_empty_home_prefix(mut self, enabled: bool) -> Self {
        self.legacy_empty_home_prefix = enabled;
        self
    }

    pub fn mode(&self) -> ResolutionMode {
        if self.use_environment_credentials {
            ResolutionMode::Environment
        } else {
            ResolutionMode::File
        }
    }
}
