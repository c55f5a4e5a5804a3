//! Resolve exchange API credentials from environment variables or
//! per-exchange secrets files.

pub mod config;
pub mod error;
pub mod models;
pub mod resolver;

pub use config::{ResolutionMode, ResolverConfig, USE_ENV_VAR};
pub use error::{CredentialError, Result};
pub use models::{CredentialRecord, ExchangeId};
pub use resolver::env_source::{EnvSource, MapEnv, ProcessEnv};
pub use resolver::{resolve_credentials, resolve_credentials_from_env, CredentialResolver};
