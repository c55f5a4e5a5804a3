use std::fmt;

/// API key / secret pair resolved for one exchange.
///
/// Empty fields mean "not configured"; they are not an error on their own.
/// `Default` gives the zero-value record.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    pub api_key: String,
    pub secret_key: String,
}

impl CredentialRecord {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Neither field is set
    pub fn is_empty(&self) -> bool {
        self.api_key.is_empty() && self.secret_key.is_empty()
    }

    /// Both fields are set
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.secret_key.is_empty()
    }

    /// Create API key preview (last 4 characters)
    pub fn api_key_preview(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        let len = chars.len();
        if len <= 4 {
            "*".repeat(len)
        } else {
            let tail: String = chars[len - 4..].iter().collect();
            format!("{}...{}", "*".repeat(4), tail)
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.secret_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("CredentialRecord")
            .field("api_key", &self.api_key_preview())
            .field("secret_key", &secret)
            .finish()
    }
}

/// Exchange name as supplied by the caller.
///
/// Not validated against any list of known exchanges. Only the derived keys
/// are case-folded, so `"Kraken"` and `"KRAKEN"` map to the same sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeId<'a>(&'a str);

impl<'a> ExchangeId<'a> {
    pub fn new(name: &'a str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Upper-cased form used in environment variable names
    pub fn env_key(&self) -> String {
        self.0.to_uppercase()
    }

    /// Lower-cased form used in secrets file names
    pub fn file_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl<'a> From<&'a str> for ExchangeId<'a> {
    fn from(name: &'a str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ExchangeId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_masks_short_keys() {
        assert_eq!(CredentialRecord::new("abc", "").api_key_preview(), "***");
        assert_eq!(CredentialRecord::new("", "").api_key_preview(), "");
    }

    #[test]
    fn test_preview_keeps_last_four() {
        let record = CredentialRecord::new("my-test-api-key-12345", "secret");
        assert_eq!(record.api_key_preview(), "****...2345");
    }

    #[test]
    fn test_debug_never_prints_secret() {
        let record = CredentialRecord::new("my-test-api-key-12345", "my-secret-value-xyz");
        let debug = format!("{:?}", record);

        assert!(!debug.contains("my-secret-value-xyz"));
        assert!(!debug.contains("my-test-api-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_empty_and_complete() {
        assert!(CredentialRecord::default().is_empty());
        assert!(!CredentialRecord::default().is_complete());

        let partial = CredentialRecord::new("key", "");
        assert!(!partial.is_empty());
        assert!(!partial.is_complete());

        assert!(CredentialRecord::new("key", "secret").is_complete());
    }

    #[test]
    fn test_exchange_keys_are_case_folded() {
        for name in ["Kraken", "KRAKEN", "kraken"] {
            let id = ExchangeId::new(name);
            assert_eq!(id.env_key(), "KRAKEN");
            assert_eq!(id.file_key(), "kraken");
        }
    }

    #[test]
    fn test_exchange_keys_keep_punctuation() {
        let id = ExchangeId::from("BalancerV2-Arbitrum");
        assert_eq!(id.env_key(), "BALANCERV2-ARBITRUM");
        assert_eq!(id.file_key(), "balancerv2-arbitrum");
        assert_eq!(id.to_string(), "BalancerV2-Arbitrum");
    }
}
