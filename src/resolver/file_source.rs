use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{CredentialError, Result};
use crate::models::{CredentialRecord, ExchangeId};

const SECRETS_DIR: [&str; 2] = ["config", "secrets"];
const FILE_PREFIX: &str = "api_";

/// `<home>/config/secrets/api_<exchange-lowercase>`
pub fn secrets_path(home: &Path, exchange: ExchangeId<'_>) -> PathBuf {
    let mut path = home.to_path_buf();
    for segment in SECRETS_DIR {
        path.push(segment);
    }
    path.push(format!("{}{}", FILE_PREFIX, exchange.file_key()));
    path
}

/// Read and parse a secrets file
pub fn read_credentials(path: &Path) -> Result<CredentialRecord> {
    let content = fs::read_to_string(path)
        .map_err(|e| CredentialError::source_unavailable(path, format!("Failed to read file: {}", e)))?;

    parse_secrets(&content).map_err(|reason| CredentialError::source_unavailable(path, reason))
}

/// Parse secrets file content.
///
/// A JSON object (`{"ApiKey": "...", "SecretKey": "..."}`) or dotenv-style
/// `Key=value` lines. Field names match regardless of case and underscores.
pub fn parse_secrets(content: &str) -> std::result::Result<CredentialRecord, String> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Err("File is empty".to_string());
    }

    if trimmed.starts_with('{') {
        parse_json(trimmed)
    } else {
        parse_key_values(content)
    }
}

fn parse_json(content: &str) -> std::result::Result<CredentialRecord, String> {
    let fields: Map<String, Value> =
        serde_json::from_str(content).map_err(|e| format!("Invalid JSON: {}", e))?;

    let mut record = CredentialRecord::default();
    for (key, value) in fields {
        let value = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => {
                if is_credential_field(&key) {
                    return Err(format!("Invalid JSON: field '{}' must be a string, got {}", key, other));
                }
                continue;
            }
        };
        record.set_field(&key, value);
    }

    Ok(record)
}

fn parse_key_values(content: &str) -> std::result::Result<CredentialRecord, String> {
    let mut record = CredentialRecord::default();
    let mut entries = 0;

    for item in dotenvy::from_read_iter(content.as_bytes()) {
        let (key, value) = item.map_err(|e| format!("Invalid Key=value content: {}", e))?;
        entries += 1;
        record.set_field(&key, value);
    }

    if entries == 0 {
        return Err("No Key=value entries found".to_string());
    }

    Ok(record)
}

// ApiKey, APIKEY and api_key all name the same field
fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_credential_field(key: &str) -> bool {
    matches!(normalize_key(key).as_str(), "apikey" | "secretkey")
}

impl CredentialRecord {
    fn set_field(&mut self, key: &str, value: String) {
        match normalize_key(key).as_str() {
            "apikey" => self.api_key = value,
            "secretkey" => self.secret_key = value,
            _ => {}
        }
    }
}
