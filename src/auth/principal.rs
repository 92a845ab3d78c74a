use std::collections::HashMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Login identity, seeded at startup and immutable afterwards. Distinct
/// from the `users` CRUD resource, which carries no credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Read-only lookup table of principals, safe for concurrent reads.
pub struct CredentialStore {
    principals: HashMap<String, Principal>,
}

impl CredentialStore {
    /// Read the JSON seed file (an array of principals) at process start.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read principals file {path}"))?;
        let list: Vec<Principal> =
            serde_json::from_str(&raw).with_context(|| format!("parse principals file {path}"))?;
        Ok(Self::from_principals(list))
    }

    pub fn from_principals(list: Vec<Principal>) -> Self {
        let principals = list
            .into_iter()
            .map(|p| (p.username.clone(), p))
            .collect();
        Self { principals }
    }

    pub fn lookup(&self, username: &str) -> Option<&Principal> {
        self.principals.get(username)
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn test_principal(username: &str, password_hash: &str) -> Principal {
    Principal {
        username: username.into(),
        full_name: "John Doe".into(),
        email: format!("{username}@example.com"),
        password_hash: password_hash.into(),
        disabled: false,
        is_active: true,
        is_superuser: false,
    }
}
