//! Persisted OTP account and its editable fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An OTP account as owned by the store.
///
/// The coordinator only ever holds a local, possibly stale copy.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Issuer shown as the row title (e.g. "GitHub").
    pub service: String,
    pub username: String,
    /// Shared OTP secret. Serialized as base64.
    #[serde(with = "secret_base64")]
    pub secret: Vec<u8>,
    /// Ordinal within the user's list.
    #[serde(default)]
    pub position: u32,
    /// Bumped on every local edit; stores use it to detect stale saves.
    #[serde(default)]
    pub revision: u64,
}

impl Account {
    pub fn new(service: impl Into<String>, username: impl Into<String>, secret: Vec<u8>) -> Self {
        Self {
            id: AccountId::generate(),
            service: service.into(),
            username: username.into(),
            secret,
            position: 0,
            revision: 0,
        }
    }

    /// Same as [`Account::new`] with a caller-chosen identity.
    pub fn with_id(
        id: impl Into<AccountId>,
        service: impl Into<String>,
        username: impl Into<String>,
        secret: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            ..Self::new(service, username, secret)
        }
    }

    /// Apply edited fields. Returns `true` and bumps the revision when
    /// anything actually changed.
    pub fn apply(&mut self, update: &AccountUpdate) -> bool {
        let mut changed = false;
        if let Some(service) = &update.service {
            if *service != self.service {
                self.service = service.clone();
                changed = true;
            }
        }
        if let Some(username) = &update.username {
            if *username != self.username {
                self.username = username.clone();
                changed = true;
            }
        }
        if changed {
            self.revision += 1;
        }
        changed
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("position", &self.position)
            .field("revision", &self.revision)
            .finish()
    }
}

/// Fields a user may edit on an existing account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub service: Option<String>,
    pub username: Option<String>,
}

impl AccountUpdate {
    pub fn service(service: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.username.is_none()
    }
}

mod secret_base64 {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(secret: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(secret))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
