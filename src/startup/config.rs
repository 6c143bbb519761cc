//! Session configuration.
//!
//! One [`SessionConfig`] is built per account-list session and handed to
//! the coordinator. Nothing in here is global: the "first load" marker that
//! decides whether a launch-time sync runs lives in the config as well.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::TotpAlgorithm;
use crate::coordinator::undo::DEFAULT_UNDO_WINDOW;
use crate::coordinator::ClipboardPolicy;

/// When background synchronization runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPolicy {
    /// Sync once when the list is first opened in this session.
    #[default]
    OnLaunch,
    /// Only sync when the user asks.
    Manual,
}

/// Configuration for one account-list session.
///
/// # Example
///
/// ```ignore
/// use authenticator::startup::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_cloud_sync(true)
///     .with_undo_window(Duration::from_secs(8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long a deleted account can be restored (default: 5s)
    pub undo_window: Duration,
    pub clipboard_policy: ClipboardPolicy,
    /// Use the store's remote synchronizer, if it has one
    pub cloud_sync: bool,
    pub sync_policy: SyncPolicy,
    /// Whether this session has not loaded the list yet
    pub first_load: bool,
    /// Location of the local account cache (default: ~/.authenticator/accounts.json)
    pub store_path: Option<PathBuf>,
    /// Hash behind the displayed codes (default: SHA-1)
    pub totp_algorithm: TotpAlgorithm,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            undo_window: DEFAULT_UNDO_WINDOW,
            clipboard_policy: ClipboardPolicy::UntilCodeRotates,
            cloud_sync: false,
            sync_policy: SyncPolicy::OnLaunch,
            first_load: true,
            store_path: None,
            totp_algorithm: TotpAlgorithm::Sha1,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_undo_window(mut self, window: Duration) -> Self {
        self.undo_window = window;
        self
    }

    pub fn with_clipboard_policy(mut self, policy: ClipboardPolicy) -> Self {
        self.clipboard_policy = policy;
        self
    }

    pub fn with_cloud_sync(mut self, enabled: bool) -> Self {
        self.cloud_sync = enabled;
        self
    }

    pub fn with_sync_policy(mut self, policy: SyncPolicy) -> Self {
        self.sync_policy = policy;
        self
    }

    pub fn with_first_load(mut self, first_load: bool) -> Self {
        self.first_load = first_load;
        self
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    pub fn with_totp_algorithm(mut self, algorithm: TotpAlgorithm) -> Self {
        self.totp_algorithm = algorithm;
        self
    }

    /// Build a config from `AUTHENTICATOR_*` environment variables.
    ///
    /// - `AUTHENTICATOR_UNDO_SECS`: undo window in seconds
    /// - `AUTHENTICATOR_CLIPBOARD`: `clear` or `keep`
    /// - `AUTHENTICATOR_SYNC`: `launch`, `manual` or `off`
    /// - `AUTHENTICATOR_STORE`: path of the account cache
    /// - `AUTHENTICATOR_TOTP_ALGORITHM`: `sha1`, `sha256` or `sha512`
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(secs) = std::env::var("AUTHENTICATOR_UNDO_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => config.undo_window = Duration::from_secs(secs),
                Err(_) => tracing::warn!(value = %secs, "Ignoring invalid AUTHENTICATOR_UNDO_SECS"),
            }
        }

        if let Ok(policy) = std::env::var("AUTHENTICATOR_CLIPBOARD") {
            match policy.as_str() {
                "clear" => config.clipboard_policy = ClipboardPolicy::UntilCodeRotates,
                "keep" => config.clipboard_policy = ClipboardPolicy::Keep,
                other => tracing::warn!(value = %other, "Ignoring invalid AUTHENTICATOR_CLIPBOARD"),
            }
        }

        if let Ok(sync) = std::env::var("AUTHENTICATOR_SYNC") {
            match sync.as_str() {
                "launch" => {
                    config.cloud_sync = true;
                    config.sync_policy = SyncPolicy::OnLaunch;
                }
                "manual" => {
                    config.cloud_sync = true;
                    config.sync_policy = SyncPolicy::Manual;
                }
                "off" => config.cloud_sync = false,
                other => tracing::warn!(value = %other, "Ignoring invalid AUTHENTICATOR_SYNC"),
            }
        }

        if let Ok(path) = std::env::var("AUTHENTICATOR_STORE") {
            if !path.is_empty() {
                config.store_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(algorithm) = std::env::var("AUTHENTICATOR_TOTP_ALGORITHM") {
            match algorithm.parse::<TotpAlgorithm>() {
                Ok(algorithm) => config.totp_algorithm = algorithm,
                Err(_) => tracing::warn!(
                    value = %algorithm,
                    "Ignoring invalid AUTHENTICATOR_TOTP_ALGORITHM"
                ),
            }
        }

        config
    }

    /// Whether a sync should be triggered right after the initial load.
    pub fn syncs_on_launch(&self) -> bool {
        self.cloud_sync && self.first_load && self.sync_policy == SyncPolicy::OnLaunch
    }
}
