//! Share-link configuration.

use serde::{Deserialize, Serialize};

/// Whether resolving a link spends one of its uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumePolicy {
    /// Decrement `remaining_uses` atomically (deactivating at zero).
    #[default]
    Consume,
    /// Check usability only; the use budget is left untouched.
    Peek,
}

/// Share-link issuance and resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// TTL applied when the creator does not pass one.
    #[serde(default = "default_ttl")]
    pub default_ttl_minutes: u64,
    /// Use budget applied when the creator does not pass one (`None` = unlimited).
    #[serde(default)]
    pub default_max_uses: Option<u32>,
    /// Consumption on `GET /api/share/{token}`.
    #[serde(default)]
    pub api_consumption: ConsumePolicy,
    /// Consumption on the browser-facing `GET /share/{token}` redirect.
    #[serde(default)]
    pub redirect_consumption: ConsumePolicy,
    /// Login page anonymous redirect visitors are sent to.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Prefix of the note page a resolved link redirects to.
    #[serde(default = "default_note_path_prefix")]
    pub note_path_prefix: String,
    /// Prefix of the public URL returned on creation.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            default_ttl_minutes: default_ttl(),
            default_max_uses: None,
            api_consumption: ConsumePolicy::default(),
            redirect_consumption: ConsumePolicy::default(),
            login_path: default_login_path(),
            note_path_prefix: default_note_path_prefix(),
            url_prefix: default_url_prefix(),
        }
    }
}

fn default_ttl() -> u64 {
    120
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_note_path_prefix() -> String {
    "/notes".to_string()
}

fn default_url_prefix() -> String {
    "/share".to_string()
}
