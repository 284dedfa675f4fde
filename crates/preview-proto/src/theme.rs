//! Accent-color policy for addresses the service gave no `theme-color` for.

use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const INSTITUTIONAL_DOMAIN: &str = "psu.edu";
pub const INSTITUTIONAL_TOKEN: &str = "--ddd-primary-2";
pub const DEFAULT_TOKEN: &str = "--ddd-primary-20";

/// Two-way branch: institutional hosts get one token, everything else another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemePolicy {
    #[serde(default = "default_institutional_domain")]
    pub institutional_domain: String,
    #[serde(default = "default_institutional_token")]
    pub institutional_token: String,
    #[serde(default = "default_token")]
    pub default_token: String,
}

impl Default for ThemePolicy {
    fn default() -> Self {
        Self {
            institutional_domain: default_institutional_domain(),
            institutional_token: default_institutional_token(),
            default_token: default_token(),
        }
    }
}

fn default_institutional_domain() -> String {
    INSTITUTIONAL_DOMAIN.to_string()
}

fn default_institutional_token() -> String {
    INSTITUTIONAL_TOKEN.to_string()
}

fn default_token() -> String {
    DEFAULT_TOKEN.to_string()
}

impl ThemePolicy {
    /// Accent token for `address`.  Matches against the parsed host; an
    /// address that is not a URL is searched as a whole.
    pub fn accent_for(&self, address: &str) -> String {
        let haystack = match Url::parse(address) {
            Ok(url) => url.host_str().unwrap_or_default().to_ascii_lowercase(),
            Err(_) => address.to_ascii_lowercase(),
        };
        let domain = self.institutional_domain.to_ascii_lowercase();
        if !domain.is_empty() && haystack.contains(&domain) {
            self.institutional_token.clone()
        } else {
            self.default_token.clone()
        }
    }
}

/// `ThemePolicy::accent_for` under the default policy.
pub fn default_theme(address: &str) -> String {
    ThemePolicy::default().accent_for(address)
}
