//! Google Ads credential set
//!
//! The five values required to authenticate against the Google Ads API.
//! A set is only usable when every field is present; secret values are
//! never rendered in full by `Debug` or by the report helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single named field of the credential set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    ClientId,
    ClientSecret,
    DeveloperToken,
    LoginCustomerId,
    RefreshToken,
}

impl CredentialField {
    /// All fields, in reporting order
    pub const ALL: [CredentialField; 5] = [
        CredentialField::ClientId,
        CredentialField::ClientSecret,
        CredentialField::DeveloperToken,
        CredentialField::LoginCustomerId,
        CredentialField::RefreshToken,
    ];

    /// Environment variable the field is read from
    pub fn env_var(self) -> &'static str {
        match self {
            CredentialField::ClientId => "GOOGLE_ADS_CLIENT_ID",
            CredentialField::ClientSecret => "GOOGLE_ADS_CLIENT_SECRET",
            CredentialField::DeveloperToken => "GOOGLE_ADS_DEVELOPER_TOKEN",
            CredentialField::LoginCustomerId => "GOOGLE_ADS_LOGIN_CUSTOMER_ID",
            CredentialField::RefreshToken => "GOOGLE_ADS_REFRESH_TOKEN",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            CredentialField::ClientId => "Client ID",
            CredentialField::ClientSecret => "Client Secret",
            CredentialField::DeveloperToken => "Developer Token",
            CredentialField::LoginCustomerId => "Login Customer ID",
            CredentialField::RefreshToken => "Refresh Token",
        }
    }

    /// Whether the value must be masked when displayed
    pub fn is_secret(self) -> bool {
        !matches!(self, CredentialField::LoginCustomerId)
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}

/// Credentials for the Google Ads API
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialSet {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    #[serde(default)]
    pub developer_token: String,

    /// Manager account id, with or without dashes (e.g. "123-456-7890")
    #[serde(default)]
    pub login_customer_id: String,

    #[serde(default)]
    pub refresh_token: String,
}

impl CredentialSet {
    /// Build a credential set from an environment lookup function
    ///
    /// Unset variables leave the field empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut set = Self::default();
        for field in CredentialField::ALL {
            if let Some(value) = lookup(field.env_var()) {
                set.set(field, value);
            }
        }
        set
    }

    pub fn get(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::ClientId => &self.client_id,
            CredentialField::ClientSecret => &self.client_secret,
            CredentialField::DeveloperToken => &self.developer_token,
            CredentialField::LoginCustomerId => &self.login_customer_id,
            CredentialField::RefreshToken => &self.refresh_token,
        }
    }

    pub fn set(&mut self, field: CredentialField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CredentialField::ClientId => self.client_id = value,
            CredentialField::ClientSecret => self.client_secret = value,
            CredentialField::DeveloperToken => self.developer_token = value,
            CredentialField::LoginCustomerId => self.login_customer_id = value,
            CredentialField::RefreshToken => self.refresh_token = value,
        }
    }

    /// Whether a field holds a usable value (whitespace-only counts as absent)
    pub fn is_present(&self, field: CredentialField) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// True only when all five fields are present
    pub fn is_complete(&self) -> bool {
        CredentialField::ALL.iter().all(|f| self.is_present(*f))
    }

    /// Fields that are absent, in reporting order
    pub fn missing(&self) -> Vec<CredentialField> {
        CredentialField::ALL
            .into_iter()
            .filter(|f| !self.is_present(*f))
            .collect()
    }

    /// Login customer id with dashes stripped, as the API expects it
    pub fn customer_id(&self) -> String {
        self.login_customer_id.trim().replace('-', "")
    }

    /// A normalized customer id is exactly ten ASCII digits
    pub fn customer_id_is_well_formed(&self) -> bool {
        let id = self.customer_id();
        id.len() == 10 && id.chars().all(|c| c.is_ascii_digit())
    }

    /// Display form of a field: secrets are masked, the customer id is shown as-is
    pub fn display_value(&self, field: CredentialField) -> String {
        let value = self.get(field);
        if field.is_secret() {
            mask(value, 4, 4)
        } else {
            value.to_string()
        }
    }

    /// Copy with every secret field masked
    pub fn redacted(&self) -> CredentialSet {
        let mut copy = CredentialSet::default();
        for field in CredentialField::ALL {
            copy.set(field, self.display_value(field));
        }
        copy
    }

    /// Short client id prefix for status reporting ("1234567890...")
    pub fn client_id_hint(&self) -> Option<String> {
        if !self.is_present(CredentialField::ClientId) {
            return None;
        }
        let prefix: String = self.client_id.chars().take(10).collect();
        Some(format!("{}...", prefix))
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = self.redacted();
        f.debug_struct("CredentialSet")
            .field("client_id", &redacted.client_id)
            .field("client_secret", &redacted.client_secret)
            .field("developer_token", &redacted.developer_token)
            .field("login_customer_id", &redacted.login_customer_id)
            .field("refresh_token", &redacted.refresh_token)
            .finish()
    }
}

/// Mask a string, keeping `visible_start` leading and `visible_end` trailing characters
///
/// Strings too short to keep both ends are masked entirely.
pub fn mask(text: &str, visible_start: usize, visible_end: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= visible_start + visible_end {
        return "*".repeat(chars.len());
    }

    let hidden = chars.len() - visible_start - visible_end;
    let mut out = String::with_capacity(chars.len());
    out.extend(&chars[..visible_start]);
    out.push_str(&"*".repeat(hidden));
    out.extend(&chars[chars.len() - visible_end..]);
    out
}
