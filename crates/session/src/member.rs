//! The member a statement is produced for.

use serde::{Deserialize, Serialize};
use statement_core::statement::NOT_AVAILABLE;
use statement_shared::types::MemberKey;

/// A selected member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Backend key.
    pub key: MemberKey,
    /// Full name, if known.
    pub full_name: Option<String>,
    /// Email address, if known.
    pub email: Option<String>,
}

impl MemberProfile {
    /// Creates a profile with only a key.
    #[must_use]
    pub const fn new(key: MemberKey) -> Self {
        Self {
            key,
            full_name: None,
            email: None,
        }
    }

    /// Sets the full name.
    #[must_use]
    pub fn with_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Upper-cased full name, or `N/A`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| NOT_AVAILABLE.to_string(), str::to_uppercase)
    }

    /// Recipient address; absent when empty or `N/A`.
    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty() && *email != NOT_AVAILABLE)
    }
}
