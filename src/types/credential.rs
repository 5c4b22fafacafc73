// src/types/credential.rs
//! Bearer credentials for the CMS API.

use super::ValidationError;
use std::fmt;

/// Which kind of token a credential is. The transport treats both the same;
/// the distinction only matters for logging at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScope {
    /// Read-only token safe to ship to browsers
    Public,
    /// Server-side token that can also read drafts and restricted items
    Elevated,
}

impl fmt::Display for CredentialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Elevated => write!(f, "elevated"),
        }
    }
}

/// A bearer token attached to every CMS request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    scope: CredentialScope,
}

impl Credential {
    /// Create a new credential with validation
    pub fn new(token: impl Into<String>, scope: CredentialScope) -> Result<Self, ValidationError> {
        let token = token.into();
        let token = token.trim();

        if token.is_empty() {
            return Err(ValidationError::InvalidCredential {
                reason: "token cannot be empty".to_string(),
            });
        }

        if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::InvalidCredential {
                reason: "token must not contain whitespace".to_string(),
            });
        }

        Ok(Self {
            token: token.to_string(),
            scope,
        })
    }

    pub fn public(token: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(token, CredentialScope::Public)
    }

    pub fn elevated(token: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(token, CredentialScope::Elevated)
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn scope(&self) -> CredentialScope {
        self.scope
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact the token in display
        let visible: String = self.token.chars().take(4).collect();
        write!(f, "{} token {}...", self.scope, visible)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_never_leaks_the_token() {
        let credential = Credential::elevated("s3cr3t-admin-token").unwrap();
        assert_eq!(credential.to_string(), "elevated token s3cr...");
        assert!(!format!("{:?}", credential).contains("admin-token"));
        assert_eq!(credential.bearer(), "Bearer s3cr3t-admin-token");
    }

    #[test]
    fn rejects_empty_and_spaced_tokens() {
        assert!(Credential::public("   ").is_err());
        assert!(Credential::public("abc def").is_err());
    }
}
