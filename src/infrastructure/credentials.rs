//! Credential providers
//!
//! Non-interactive replacements for prompting: credentials come from the
//! environment, and a fixed expected pair serves as the check.

use crate::domain::ports::{CredentialCheck, CredentialSource, Credentials};

/// Accepts exactly one username/password pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    expected: Credentials,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            expected: Credentials::new(username, password),
        }
    }
}

impl CredentialCheck for StaticCredentials {
    fn verify(&self, credentials: &Credentials) -> bool {
        credentials == &self.expected
    }
}

/// Reads credentials from two environment variables at call time.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    username_var: String,
    password_var: String,
}

impl EnvCredentials {
    pub fn new(username_var: impl Into<String>, password_var: impl Into<String>) -> Self {
        Self {
            username_var: username_var.into(),
            password_var: password_var.into(),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new("KITBASH_USERNAME", "KITBASH_PASSWORD")
    }
}

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Option<Credentials> {
        let username = std::env::var(&self.username_var).ok()?;
        let password = std::env::var(&self.password_var).ok()?;
        Some(Credentials::new(username, password))
    }
}
