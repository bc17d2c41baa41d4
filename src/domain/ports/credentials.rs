//! Credential Ports
//!
//! Authentication layers never prompt for input: a `CredentialSource`
//! supplies what the caller presented and a `CredentialCheck` decides.

use std::fmt;

/// Username/password pair presented by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Supplies the credentials presented for a call.
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Option<Credentials>;
}

impl CredentialSource for Credentials {
    fn credentials(&self) -> Option<Credentials> {
        Some(self.clone())
    }
}

impl CredentialSource for Option<Credentials> {
    fn credentials(&self) -> Option<Credentials> {
        self.clone()
    }
}

/// Decides whether presented credentials are acceptable.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, credentials: &Credentials) -> bool;
}
