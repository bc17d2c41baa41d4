//! Invocation outcomes
//!
//! A guard or wrapper that refuses to delegate reports it through
//! [`Outcome::Denied`]; errors are reserved for faults.

use std::fmt;

use crate::error::KitResult;

/// Result of invoking a capability: a fault (`Err`) or an [`Outcome`].
pub type Invocation<T> = KitResult<Outcome<T>>;

/// Why a layer refused to delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    /// Name of the layer that refused
    pub by: String,
    /// Human readable reason
    pub reason: String,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "denied by {}: {}", self.by, self.reason)
    }
}

/// Outcome of a capability invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The call reached the base capability and produced a value.
    Delivered(T),
    /// A layer refused to delegate inward.
    Denied(Denial),
}

impl<T> Outcome<T> {
    /// Create a delivered outcome wrapped in `Ok`.
    pub fn ok(value: T) -> Invocation<T> {
        Ok(Self::Delivered(value))
    }

    /// Create a denied outcome.
    pub fn denied(by: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Denied(Denial {
            by: by.into(),
            reason: reason.into(),
        })
    }

    /// Returns `true` if the call produced a value.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    /// Returns `true` if a layer refused the call.
    pub fn is_denied(&self) -> bool {
        !self.is_delivered()
    }

    /// Returns the denial, if denied.
    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Delivered(_) => None,
            Self::Denied(denial) => Some(denial),
        }
    }

    /// Consume the outcome, keeping only a delivered value.
    pub fn delivered(self) -> Option<T> {
        match self {
            Self::Delivered(value) => Some(value),
            Self::Denied(_) => None,
        }
    }

    /// Transform a delivered value; denials pass through untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Delivered(value) => Outcome::Delivered(f(value)),
            Self::Denied(denial) => Outcome::Denied(denial),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Delivered(value) => Outcome::Delivered(value),
            Self::Denied(denial) => Outcome::Denied(denial.clone()),
        }
    }
}
