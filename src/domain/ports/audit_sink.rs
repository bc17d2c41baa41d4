//! Audit Sink Port
//!
//! Receives one entry per guarded invocation. Implementations decide where
//! the entry goes (append-only file, memory buffer).

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::KitResult;

/// A single audited request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Name of the guard that saw the request
    pub guard: String,
    /// When the request arrived
    pub at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(guard: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            guard: guard.into(),
            at,
        }
    }
}

/// Renders the line-oriented log format: `request time : <ISO-8601>`.
impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "request time : {}",
            self.at.to_rfc3339_opts(SecondsFormat::Micros, true)
        )
    }
}

/// Destination for audit entries.
pub trait AuditSink: Send + Sync {
    /// Record one entry. The entry must be durable in the sink before this
    /// returns `Ok`.
    fn record(&self, entry: &AuditEntry) -> KitResult<()>;
}

impl<S: AuditSink + ?Sized> AuditSink for Arc<S> {
    fn record(&self, entry: &AuditEntry) -> KitResult<()> {
        (**self).record(entry)
    }
}

impl<S: AuditSink + ?Sized> AuditSink for &S {
    fn record(&self, entry: &AuditEntry) -> KitResult<()> {
        (**self).record(entry)
    }
}
