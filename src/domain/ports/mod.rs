//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod audit_sink;
pub mod credentials;

pub use audit_sink::{AuditEntry, AuditSink};
pub use credentials::{CredentialCheck, CredentialSource, Credentials};
