//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `audit` - Audit sinks (append-only file, memory)
//! - `credentials` - Credential sources and checks
//! - `logging` - `tracing` subscriber setup

pub mod audit;
pub mod credentials;
pub mod logging;

// Re-export for convenience
pub use audit::{FileAuditSink, MemoryAuditSink};
pub use credentials::{EnvCredentials, StaticCredentials};
