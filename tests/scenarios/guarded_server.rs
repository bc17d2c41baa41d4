//! Scenario: Guarded Server
//!
//! Journey: a server is constructed lazily behind an audit guard that
//! appends one line per request to a log file.
//!
//! Success Criteria:
//! - One audit line per request, in the `request time : ...` format
//! - The server is built on first request, not before

use std::fs;
use std::sync::Arc;

use kitbash::infrastructure::FileAuditSink;
use kitbash::{capability, AuditPolicy, CapabilityExt, LazyTarget, Outcome};
use tempfile::tempdir;

#[test]
fn scenario_every_request_is_audited_to_file() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("logs/log.log");
    let sink = Arc::new(FileAuditSink::new(&log));

    let server = Arc::new(LazyTarget::new(|| Ok(capability(|| "done".to_string()))));
    let proxy = Arc::clone(&server).guard("server", AuditPolicy::new(sink));

    assert!(!server.is_initialized());
    for _ in 0..3 {
        assert_eq!(proxy.invoke().unwrap(), Outcome::Delivered("done".to_string()));
    }
    assert!(server.is_initialized());

    let written = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.starts_with("request time : ")));
}
