//! Guard contracts

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use kitbash::domain::guard::{AccessContext, Allow};
use kitbash::infrastructure::MemoryAuditSink;
use kitbash::{capability, AuditPolicy, CapabilityExt, PermissionPolicy};

/// CONTRACT: the audit entry is recorded before the target runs.
#[test]
fn contract_audit_precedes_delegation() {
    let sink = Arc::new(MemoryAuditSink::new());
    let observed = Arc::new(Mutex::new(None));
    let (seen, observer) = (Arc::clone(&sink), Arc::clone(&observed));

    let guarded = capability(move || {
        *observer.lock().unwrap() = Some(seen.len());
    })
    .guard("server", AuditPolicy::new(Arc::clone(&sink)));

    guarded.invoke().unwrap();

    assert_eq!(*observed.lock().unwrap(), Some(1));
    assert_eq!(sink.len(), 1);
}

/// CONTRACT: a denied call never reaches the target but is still counted.
#[test]
fn contract_denied_call_never_delegates() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let guarded = capability(move || counter.fetch_add(1, Ordering::SeqCst)).guard(
        "vault",
        (Allow, PermissionPolicy::new(|_: &AccessContext<'_>| false).with_reason("locked")),
    );

    let outcome = guarded.invoke().unwrap();

    assert_eq!(outcome.denial().map(|d| d.reason.as_str()), Some("locked"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(guarded.invocations(), 1);
}
