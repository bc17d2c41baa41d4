//! Wrapper contracts

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kitbash::domain::ports::Credentials;
use kitbash::domain::wrapper::{Authenticate, Before};
use kitbash::infrastructure::StaticCredentials;
use kitbash::{capability, Capability, CapabilityExt, Outcome};

/// CONTRACT: a layer that declines never invokes what it wraps.
#[test]
fn contract_denial_short_circuits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let base = capability(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        "secret".to_string()
    });

    let page = base.wrap(Authenticate::new(
        Credentials::new("admin", "wrong"),
        StaticCredentials::new("admin", "123"),
    ));

    let outcome = page.invoke().unwrap();
    assert!(outcome.is_denied());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// CONTRACT: the most recently added layer runs first.
#[test]
fn contract_layers_run_outermost_first() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let (a, b) = (Arc::clone(&order), Arc::clone(&order));

    let stacked = capability(|| 1)
        .wrap(Before::new(move || a.lock().unwrap().push("first added")))
        .wrap(Before::new(move || b.lock().unwrap().push("last added")));

    assert_eq!(stacked.invoke().unwrap(), Outcome::Delivered(1));
    assert_eq!(*order.lock().unwrap(), vec!["last added", "first added"]);
}
