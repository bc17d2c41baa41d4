//! Access Guard
//!
//! A guard mediates every call to its target: the policy is evaluated first,
//! including any side effect such as recording an audit entry, and only a
//! permitting verdict lets the call through. Policy errors propagate and the
//! target is never reached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use super::capability::Capability;
use super::outcome::{Invocation, Outcome};
use super::ports::{AuditEntry, AuditSink};
use crate::error::KitResult;

/// What a policy sees about the call being mediated.
#[derive(Debug, Clone)]
pub struct AccessContext<'a> {
    /// Name of the guard
    pub guard: &'a str,
    /// 1-based invocation counter of this guard
    pub sequence: u64,
    /// When the call arrived
    pub at: DateTime<Utc>,
}

/// Decision from policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Call may proceed.
    Permit,
    /// Call is refused with a reason.
    Deny { reason: String },
}

impl Verdict {
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    pub fn is_permitted(&self) -> bool {
        matches!(self, Self::Permit)
    }
}

/// Access policy evaluated before every delegated call.
pub trait Policy: Send + Sync {
    fn evaluate(&self, context: &AccessContext<'_>) -> KitResult<Verdict>;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn evaluate(&self, context: &AccessContext<'_>) -> KitResult<Verdict> {
        (**self).evaluate(context)
    }
}

impl<P: Policy + ?Sized> Policy for Arc<P> {
    fn evaluate(&self, context: &AccessContext<'_>) -> KitResult<Verdict> {
        (**self).evaluate(context)
    }
}

/// Policies chained in order; the first denial wins and later policies are
/// not evaluated.
impl<A: Policy, B: Policy> Policy for (A, B) {
    fn evaluate(&self, context: &AccessContext<'_>) -> KitResult<Verdict> {
        match self.0.evaluate(context)? {
            Verdict::Permit => self.1.evaluate(context),
            deny => Ok(deny),
        }
    }
}

/// Permits everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Allow;

impl Policy for Allow {
    fn evaluate(&self, _context: &AccessContext<'_>) -> KitResult<Verdict> {
        Ok(Verdict::Permit)
    }
}

/// Policy from a closure returning a verdict.
pub struct FnPolicy<F> {
    f: F,
}

impl<F> FnPolicy<F>
where
    F: Fn(&AccessContext<'_>) -> KitResult<Verdict> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Policy for FnPolicy<F>
where
    F: Fn(&AccessContext<'_>) -> KitResult<Verdict> + Send + Sync,
{
    fn evaluate(&self, context: &AccessContext<'_>) -> KitResult<Verdict> {
        (self.f)(context)
    }
}

/// Records one audit entry per invocation, then permits.
pub struct AuditPolicy<S> {
    sink: S,
}

impl<S: AuditSink> AuditPolicy<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: AuditSink> Policy for AuditPolicy<S> {
    fn evaluate(&self, context: &AccessContext<'_>) -> KitResult<Verdict> {
        self.sink.record(&AuditEntry::new(context.guard, context.at))?;
        Ok(Verdict::Permit)
    }
}

/// Permits calls for which the predicate holds.
pub struct PermissionPolicy<F> {
    predicate: F,
    reason: String,
}

impl<F> PermissionPolicy<F>
where
    F: Fn(&AccessContext<'_>) -> bool + Send + Sync,
{
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            reason: "permission denied".to_string(),
        }
    }

    /// Reason reported on denial.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

impl<F> Policy for PermissionPolicy<F>
where
    F: Fn(&AccessContext<'_>) -> bool + Send + Sync,
{
    fn evaluate(&self, context: &AccessContext<'_>) -> KitResult<Verdict> {
        if (self.predicate)(context) {
            Ok(Verdict::Permit)
        } else {
            Ok(Verdict::deny(self.reason.clone()))
        }
    }
}

/// Guard around a target capability.
pub struct Guard<C, P> {
    name: String,
    target: C,
    policy: P,
    sequence: AtomicU64,
}

impl<C, P> Guard<C, P>
where
    C: Capability,
    P: Policy,
{
    pub fn new(name: impl Into<String>, target: C, policy: P) -> Self {
        Self {
            name: name.into(),
            target,
            policy,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &C {
        &self.target
    }

    /// Number of invocations seen, permitted or not.
    pub fn invocations(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// Evaluate the policy, then delegate if permitted.
    pub fn invoke(&self) -> Invocation<C::Output> {
        let context = AccessContext {
            guard: &self.name,
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
            at: Utc::now(),
        };

        match self.policy.evaluate(&context)? {
            Verdict::Permit => {
                trace!(guard = %self.name, sequence = context.sequence, "access permitted");
                self.target.invoke()
            }
            Verdict::Deny { reason } => {
                debug!(guard = %self.name, sequence = context.sequence, %reason, "access denied");
                Ok(Outcome::denied(self.name.clone(), reason))
            }
        }
    }
}

impl<C, P> Capability for Guard<C, P>
where
    C: Capability,
    P: Policy,
{
    type Output = C::Output;

    fn invoke(&self) -> Invocation<C::Output> {
        Guard::invoke(self)
    }
}

/// Target that constructs its real subject on first invocation.
///
/// Placed behind a guard, a denied call never pays for construction.
pub struct LazyTarget<T, F> {
    cell: OnceCell<T>,
    init: F,
}

impl<T, F> LazyTarget<T, F>
where
    T: Capability,
    F: Fn() -> KitResult<T> + Send + Sync,
{
    pub fn new(init: F) -> Self {
        Self {
            cell: OnceCell::new(),
            init,
        }
    }

    /// Whether the real subject has been constructed.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T, F> Capability for LazyTarget<T, F>
where
    T: Capability,
    F: Fn() -> KitResult<T> + Send + Sync,
{
    type Output = T::Output;

    fn invoke(&self) -> Invocation<T::Output> {
        let target = self.cell.get_or_try_init(|| {
            debug!("constructing lazy target");
            (self.init)()
        })?;
        target.invoke()
    }
}
