//! Capability - the one-operation surface every layer exposes
//!
//! Base components, wrapper layers, guards, adapters and tree nodes all
//! implement [`Capability`], so they nest freely.

use std::sync::Arc;

use super::adapter::Adapter;
use super::guard::{Guard, Policy};
use super::outcome::{Invocation, Outcome};
use super::wrapper::{wrap, Behavior, Wrapped};

/// Something that can be invoked to perform its operation.
pub trait Capability: Send + Sync {
    type Output;

    /// Perform the operation.
    fn invoke(&self) -> Invocation<Self::Output>;
}

impl<C: Capability + ?Sized> Capability for &C {
    type Output = C::Output;

    fn invoke(&self) -> Invocation<Self::Output> {
        (**self).invoke()
    }
}

impl<C: Capability + ?Sized> Capability for Box<C> {
    type Output = C::Output;

    fn invoke(&self) -> Invocation<Self::Output> {
        (**self).invoke()
    }
}

impl<C: Capability + ?Sized> Capability for Arc<C> {
    type Output = C::Output;

    fn invoke(&self) -> Invocation<Self::Output> {
        (**self).invoke()
    }
}

/// Capability backed by a plain closure that always delivers.
pub struct FnCapability<F> {
    f: F,
}

/// Turn a closure into a base capability.
pub fn capability<F, T>(f: F) -> FnCapability<F>
where
    F: Fn() -> T + Send + Sync,
{
    FnCapability { f }
}

impl<F, T> Capability for FnCapability<F>
where
    F: Fn() -> T + Send + Sync,
{
    type Output = T;

    fn invoke(&self) -> Invocation<T> {
        Outcome::ok((self.f)())
    }
}

/// Chaining helpers available on every sized capability.
pub trait CapabilityExt: Capability + Sized {
    /// Wrap `self` in a behavior layer; the new layer is outermost.
    fn wrap<B>(self, behavior: B) -> Wrapped<Self, B>
    where
        B: Behavior<Self::Output>,
    {
        wrap(self, behavior)
    }

    /// Put `self` behind a policy-enforcing guard.
    fn guard<P>(self, name: impl Into<String>, policy: P) -> Guard<Self, P>
    where
        P: Policy,
    {
        Guard::new(name, self, policy)
    }

    /// Convert the delivered output.
    fn adapt<F, U>(self, convert: F) -> Adapter<Self, F>
    where
        F: Fn(Self::Output) -> U + Send + Sync,
    {
        Adapter::new(self, convert)
    }
}

impl<C: Capability + Sized> CapabilityExt for C {}
