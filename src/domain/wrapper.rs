//! Wrapper Chain
//!
//! Layers behavior around a capability without modifying it. Wrapping is
//! strictly nesting: the last-applied layer is outermost and runs first, and
//! every layer decides whether and when to call inward.
//!
//! ```
//! use kitbash::domain::capability::{capability, Capability, CapabilityExt};
//! use kitbash::domain::wrapper::MapOutput;
//!
//! let page = capability(|| "page".to_string())
//!     .wrap(MapOutput::new(|s: String| format!("<{s}>")))
//!     .wrap(MapOutput::new(|s: String| s.to_uppercase()));
//! let shown = page.invoke().unwrap().delivered().unwrap();
//! assert_eq!(shown, "<PAGE>");
//! ```

use tracing::debug;

use super::capability::Capability;
use super::outcome::{Invocation, Outcome};
use super::ports::{CredentialCheck, CredentialSource};

/// Behavior a wrapper layer runs around the capability it wraps.
pub trait Behavior<T>: Send + Sync {
    /// Run this layer. Call `inner.invoke()` to delegate, or return a
    /// denial to short-circuit.
    fn around(&self, inner: &dyn Capability<Output = T>) -> Invocation<T>;
}

/// A capability wrapped in one behavior layer.
pub struct Wrapped<C, B> {
    inner: C,
    behavior: B,
}

/// Wrap `base` in `behavior`, producing a new capability.
pub fn wrap<C, B>(base: C, behavior: B) -> Wrapped<C, B>
where
    C: Capability,
    B: Behavior<C::Output>,
{
    Wrapped {
        inner: base,
        behavior,
    }
}

impl<C, B> Wrapped<C, B> {
    /// The wrapped capability.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Remove this layer, returning the wrapped capability.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C, B> Capability for Wrapped<C, B>
where
    C: Capability,
    B: Behavior<C::Output>,
{
    type Output = C::Output;

    fn invoke(&self) -> Invocation<C::Output> {
        self.behavior.around(&self.inner)
    }
}

/// Delegates only when the injected credentials pass the check.
pub struct Authenticate<S, K> {
    source: S,
    check: K,
}

impl<S, K> Authenticate<S, K>
where
    S: CredentialSource,
    K: CredentialCheck,
{
    pub fn new(source: S, check: K) -> Self {
        Self { source, check }
    }
}

impl<T, S, K> Behavior<T> for Authenticate<S, K>
where
    S: CredentialSource,
    K: CredentialCheck,
{
    fn around(&self, inner: &dyn Capability<Output = T>) -> Invocation<T> {
        match self.source.credentials() {
            Some(credentials) if self.check.verify(&credentials) => inner.invoke(),
            Some(credentials) => {
                debug!(user = %credentials.username, "authentication rejected");
                Ok(Outcome::denied("authenticate", "not authenticated"))
            }
            None => {
                debug!("no credentials supplied");
                Ok(Outcome::denied("authenticate", "no credentials supplied"))
            }
        }
    }
}

/// Runs a hook before delegating.
pub struct Before<F> {
    hook: F,
}

impl<F> Before<F>
where
    F: Fn() + Send + Sync,
{
    pub fn new(hook: F) -> Self {
        Self { hook }
    }
}

impl<T, F> Behavior<T> for Before<F>
where
    F: Fn() + Send + Sync,
{
    fn around(&self, inner: &dyn Capability<Output = T>) -> Invocation<T> {
        (self.hook)();
        inner.invoke()
    }
}

/// Runs a hook on the delivered value after delegating.
pub struct After<F> {
    hook: F,
}

impl<F> After<F> {
    pub fn new(hook: F) -> Self {
        Self { hook }
    }
}

impl<T, F> Behavior<T> for After<F>
where
    F: Fn(&T) + Send + Sync,
{
    fn around(&self, inner: &dyn Capability<Output = T>) -> Invocation<T> {
        let outcome = inner.invoke()?;
        if let Outcome::Delivered(value) = &outcome {
            (self.hook)(value);
        }
        Ok(outcome)
    }
}

/// Post-processes the delivered value.
pub struct MapOutput<F> {
    map: F,
}

impl<F> MapOutput<F> {
    pub fn new(map: F) -> Self {
        Self { map }
    }
}

impl<T, F> Behavior<T> for MapOutput<F>
where
    F: Fn(T) -> T + Send + Sync,
{
    fn around(&self, inner: &dyn Capability<Output = T>) -> Invocation<T> {
        Ok(inner.invoke()?.map(&self.map))
    }
}
