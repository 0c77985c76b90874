#![forbid(unsafe_code)]

//! Change signals: explicit observer registration for endpoint events.
//!
//! A [`ChangeSignal`] models a widget's native "value changed" event. Widget
//! adapters hand a clone of the signal to the property that wraps them;
//! bindings register a listener through [`ObservableValue::subscribe`] and
//! keep the returned [`Subscription`] alive for as long as they exist.
//!
//! # Design
//!
//! Listeners are stored as `Weak` function pointers. The strong `Rc` lives
//! inside the [`Subscription`] guard, so dropping the guard disconnects the
//! listener without touching the signal. Dead entries are pruned lazily on
//! the next [`emit`](ChangeSignal::emit) or subscription.
//!
//! # Failure Modes
//!
//! - **Re-entrant emit**: a listener may emit the same signal again or
//!   subscribe new listeners. The listener list is snapshotted before any
//!   callback runs, so newly added listeners first fire on the next emit.
//! - **Subscriber leak**: guards stored forever keep their listeners alive.
//!
//! [`ObservableValue::subscribe`]: crate::property::ObservableValue::subscribe

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type ListenerRc = Rc<dyn Fn()>;
type ListenerWeak = Weak<dyn Fn()>;

struct SignalInner {
    name: &'static str,
    emitted: u64,
    /// Listeners stored as weak references. Dead entries are pruned on emit.
    listeners: Vec<ListenerWeak>,
}

/// A native change event that listeners can register on.
///
/// Cloning a `ChangeSignal` creates a new handle to the **same** listener
/// list; emitting through any handle reaches every live listener.
///
/// # Invariants
///
/// 1. Listeners are invoked in registration order.
/// 2. A listener whose [`Subscription`] was dropped is never invoked again.
/// 3. `emit_count()` increments by exactly 1 per `emit()`.
#[derive(Clone)]
pub struct ChangeSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl ChangeSignal {
    /// Create a signal with no listeners.
    ///
    /// `name` identifies the event in log output (e.g. `"editing_changed"`).
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                name,
                emitted: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// The event name given at construction.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.inner.borrow().name
    }

    /// Register a listener. The listener stays connected while the returned
    /// guard is alive.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.attach(Rc::new(listener))
    }

    /// Register an already boxed listener.
    pub fn subscribe_boxed(&self, listener: Box<dyn Fn()>) -> Subscription {
        self.attach(Rc::from(listener))
    }

    fn attach(&self, strong: ListenerRc) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.listeners.retain(|w| w.strong_count() > 0);
        inner.listeners.push(Rc::downgrade(&strong));
        tracing::trace!(
            signal = inner.name,
            listeners = inner.listeners.len(),
            "listener attached"
        );
        Subscription {
            signal: inner.name,
            _guard: strong,
        }
    }

    /// Fire the signal, invoking every live listener in registration order.
    pub fn emit(&self) {
        let (name, live): (&'static str, Vec<ListenerRc>) = {
            let mut inner = self.inner.borrow_mut();
            inner.emitted += 1;
            inner.listeners.retain(|w| w.strong_count() > 0);
            let live = inner.listeners.iter().filter_map(Weak::upgrade).collect();
            (inner.name, live)
        };
        tracing::trace!(signal = name, listeners = live.len(), "signal emitted");
        for listener in &live {
            listener();
        }
    }

    /// Number of registered listeners, including dead ones not yet pruned.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// How many times the signal has been emitted.
    #[must_use]
    pub fn emit_count(&self) -> u64 {
        self.inner.borrow().emitted
    }
}

impl fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ChangeSignal")
            .field("name", &inner.name)
            .field("emitted", &inner.emitted)
            .field("listener_count", &inner.listeners.len())
            .finish()
    }
}

/// RAII guard for a registered listener.
///
/// Dropping the `Subscription` drops the only strong reference to the
/// listener, so the signal's weak entry fails to upgrade from then on.
#[must_use = "dropping a subscription disconnects its listener"]
pub struct Subscription {
    signal: &'static str,
    _guard: ListenerRc,
}

impl Subscription {
    /// Name of the signal this subscription is attached to.
    #[must_use]
    pub fn signal_name(&self) -> &'static str {
        self.signal
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}
