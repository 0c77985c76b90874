#![forbid(unsafe_code)]

//! Bindable endpoints: the [`ObservableValue`] capability and its generic
//! closure-backed implementations.
//!
//! # Design
//!
//! A [`GenericProperty<T>`] stores no value of its own. It holds a getter and
//! a setter that reach the owning object through a `Weak` handle, plus an
//! optional [`ChangeSignal`] describing the owner's native change event. The
//! owner's lifetime is never extended by a property.
//!
//! # Invariants
//!
//! 1. Every `get()`/`set()` round-trips through the owner; nothing is cached.
//! 2. Once the owner is dropped, `get()` returns `None` and `set()` is a
//!    no-op.
//! 3. `subscribe()` on a property without a signal logs a warning and
//!    returns `None`; it never fails.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Owner dropped | Weak handle fails to upgrade | Absent read, skipped write |
//! | Owner already borrowed | `RefCell` conflict in `for_cell` | Absent read, skipped write (logged) |
//! | Unresolved name | `named` with unknown field or wrong type | Absent read, skipped write (logged) |
//! | No change signal | Endpoint has no native event | `subscribe` returns `None` (logged) |

use std::any::Any;
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::accessor::{Accessor, AccessorError, NamedAccessors};
use crate::signal::{ChangeSignal, Subscription};

/// The minimal contract of a bindable endpoint.
pub trait ObservableValue {
    /// Payload type shared by both ends of a binding.
    type Value;

    /// Read the current value, or `None` when no value can be produced.
    fn get(&self) -> Option<Self::Value>;

    /// Write a value through to the underlying slot.
    fn set(&self, value: Self::Value);

    /// Register `listener` on the endpoint's native change signal.
    ///
    /// Returns `None` when the endpoint has no change signal. The default
    /// implementation reports the subscription as unsupported.
    fn subscribe(&self, listener: Box<dyn Fn()>) -> Option<Subscription> {
        drop(listener);
        tracing::warn!(
            endpoint = %self.label(),
            "change subscription not supported; listener ignored"
        );
        None
    }

    /// Name used in log output.
    fn label(&self) -> &str {
        "endpoint"
    }
}

type Getter<T> = Box<dyn Fn() -> Option<T>>;
type Setter<T> = Box<dyn Fn(T)>;

/// A closure-backed [`ObservableValue`] over a weakly held owner.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tether_core::property::{GenericProperty, ObservableValue};
///
/// let owner = Rc::new(Cell::new(0.5_f32));
/// let percent = GenericProperty::new(
///     &owner,
///     |v| format!("{}", (v.get() * 100.0).round() as i32),
///     |v, text: String| v.set(text.parse::<f32>().unwrap_or(0.0) / 100.0),
/// );
///
/// assert_eq!(percent.get().as_deref(), Some("50"));
/// percent.set("25".into());
/// assert_eq!(owner.get(), 0.25);
///
/// drop(owner);
/// assert_eq!(percent.get(), None);
/// ```
pub struct GenericProperty<T> {
    getter: Getter<T>,
    setter: Setter<T>,
    owner: Option<Weak<dyn Any>>,
    signal: Option<ChangeSignal>,
    label: Cow<'static, str>,
}

impl<T: 'static> GenericProperty<T> {
    /// Wrap a total getter and a setter over `owner`.
    ///
    /// The owner provides its own interior mutability; the setter receives
    /// a shared reference.
    pub fn new<O: 'static>(
        owner: &Rc<O>,
        getter: impl Fn(&O) -> T + 'static,
        setter: impl Fn(&O, T) + 'static,
    ) -> Self {
        Self::partial(owner, move |o| Some(getter(o)), setter)
    }

    /// Wrap a getter that may fail to produce a value.
    pub fn partial<O: 'static>(
        owner: &Rc<O>,
        getter: impl Fn(&O) -> Option<T> + 'static,
        setter: impl Fn(&O, T) + 'static,
    ) -> Self {
        let read_handle = Rc::downgrade(owner);
        let write_handle = read_handle.clone();
        let owner_handle: Weak<dyn Any> = read_handle.clone();
        Self {
            getter: Box::new(move || match read_handle.upgrade() {
                Some(owner) => getter(&*owner),
                None => {
                    tracing::trace!("owner released; read is absent");
                    None
                }
            }),
            setter: Box::new(move |value| match write_handle.upgrade() {
                Some(owner) => setter(&*owner, value),
                None => tracing::trace!("owner released; write skipped"),
            }),
            owner: Some(owner_handle),
            signal: None,
            label: Cow::Borrowed("property"),
        }
    }

    /// Wrap a getter and a mutating setter over a `RefCell` owner.
    ///
    /// A borrow conflict (the owner is already mutably borrowed further up
    /// the stack) degrades to an absent read or a skipped write.
    pub fn for_cell<O: 'static>(
        owner: &Rc<RefCell<O>>,
        getter: impl Fn(&O) -> T + 'static,
        setter: impl Fn(&mut O, T) + 'static,
    ) -> Self {
        Self::partial(
            owner,
            move |cell| match cell.try_borrow() {
                Ok(owner) => Some(getter(&*owner)),
                Err(_) => {
                    tracing::warn!("owner is mutably borrowed; read is absent");
                    None
                }
            },
            move |cell, value| match cell.try_borrow_mut() {
                Ok(mut owner) => setter(&mut *owner, value),
                Err(_) => tracing::warn!("owner is borrowed; write skipped"),
            },
        )
    }

    /// Wrap a typed [`Accessor`] over a `RefCell` owner.
    pub fn from_accessor<O: 'static>(owner: &Rc<RefCell<O>>, accessor: Accessor<O, T>) -> Self {
        let write = accessor.clone();
        Self::for_cell(
            owner,
            move |o| accessor.get(o),
            move |o, value| write.set(o, value),
        )
    }

    /// Resolve `name` in `accessors` and wrap the result.
    pub fn try_named<O: 'static>(
        owner: &Rc<RefCell<O>>,
        accessors: &NamedAccessors<O>,
        name: &str,
    ) -> Result<Self, AccessorError> {
        let accessor = accessors.resolve::<T>(name)?;
        Ok(Self::from_accessor(owner, accessor).with_label(name.to_string()))
    }

    /// Like [`try_named`](Self::try_named), but an unresolved name yields a
    /// property that always reads absent and ignores writes.
    pub fn named<O: 'static>(
        owner: &Rc<RefCell<O>>,
        accessors: &NamedAccessors<O>,
        name: &str,
    ) -> Self {
        Self::try_named(owner, accessors, name).unwrap_or_else(|err| {
            tracing::debug!(%err, "named property unresolved; reads will be absent");
            Self::unresolved(name.to_string())
        })
    }

    /// Wrap ownerless closures. The closures manage their own storage.
    pub fn from_fn(
        getter: impl Fn() -> Option<T> + 'static,
        setter: impl Fn(T) + 'static,
    ) -> Self {
        Self {
            getter: Box::new(getter),
            setter: Box::new(setter),
            owner: None,
            signal: None,
            label: Cow::Borrowed("property"),
        }
    }

    fn unresolved(label: String) -> Self {
        Self {
            getter: Box::new(|| None),
            setter: Box::new(|_| {}),
            owner: None,
            signal: None,
            label: Cow::Owned(label),
        }
    }
}

impl<T> GenericProperty<T> {
    /// Attach the owner's native change signal.
    #[must_use]
    pub fn with_signal(mut self, signal: ChangeSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Name the property for log output.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// The attached change signal, if any.
    #[must_use]
    pub fn signal(&self) -> Option<&ChangeSignal> {
        self.signal.as_ref()
    }

    /// Whether the owner is still alive. Ownerless properties are always
    /// attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.owner
            .as_ref()
            .is_none_or(|owner| owner.strong_count() > 0)
    }
}

impl<T> ObservableValue for GenericProperty<T> {
    type Value = T;

    fn get(&self) -> Option<T> {
        (self.getter)()
    }

    fn set(&self, value: T) {
        (self.setter)(value)
    }

    fn subscribe(&self, listener: Box<dyn Fn()>) -> Option<Subscription> {
        match &self.signal {
            Some(signal) => Some(signal.subscribe_boxed(listener)),
            None => {
                tracing::warn!(
                    endpoint = %self.label,
                    "change subscription not supported; listener ignored"
                );
                None
            }
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl<T> fmt::Debug for GenericProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericProperty")
            .field("label", &self.label)
            .field("attached", &self.is_attached())
            .field("signal", &self.signal.as_ref().map(ChangeSignal::name))
            .finish_non_exhaustive()
    }
}

/// A [`GenericProperty`] whose writes are ignored.
///
/// Used for one-directional exposure of derived values, typically bound
/// with [`UpdateValueStrategy::ModelToTarget`](crate::UpdateValueStrategy).
pub struct ReadOnlyProperty<T> {
    inner: GenericProperty<T>,
}

impl<T: 'static> ReadOnlyProperty<T> {
    /// Wrap a getter over `owner`.
    pub fn new<O: 'static>(owner: &Rc<O>, getter: impl Fn(&O) -> T + 'static) -> Self {
        Self {
            inner: GenericProperty::new(owner, getter, |_, _| {}).with_label("read-only"),
        }
    }

    /// Wrap an ownerless getter.
    pub fn from_fn(getter: impl Fn() -> Option<T> + 'static) -> Self {
        Self {
            inner: GenericProperty::from_fn(getter, |_| {}).with_label("read-only"),
        }
    }
}

impl<T> ReadOnlyProperty<T> {
    /// Name the property for log output.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.inner = self.inner.with_label(label);
        self
    }

    /// Whether the owner is still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.is_attached()
    }
}

impl<T> ObservableValue for ReadOnlyProperty<T> {
    type Value = T;

    fn get(&self) -> Option<T> {
        self.inner.get()
    }

    fn set(&self, _value: T) {
        tracing::trace!(endpoint = %self.inner.label(), "write to read-only property ignored");
    }

    fn subscribe(&self, listener: Box<dyn Fn()>) -> Option<Subscription> {
        self.inner.subscribe(listener)
    }

    fn label(&self) -> &str {
        self.inner.label()
    }
}

impl<T> fmt::Debug for ReadOnlyProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnlyProperty").field(&self.inner).finish()
    }
}

/// A property carrying display text.
pub type TextProperty = GenericProperty<String>;
/// A property carrying a flag (switch state, enabled, selected).
pub type BoolProperty = GenericProperty<bool>;
/// A property carrying a continuous value (slider position).
pub type ValueProperty = GenericProperty<f32>;
