#![forbid(unsafe_code)]

//! Pairwise bindings between a target endpoint and a model endpoint.
//!
//! A [`GenericDataBinding<T>`] links exactly one target [`ObservableValue`]
//! to exactly one model [`ObservableValue`] under one
//! [`UpdateValueStrategy`]. Both endpoints must agree on the payload type
//! `T`, which the compiler checks at bind time.
//!
//! # Usage
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tether_core::{
//!     ChangeSignal, DataBinding, GenericDataBinding, GenericProperty, UpdateValueStrategy,
//! };
//!
//! let widget = Rc::new(Cell::new(0));
//! let changed = ChangeSignal::new("value_changed");
//! let model = Rc::new(Cell::new(42));
//!
//! let binding = GenericDataBinding::new(
//!     GenericProperty::new(&widget, |w| w.get(), |w, v| w.set(v)).with_signal(changed.clone()),
//!     GenericProperty::new(&model, |m| m.get(), |m, v| m.set(v)),
//!     UpdateValueStrategy::Both,
//! );
//!
//! binding.update_target();
//! assert_eq!(widget.get(), 42);
//!
//! // Simulated user edit: the widget changes and fires its native signal.
//! widget.set(7);
//! changed.emit();
//! assert_eq!(model.get(), 7);
//! ```
//!
//! # Invariants
//!
//! 1. The strategy never changes after construction.
//! 2. At most one change-signal subscription is registered, on the target,
//!    and only when the strategy permits target→model flow.
//! 3. Each transfer performs exactly one read and at most one write.
//! 4. A transfer that re-enters the same binding in the same direction is
//!    suppressed; re-entry in the opposite direction proceeds.
//! 5. Dropping the binding releases its subscription.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::property::ObservableValue;
use crate::signal::Subscription;
use crate::strategy::{Direction, UpdateValueStrategy};

/// Global counter for unique binding ids.
static BINDING_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a binding, used as a handle by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingId(u64);

impl BindingId {
    fn next() -> Self {
        Self(BINDING_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "binding#{}", self.0)
    }
}

/// Outcome of a single transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transfer {
    /// The source produced a value and it was handed to the destination.
    Written,
    /// The source read was absent; nothing was written.
    SourceAbsent,
    /// The binding was already transferring in this direction.
    Suppressed,
}

/// Contract shared by every binding held in a
/// [`DataBindingContext`](crate::DataBindingContext).
pub trait DataBinding {
    /// Handle of this binding.
    fn id(&self) -> BindingId;

    /// The strategy fixed at construction.
    fn strategy(&self) -> UpdateValueStrategy;

    /// Push the target's value into the model.
    fn update_model(&self) -> Transfer;

    /// Push the model's value into the target.
    fn update_target(&self) -> Transfer;

    /// Whether a target change listener is registered.
    fn is_listening(&self) -> bool {
        false
    }
}

/// Resets an in-flight flag on drop so a panicking setter cannot wedge the
/// binding.
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

struct Endpoints<T> {
    id: BindingId,
    target: Box<dyn ObservableValue<Value = T>>,
    model: Box<dyn ObservableValue<Value = T>>,
    pushing_model: Cell<bool>,
    pushing_target: Cell<bool>,
}

impl<T> Endpoints<T> {
    fn transfer(&self, direction: Direction) -> Transfer {
        let (source, destination, flag) = match direction {
            Direction::TargetToModel => (&self.target, &self.model, &self.pushing_model),
            Direction::ModelToTarget => (&self.model, &self.target, &self.pushing_target),
        };
        if flag.replace(true) {
            tracing::trace!(binding = %self.id, %direction, "re-entrant transfer suppressed");
            return Transfer::Suppressed;
        }
        let _in_flight = InFlight(flag);

        match source.get() {
            Some(value) => {
                destination.set(value);
                tracing::trace!(
                    binding = %self.id,
                    %direction,
                    from = source.label(),
                    to = destination.label(),
                    "value transferred"
                );
                Transfer::Written
            }
            None => {
                tracing::trace!(
                    binding = %self.id,
                    %direction,
                    from = source.label(),
                    "source absent; nothing written"
                );
                Transfer::SourceAbsent
            }
        }
    }
}

/// A binding between one target and one model of the same payload type.
pub struct GenericDataBinding<T> {
    endpoints: Rc<Endpoints<T>>,
    strategy: UpdateValueStrategy,
    subscription: Option<Subscription>,
}

impl<T: 'static> GenericDataBinding<T> {
    /// Link `target` and `model` under `strategy`.
    ///
    /// When the strategy permits target→model flow, a listener is
    /// registered on the target's change signal that runs
    /// [`update_model`](DataBinding::update_model). No value is transferred
    /// here; the initial push is the context's job.
    pub fn new(
        target: impl ObservableValue<Value = T> + 'static,
        model: impl ObservableValue<Value = T> + 'static,
        strategy: UpdateValueStrategy,
    ) -> Self {
        let endpoints = Rc::new(Endpoints {
            id: BindingId::next(),
            target: Box::new(target),
            model: Box::new(model),
            pushing_model: Cell::new(false),
            pushing_target: Cell::new(false),
        });

        let subscription = if strategy.listens_to_target() {
            let weak = Rc::downgrade(&endpoints);
            endpoints.target.subscribe(Box::new(move || {
                if let Some(endpoints) = weak.upgrade() {
                    endpoints.transfer(Direction::TargetToModel);
                }
            }))
        } else {
            None
        };

        tracing::debug!(
            binding = %endpoints.id,
            %strategy,
            target = endpoints.target.label(),
            model = endpoints.model.label(),
            listening = subscription.is_some(),
            "binding created"
        );

        Self {
            endpoints,
            strategy,
            subscription,
        }
    }
}

impl<T> DataBinding for GenericDataBinding<T> {
    fn id(&self) -> BindingId {
        self.endpoints.id
    }

    fn strategy(&self) -> UpdateValueStrategy {
        self.strategy
    }

    fn update_model(&self) -> Transfer {
        self.endpoints.transfer(Direction::TargetToModel)
    }

    fn update_target(&self) -> Transfer {
        self.endpoints.transfer(Direction::ModelToTarget)
    }

    fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }
}

impl<T> fmt::Debug for GenericDataBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericDataBinding")
            .field("id", &self.endpoints.id)
            .field("strategy", &self.strategy)
            .field("target", &self.endpoints.target.label())
            .field("model", &self.endpoints.model.label())
            .field("listening", &self.subscription.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{GenericProperty, ReadOnlyProperty};
    use crate::signal::ChangeSignal;
    use std::cell::RefCell;

    type BindingSlot = Rc<RefCell<Option<Rc<GenericDataBinding<String>>>>>;

    /// A widget stand-in: value plus a native change signal.
    struct Field<T> {
        value: RefCell<T>,
        changed: ChangeSignal,
    }

    impl<T: Clone + 'static> Field<T> {
        fn new(value: T) -> Rc<Self> {
            Rc::new(Self {
                value: RefCell::new(value),
                changed: ChangeSignal::new("changed"),
            })
        }

        fn property(self: &Rc<Self>) -> GenericProperty<T> {
            GenericProperty::new(
                self,
                |f| f.value.borrow().clone(),
                |f, v| *f.value.borrow_mut() = v,
            )
            .with_signal(self.changed.clone())
        }

        fn user_edit(&self, value: T) {
            *self.value.borrow_mut() = value;
            self.changed.emit();
        }

        fn get(&self) -> T {
            self.value.borrow().clone()
        }
    }

    fn cell_property<T: Clone + 'static>(cell: &Rc<RefCell<T>>) -> GenericProperty<T> {
        GenericProperty::new(cell, |c| c.borrow().clone(), |c, v| *c.borrow_mut() = v)
    }

    #[test]
    fn update_target_copies_model() {
        let widget = Field::new(String::new());
        let model = Rc::new(RefCell::new("hello".to_string()));
        let binding = GenericDataBinding::new(
            widget.property(),
            cell_property(&model),
            UpdateValueStrategy::Both,
        );

        assert_eq!(binding.update_target(), Transfer::Written);
        assert_eq!(widget.get(), "hello");
    }

    #[test]
    fn change_signal_drives_update_model() {
        let widget = Field::new(0);
        let model = Rc::new(RefCell::new(1));
        let binding = GenericDataBinding::new(
            widget.property(),
            cell_property(&model),
            UpdateValueStrategy::Both,
        );
        assert!(binding.is_listening());

        widget.user_edit(9);
        assert_eq!(*model.borrow(), 9);
    }

    #[test]
    fn model_to_target_registers_no_listener() {
        let widget = Field::new(0);
        let model = Rc::new(RefCell::new(1));
        let binding = GenericDataBinding::new(
            widget.property(),
            cell_property(&model),
            UpdateValueStrategy::ModelToTarget,
        );
        assert!(!binding.is_listening());
        assert_eq!(widget.changed.listener_count(), 0);

        widget.user_edit(5);
        assert_eq!(*model.borrow(), 1);
    }

    #[test]
    fn target_to_model_listens() {
        let widget = Field::new(0);
        let model = Rc::new(RefCell::new(1));
        let binding = GenericDataBinding::new(
            widget.property(),
            cell_property(&model),
            UpdateValueStrategy::TargetToModel,
        );
        assert!(binding.is_listening());
        widget.user_edit(3);
        assert_eq!(*model.borrow(), 3);
    }

    #[test]
    fn target_without_signal_still_binds() {
        let target = Rc::new(RefCell::new(0));
        let model = Rc::new(RefCell::new(4));
        let binding = GenericDataBinding::new(
            cell_property(&target),
            cell_property(&model),
            UpdateValueStrategy::Both,
        );
        assert!(!binding.is_listening());
        binding.update_target();
        assert_eq!(*target.borrow(), 4);
    }

    #[test]
    fn absent_source_skips_write() {
        let widget = Field::new(10);
        let binding = GenericDataBinding::new(
            widget.property(),
            GenericProperty::from_fn(|| None, |_| panic!("must not be written")),
            UpdateValueStrategy::Both,
        );
        assert_eq!(binding.update_target(), Transfer::SourceAbsent);
        assert_eq!(widget.get(), 10);
    }

    #[test]
    fn released_model_owner_is_safe() {
        let widget = Field::new(2);
        let model = Rc::new(RefCell::new(8));
        let binding = GenericDataBinding::new(
            widget.property(),
            cell_property(&model),
            UpdateValueStrategy::Both,
        );
        drop(model);

        assert_eq!(binding.update_target(), Transfer::SourceAbsent);
        assert_eq!(widget.get(), 2);
        assert_eq!(binding.update_model(), Transfer::Written);
    }

    #[test]
    fn exactly_one_read_per_transfer() {
        let reads = Rc::new(Cell::new(0u32));
        let writes = Rc::new(Cell::new(0u32));
        let r = Rc::clone(&reads);
        let w = Rc::clone(&writes);
        let binding = GenericDataBinding::new(
            GenericProperty::from_fn(|| Some(0), move |_| w.set(w.get() + 1)),
            GenericProperty::from_fn(
                move || {
                    r.set(r.get() + 1);
                    Some(1)
                },
                |_| {},
            ),
            UpdateValueStrategy::Both,
        );

        binding.update_target();
        assert_eq!(reads.get(), 1);
        assert_eq!(writes.get(), 1);
    }

    #[test]
    fn same_direction_reentry_is_suppressed() {
        let signal = ChangeSignal::new("changed");
        let target = Rc::new(RefCell::new(0));
        let model_writes = Rc::new(Cell::new(0u32));

        let echo = signal.clone();
        let writes = Rc::clone(&model_writes);
        let model = GenericProperty::from_fn(
            || Some(0),
            move |_| {
                writes.set(writes.get() + 1);
                // A model whose setter causes the target to fire again.
                echo.emit();
            },
        );
        let _binding = GenericDataBinding::new(
            cell_property(&target).with_signal(signal.clone()),
            model,
            UpdateValueStrategy::Both,
        );

        signal.emit();
        assert_eq!(model_writes.get(), 1);
    }

    #[test]
    fn opposite_direction_reentry_proceeds() {
        let widget = Field::new(String::from("73.9"));
        let model = Rc::new(RefCell::new(0.0_f32));
        let slot: BindingSlot = Rc::new(RefCell::new(None));

        let m = Rc::clone(&model);
        let back = Rc::clone(&slot);
        let model_prop = GenericProperty::from_fn(
            move || Some(format!("{}", m.borrow().round())),
            move |text: String| {
                *model.borrow_mut() = text.parse().unwrap_or(0.0);
                // The model pushes its normalized value back to the target.
                if let Some(binding) = back.borrow().as_ref() {
                    binding.update_target();
                }
            },
        );
        let binding = Rc::new(GenericDataBinding::new(
            widget.property(),
            model_prop,
            UpdateValueStrategy::Both,
        ));
        *slot.borrow_mut() = Some(Rc::clone(&binding));

        binding.update_model();
        assert_eq!(widget.get(), "74");

        slot.borrow_mut().take();
    }

    #[test]
    fn read_only_model_feeds_target() {
        let widget = Field::new("none");
        let state = Rc::new(Cell::new(true));
        let binding = GenericDataBinding::new(
            widget.property(),
            ReadOnlyProperty::new(&state, |s| if s.get() { "green" } else { "yellow" }),
            UpdateValueStrategy::ModelToTarget,
        );
        binding.update_target();
        assert_eq!(widget.get(), "green");
        state.set(false);
        binding.update_target();
        assert_eq!(widget.get(), "yellow");
    }

    #[test]
    fn drop_releases_subscription() {
        let widget = Field::new(0);
        let model = Rc::new(RefCell::new(0));
        let binding = GenericDataBinding::new(
            widget.property(),
            cell_property(&model),
            UpdateValueStrategy::Both,
        );
        drop(binding);

        widget.user_edit(5);
        assert_eq!(*model.borrow(), 0);
        assert_eq!(widget.changed.listener_count(), 0, "pruned on emit");
    }

    #[test]
    fn ids_are_unique() {
        let a = GenericDataBinding::new(
            GenericProperty::from_fn(|| Some(0), |_| {}),
            GenericProperty::from_fn(|| Some(0), |_| {}),
            UpdateValueStrategy::Both,
        );
        let b = GenericDataBinding::new(
            GenericProperty::from_fn(|| Some(0), |_| {}),
            GenericProperty::from_fn(|| Some(0), |_| {}),
            UpdateValueStrategy::Both,
        );
        assert_ne!(a.id(), b.id());
        assert!(a.id().to_string().starts_with("binding#"));
    }

    #[test]
    fn debug_format() {
        let binding = GenericDataBinding::new(
            GenericProperty::from_fn(|| Some(0), |_| {}).with_label("slider.value"),
            GenericProperty::from_fn(|| Some(0), |_| {}).with_label("model.value"),
            UpdateValueStrategy::ModelToTarget,
        );
        let dbg = format!("{binding:?}");
        assert!(dbg.contains("slider.value"));
        assert!(dbg.contains("ModelToTarget"));
    }
}
