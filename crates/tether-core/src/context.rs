#![forbid(unsafe_code)]

//! Binding context: the per-owner collection of bindings and its bulk
//! synchronization sweeps.
//!
//! # Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tether_core::{DataBindingContext, GenericProperty, UpdateValueStrategy};
//!
//! let ctx = DataBindingContext::with_label("settings");
//! let model = Rc::new(RefCell::new(String::from("Ada")));
//! let shown = Rc::new(RefCell::new(String::new()));
//!
//! ctx.bind_value(
//!     GenericProperty::for_cell(&shown, |s| s.clone(), |s, v| *s = v),
//!     GenericProperty::for_cell(&model, |m| m.clone(), |m, v| *m = v),
//!     UpdateValueStrategy::Both,
//! );
//! assert_eq!(*shown.borrow(), "Ada", "initial push at bind time");
//!
//! *model.borrow_mut() = String::from("Grace");
//! ctx.update_targets(None);
//! assert_eq!(*shown.borrow(), "Grace");
//! ```
//!
//! # Invariants
//!
//! 1. Sweeps visit bindings strictly in insertion order.
//! 2. `update_models` never visits `ModelToTarget` bindings;
//!    `update_targets` never visits `TargetToModel` bindings.
//! 3. An excluded binding is skipped for that call only.
//! 4. An absent read in one binding never stops a sweep.
//! 5. Sweeps work on a snapshot of the binding list, so endpoint setters
//!    may re-enter the context (bind, unbind, or start another sweep).
//!
//! # Failure Modes
//!
//! - `unbind()` of an unknown id returns `false`.
//! - Bindings whose endpoint owners were released stay in the list and
//!   report [`Transfer::SourceAbsent`] until removed with `unbind()`.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::binding::{BindingId, DataBinding, GenericDataBinding, Transfer};
use crate::property::ObservableValue;
use crate::strategy::{Direction, UpdateValueStrategy};

/// Per-outcome counts of one bulk sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Bindings visited by the sweep.
    pub visited: usize,
    /// Transfers that handed a value to the destination.
    pub written: usize,
    /// Transfers skipped because the source read was absent.
    pub absent: usize,
    /// Transfers suppressed as re-entrant.
    pub suppressed: usize,
}

impl SweepSummary {
    fn record(&mut self, transfer: Transfer) {
        self.visited += 1;
        match transfer {
            Transfer::Written => self.written += 1,
            Transfer::SourceAbsent => self.absent += 1,
            Transfer::Suppressed => self.suppressed += 1,
        }
    }
}

/// Holds every binding of one owner and drives bulk synchronization.
///
/// All methods take `&self`; the binding list lives behind a `RefCell`
/// that is never borrowed while endpoint code runs.
pub struct DataBindingContext {
    label: Cow<'static, str>,
    bindings: RefCell<Vec<Rc<dyn DataBinding>>>,
}

impl DataBindingContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::with_label("context")
    }

    /// Create an empty context named `label` in log output.
    #[must_use]
    pub fn with_label(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            bindings: RefCell::new(Vec::new()),
        }
    }

    /// The context's log label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Bind `target` to `model` under `strategy` and return the binding's
    /// handle.
    ///
    /// Unless the strategy is `TargetToModel`, the model's current value is
    /// pushed into the target immediately.
    pub fn bind_value<T: 'static>(
        &self,
        target: impl ObservableValue<Value = T> + 'static,
        model: impl ObservableValue<Value = T> + 'static,
        strategy: UpdateValueStrategy,
    ) -> BindingId {
        self.append_binding(GenericDataBinding::new(target, model, strategy))
    }

    /// [`bind_value`](Self::bind_value) with [`UpdateValueStrategy::Both`].
    pub fn bind<T: 'static>(
        &self,
        target: impl ObservableValue<Value = T> + 'static,
        model: impl ObservableValue<Value = T> + 'static,
    ) -> BindingId {
        self.bind_value(target, model, UpdateValueStrategy::Both)
    }

    /// Take ownership of an already constructed binding.
    ///
    /// Performs the same initial push as [`bind_value`](Self::bind_value).
    pub fn append_binding(&self, binding: impl DataBinding + 'static) -> BindingId {
        let binding: Rc<dyn DataBinding> = Rc::new(binding);
        let id = binding.id();
        let strategy = binding.strategy();
        self.bindings.borrow_mut().push(Rc::clone(&binding));
        tracing::debug!(context = %self.label, binding = %id, %strategy, "binding added");

        if strategy.allows(Direction::ModelToTarget) {
            binding.update_target();
        }
        id
    }

    /// Push every eligible target value into its model, in insertion order.
    pub fn update_models(&self, exclude: Option<BindingId>) -> SweepSummary {
        self.sweep(Direction::TargetToModel, exclude)
    }

    /// Push every eligible model value into its target, in insertion order.
    pub fn update_targets(&self, exclude: Option<BindingId>) -> SweepSummary {
        self.sweep(Direction::ModelToTarget, exclude)
    }

    fn sweep(&self, direction: Direction, exclude: Option<BindingId>) -> SweepSummary {
        let snapshot: Vec<Rc<dyn DataBinding>> = self
            .bindings
            .borrow()
            .iter()
            .filter(|b| b.strategy().allows(direction) && Some(b.id()) != exclude)
            .cloned()
            .collect();

        let _span = tracing::debug_span!(
            "binding_sweep",
            context = %self.label,
            %direction,
            bindings = snapshot.len()
        )
        .entered();

        let mut summary = SweepSummary::default();
        for binding in &snapshot {
            let transfer = match direction {
                Direction::TargetToModel => binding.update_model(),
                Direction::ModelToTarget => binding.update_target(),
            };
            summary.record(transfer);
        }

        tracing::debug!(
            written = summary.written,
            absent = summary.absent,
            suppressed = summary.suppressed,
            excluded = exclude.map(|id| id.get()),
            "sweep finished"
        );
        summary
    }

    /// Remove and drop the binding with `id`. Returns whether it existed.
    pub fn unbind(&self, id: BindingId) -> bool {
        let removed = {
            let mut bindings = self.bindings.borrow_mut();
            bindings
                .iter()
                .position(|b| b.id() == id)
                .map(|index| bindings.remove(index))
        };
        // Dropped outside the borrow: releasing a subscription may run
        // arbitrary drop code.
        let existed = removed.is_some();
        drop(removed);
        if existed {
            tracing::debug!(context = %self.label, binding = %id, "binding removed");
        }
        existed
    }

    /// Whether a binding with `id` is held.
    #[must_use]
    pub fn contains(&self, id: BindingId) -> bool {
        self.bindings.borrow().iter().any(|b| b.id() == id)
    }

    /// Strategy of the binding with `id`.
    #[must_use]
    pub fn strategy_of(&self, id: BindingId) -> Option<UpdateValueStrategy> {
        self.bindings
            .borrow()
            .iter()
            .find(|b| b.id() == id)
            .map(|b| b.strategy())
    }

    /// Whether the binding with `id` listens to its target's change signal.
    #[must_use]
    pub fn is_listening(&self, id: BindingId) -> Option<bool> {
        self.bindings
            .borrow()
            .iter()
            .find(|b| b.id() == id)
            .map(|b| b.is_listening())
    }

    /// Handles of all bindings, in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<BindingId> {
        self.bindings.borrow().iter().map(|b| b.id()).collect()
    }

    /// Number of bindings held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    /// Whether the context holds no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }

    /// Drop every binding.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.bindings.borrow_mut());
        tracing::debug!(context = %self.label, removed = drained.len(), "bindings cleared");
        drop(drained);
    }
}

impl Default for DataBindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataBindingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataBindingContext")
            .field("label", &self.label)
            .field("binding_count", &self.bindings.borrow().len())
            .finish()
    }
}

/// Implemented by a controller that hosts exactly one binding context.
///
/// The provided methods forward bulk sweeps, so application code can ask
/// the owner to resynchronize without reaching into the context.
pub trait DataBindingContextOwner {
    /// The owner's context.
    fn data_binding_context(&self) -> &DataBindingContext;

    /// See [`DataBindingContext::update_models`].
    fn update_models(&self, exclude: Option<BindingId>) -> SweepSummary {
        self.data_binding_context().update_models(exclude)
    }

    /// See [`DataBindingContext::update_targets`].
    fn update_targets(&self, exclude: Option<BindingId>) -> SweepSummary {
        self.data_binding_context().update_targets(exclude)
    }
}

impl DataBindingContextOwner for DataBindingContext {
    fn data_binding_context(&self) -> &DataBindingContext {
        self
    }
}
