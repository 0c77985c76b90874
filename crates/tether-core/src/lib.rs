#![forbid(unsafe_code)]

//! Pairwise two-way data binding for Tether.
//!
//! The engine keeps a *model* value (a field of a view-model) synchronized
//! with a *target* value (a widget's displayed property):
//!
//! - [`ObservableValue`]: the contract of a bindable endpoint, read/write
//!   access plus an optional native change signal.
//! - [`GenericProperty`] / [`ReadOnlyProperty`]: closure-backed endpoints
//!   over a weakly held owner.
//! - [`ChangeSignal`] / [`Subscription`]: explicit observer registration
//!   with RAII disconnection.
//! - [`UpdateValueStrategy`]: which directions a binding synchronizes.
//! - [`GenericDataBinding`]: links one target to one model.
//! - [`DataBindingContext`] / [`DataBindingContextOwner`]: owns the bindings
//!   of one controller and drives bulk sweeps.
//!
//! # Architecture
//!
//! Everything is single-threaded (`Rc`/`RefCell`) and synchronous. The only
//! automatic trigger is a target's change signal, which runs the binding's
//! target→model transfer. Model→target propagation is always explicit, via
//! [`DataBindingContext::update_targets`].
//!
//! # Invariants
//!
//! 1. Properties never extend their owner's lifetime; a released owner
//!    reads as absent and ignores writes.
//! 2. An absent read skips the corresponding write and nothing else.
//! 3. Bulk sweeps visit bindings in insertion order.
//! 4. Target and model of a binding share one payload type, checked at
//!    compile time.

pub mod accessor;
pub mod binding;
pub mod context;
pub mod property;
pub mod signal;
pub mod strategy;

pub use accessor::{Accessor, AccessorError, NamedAccessors};
pub use binding::{BindingId, DataBinding, GenericDataBinding, Transfer};
pub use context::{DataBindingContext, DataBindingContextOwner, SweepSummary};
pub use property::{
    BoolProperty, GenericProperty, ObservableValue, ReadOnlyProperty, TextProperty, ValueProperty,
};
pub use signal::{ChangeSignal, Subscription};
pub use strategy::{Direction, StrategyParseError, UpdateValueStrategy};
