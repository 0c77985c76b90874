#![forbid(unsafe_code)]

//! Behavioral properties of the binding engine, exercised through the
//! public API only.
//!
//! 1. Initial sync at bind time honors the strategy.
//! 2. `ModelToTarget` bindings never listen and never join model sweeps.
//! 3. Identity round-trips preserve the value.
//! 4. Percentage projections are idempotent after one normalization.
//! 5. Sweeps follow insertion order and honor exclusion.
//! 6. Released owners are safe to sweep over.
//! 7. Unsupported subscriptions are logged, not fatal.

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use tether_core::{
    ChangeSignal, DataBinding, DataBindingContext, GenericDataBinding, GenericProperty,
    ObservableValue, Transfer, UpdateValueStrategy,
};

// ── Helpers ─────────────────────────────────────────────────────────────

/// Widget stand-in whose programmatic writes never fire the signal.
struct Widget<T> {
    value: RefCell<T>,
    changed: ChangeSignal,
    writes: Cell<u32>,
}

impl<T: Clone + 'static> Widget<T> {
    fn new(value: T) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(value),
            changed: ChangeSignal::new("value_changed"),
            writes: Cell::new(0),
        })
    }

    fn property(self: &Rc<Self>) -> GenericProperty<T> {
        GenericProperty::new(
            self,
            |w| w.value.borrow().clone(),
            |w, v| {
                w.writes.set(w.writes.get() + 1);
                *w.value.borrow_mut() = v;
            },
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

fn field<T: Clone + 'static>(owner: &Rc<RefCell<T>>) -> GenericProperty<T> {
    GenericProperty::for_cell(owner, |v| v.clone(), |v, new| *v = new)
}

/// Percentage projection of a fractional model value.
fn percent_property(owner: &Rc<RefCell<f32>>) -> GenericProperty<String> {
    GenericProperty::for_cell(
        owner,
        |v| format!("{}", (*v * 100.0).round() as i64),
        |v, text: String| *v = text.trim().parse::<f32>().map_or(0.0, |n| n / 100.0),
    )
}

fn strategy() -> impl Strategy<Value = UpdateValueStrategy> {
    prop_oneof![
        Just(UpdateValueStrategy::ModelToTarget),
        Just(UpdateValueStrategy::TargetToModel),
        Just(UpdateValueStrategy::Both),
    ]
}

/// In-memory writer for capturing log output.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

// ── Strategy semantics ──────────────────────────────────────────────────

#[test]
fn both_reflects_model_after_bind() {
    let ctx = DataBindingContext::new();
    let widget = Widget::new(String::new());
    let model = Rc::new(RefCell::new("my Name".to_string()));
    ctx.bind(widget.property(), field(&model));
    assert_eq!(widget.get(), "my Name");

    // Re-syncing is idempotent.
    ctx.update_targets(None);
    assert_eq!(widget.get(), "my Name");
}

#[test]
fn target_to_model_has_no_initial_write() {
    let ctx = DataBindingContext::new();
    let widget = Widget::new(1);
    let model = Rc::new(RefCell::new(2));
    ctx.bind_value(
        widget.property(),
        field(&model),
        UpdateValueStrategy::TargetToModel,
    );
    assert_eq!(widget.writes.get(), 0);
    assert_eq!(widget.get(), 1);
}

#[test]
fn model_to_target_never_listens_nor_updates_model() {
    let ctx = DataBindingContext::new();
    let widget = Widget::new(false);
    let model = Rc::new(RefCell::new(true));
    let id = ctx.bind_value(
        widget.property(),
        field(&model),
        UpdateValueStrategy::ModelToTarget,
    );

    assert_eq!(ctx.is_listening(id), Some(false));
    assert_eq!(widget.changed.listener_count(), 0);

    widget.user_edit(false);
    ctx.update_models(None);
    assert!(*model.borrow());
}

// ── Round trips ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn identity_round_trip_preserves_value(v in any::<i64>(), s in strategy()) {
        let widget = Widget::new(0_i64);
        let model = Rc::new(RefCell::new(v));
        let binding = GenericDataBinding::new(widget.property(), field(&model), s);

        binding.update_target();
        binding.update_model();
        prop_assert_eq!(*model.borrow(), v);
    }

    #[test]
    fn percent_round_trip_is_idempotent_after_first_pass(v in 0.0f32..=1.0) {
        let widget = Widget::new(String::new());
        let model = Rc::new(RefCell::new(v));
        let binding = GenericDataBinding::new(
            widget.property(),
            percent_property(&model),
            UpdateValueStrategy::Both,
        );

        binding.update_target();
        binding.update_model();
        let normalized = *model.borrow();
        let shown = widget.get();

        binding.update_target();
        binding.update_model();
        prop_assert_eq!(*model.borrow(), normalized);
        prop_assert_eq!(widget.get(), shown);
    }

    #[test]
    fn strategy_decides_listener(s in strategy()) {
        let widget = Widget::new(0_u8);
        let model = Rc::new(RefCell::new(0_u8));
        let binding = GenericDataBinding::new(widget.property(), field(&model), s);
        prop_assert_eq!(binding.is_listening(), s.listens_to_target());
    }

    #[test]
    fn sweeps_visit_in_insertion_order(count in 1usize..12) {
        let ctx = DataBindingContext::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..count {
            let l = Rc::clone(&log);
            ctx.bind(
                GenericProperty::from_fn(|| None, |_| {}),
                GenericProperty::from_fn(move || { l.borrow_mut().push(i); Some(i) }, |_| {}),
            );
        }
        log.borrow_mut().clear();

        ctx.update_targets(None);
        let expected: Vec<usize> = (0..count).collect();
        prop_assert_eq!(&*log.borrow(), &expected);
    }
}

// ── Bulk sweeps ─────────────────────────────────────────────────────────

#[test]
fn exclusion_leaves_excluded_model_untouched() {
    let ctx = DataBindingContext::new();
    let widgets = [Widget::new(0), Widget::new(0), Widget::new(0)];
    let models = [
        Rc::new(RefCell::new(0)),
        Rc::new(RefCell::new(0)),
        Rc::new(RefCell::new(0)),
    ];
    // Target-to-model bindings: widget edits only reach the model in sweeps.
    let ids: Vec<_> = widgets
        .iter()
        .zip(&models)
        .map(|(w, m)| {
            ctx.bind_value(
                GenericProperty::new(w, |w| *w.value.borrow(), |w, v| *w.value.borrow_mut() = v),
                field(m),
                UpdateValueStrategy::TargetToModel,
            )
        })
        .collect();

    for (i, w) in widgets.iter().enumerate() {
        *w.value.borrow_mut() = i as i32 + 1;
    }
    ctx.update_models(Some(ids[1]));

    assert_eq!(*models[0].borrow(), 1);
    assert_eq!(*models[1].borrow(), 0);
    assert_eq!(*models[2].borrow(), 3);
}

#[test]
fn released_model_owner_leaves_target_unchanged() {
    let ctx = DataBindingContext::new();
    let widget = Widget::new(String::new());
    let model = Rc::new(RefCell::new("kept".to_string()));
    let id = ctx.bind(widget.property(), field(&model));
    assert_eq!(widget.get(), "kept");

    drop(model);
    let summary = ctx.update_targets(None);
    assert_eq!(summary.absent, 1);
    assert_eq!(widget.get(), "kept");
    assert!(ctx.contains(id), "released owners are not compacted away");
}

#[test]
fn released_target_owner_is_safe_on_signal_path() {
    let model = Rc::new(RefCell::new(5));
    let signal = ChangeSignal::new("value_changed");
    let binding = {
        let widget = Widget::new(0);
        GenericDataBinding::new(
            GenericProperty::new(&widget, |w| *w.value.borrow(), |w, v| *w.value.borrow_mut() = v)
                .with_signal(signal.clone()),
            field(&model),
            UpdateValueStrategy::Both,
        )
    };

    signal.emit();
    assert_eq!(*model.borrow(), 5);
    assert_eq!(binding.update_model(), Transfer::SourceAbsent);
}

// ── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn percentage_scenario() {
    let ctx = DataBindingContext::new();
    let text = Widget::new(String::new());
    let value = Rc::new(RefCell::new(0.5_f32));
    ctx.bind(text.property(), percent_property(&value));
    assert_eq!(text.get(), "50");

    text.user_edit("73".to_string());
    assert!((*value.borrow() - 0.73).abs() < 1e-6);

    text.user_edit("abc".to_string());
    assert_eq!(*value.borrow(), 0.0);
}

#[test]
fn shared_model_field_stays_consistent() {
    let ctx = DataBindingContext::new();
    let slider = Widget::new(0.0_f32);
    let text = Widget::new(String::new());
    let value = Rc::new(RefCell::new(0.5_f32));

    ctx.bind(slider.property(), field(&value));
    ctx.bind(text.property(), percent_property(&value));
    assert_eq!(slider.get(), 0.5);
    assert_eq!(text.get(), "50");

    slider.user_edit(0.25);
    assert_eq!(*value.borrow(), 0.25);
    assert_eq!(text.get(), "50", "model to target is never automatic");

    ctx.update_targets(None);
    assert_eq!(text.get(), "25");

    text.user_edit("80".to_string());
    ctx.update_targets(None);
    assert!((slider.get() - 0.8).abs() < 1e-6);
}

// ── Logging ─────────────────────────────────────────────────────────────

#[test]
fn unsupported_subscription_is_logged_not_fatal() {
    let logs = capture_logs(|| {
        let ctx = DataBindingContext::new();
        let target = Rc::new(RefCell::new(0));
        let model = Rc::new(RefCell::new(3));
        let id = ctx.bind(field(&target).with_label("background"), field(&model));
        assert_eq!(ctx.is_listening(id), Some(false));
        assert_eq!(*target.borrow(), 3);
    });
    assert!(logs.contains("change subscription not supported"), "{logs}");
    assert!(logs.contains("background"), "{logs}");
}

#[test]
fn sweep_runs_inside_span() {
    let logs = capture_logs(|| {
        let ctx = DataBindingContext::with_label("settings");
        let target = Rc::new(RefCell::new(0));
        let model = Rc::new(RefCell::new(1));
        ctx.bind(field(&target), field(&model));
        ctx.update_targets(None);
    });
    assert!(logs.contains("binding_sweep"), "{logs}");
    assert!(logs.contains("sweep finished"), "{logs}");
}

#[test]
fn read_only_target_write_is_traced() {
    let logs = capture_logs(|| {
        let shown = Rc::new(Cell::new(1));
        let prop = tether_core::ReadOnlyProperty::new(&shown, Cell::get);
        prop.set(2);
        assert_eq!(shown.get(), 1);
    });
    assert!(logs.contains("read-only"), "{logs}");
}
