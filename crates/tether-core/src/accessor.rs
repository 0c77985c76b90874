#![forbid(unsafe_code)]

//! Typed field accessors and name-keyed accessor tables.
//!
//! There is no runtime reflection: a field is reachable by name only if the
//! caller registered an [`Accessor`] for it in a [`NamedAccessors`] table.
//! The [`accessor!`](crate::accessor!) and
//! [`named_accessors!`](crate::named_accessors!) macros generate the typed
//! closure pairs at compile time.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unknown name | No accessor registered | [`AccessorError::Unknown`] |
//! | Type mismatch | Registered for a different `T` | [`AccessorError::TypeMismatch`] |
//! | Duplicate name | `insert` twice | Last write wins (logged) |

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A typed getter/setter pair over a field of `O`.
pub struct Accessor<O, T> {
    get: Rc<dyn Fn(&O) -> T>,
    set: Rc<dyn Fn(&mut O, T)>,
}

impl<O, T> Clone for Accessor<O, T> {
    fn clone(&self) -> Self {
        Self {
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

impl<O, T> fmt::Debug for Accessor<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("owner", &type_name::<O>())
            .field("value", &type_name::<T>())
            .finish()
    }
}

impl<O, T> Accessor<O, T> {
    /// Build an accessor from a getter and a setter.
    pub fn new(get: impl Fn(&O) -> T + 'static, set: impl Fn(&mut O, T) + 'static) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Read the field from `owner`.
    pub fn get(&self, owner: &O) -> T {
        (self.get)(owner)
    }

    /// Write `value` into the field of `owner`.
    pub fn set(&self, owner: &mut O, value: T) {
        (self.set)(owner, value)
    }
}

/// Errors from resolving a named accessor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessorError {
    /// Nothing is registered under the name.
    #[error("no accessor registered under '{name}'")]
    Unknown { name: String },
    /// The name is registered for a different value type.
    #[error("accessor '{name}' yields {registered}, not {requested}")]
    TypeMismatch {
        name: String,
        registered: &'static str,
        requested: &'static str,
    },
}

struct Entry {
    value_type: &'static str,
    accessor: Box<dyn Any>,
}

/// Caller-maintained mapping from field names to typed accessors of `O`.
///
/// # Example
///
/// ```
/// use tether_core::accessor::NamedAccessors;
/// use tether_core::accessor;
///
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let mut table = NamedAccessors::<Person>::new();
/// table.insert("name", accessor!(Person, name));
/// table.insert("age", accessor!(Person, age));
///
/// let mut p = Person { name: "Ada".into(), age: 36 };
/// let age = table.resolve::<u32>("age").unwrap();
/// age.set(&mut p, 37);
/// assert_eq!(p.age, 37);
/// assert!(table.resolve::<String>("age").is_err());
/// ```
pub struct NamedAccessors<O> {
    entries: HashMap<String, Entry>,
    _owner: std::marker::PhantomData<fn(&O)>,
}

impl<O: 'static> NamedAccessors<O> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            _owner: std::marker::PhantomData,
        }
    }

    /// Register `accessor` under `name`, replacing any previous entry.
    pub fn insert<T: 'static>(
        &mut self,
        name: impl Into<String>,
        accessor: Accessor<O, T>,
    ) -> &mut Self {
        let name = name.into();
        let entry = Entry {
            value_type: type_name::<T>(),
            accessor: Box::new(accessor),
        };
        if let Some(previous) = self.entries.insert(name.clone(), entry) {
            tracing::debug!(
                name = %name,
                previous = previous.value_type,
                "named accessor replaced"
            );
        }
        self
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with<T: 'static>(mut self, name: impl Into<String>, accessor: Accessor<O, T>) -> Self {
        self.insert(name, accessor);
        self
    }

    /// Look up the accessor registered under `name` for value type `T`.
    pub fn resolve<T: 'static>(&self, name: &str) -> Result<Accessor<O, T>, AccessorError> {
        let entry = self.entries.get(name).ok_or_else(|| AccessorError::Unknown {
            name: name.to_string(),
        })?;
        entry
            .accessor
            .downcast_ref::<Accessor<O, T>>()
            .cloned()
            .ok_or_else(|| AccessorError::TypeMismatch {
                name: name.to_string(),
                registered: entry.value_type,
                requested: type_name::<T>(),
            })
    }

    /// Whether any accessor is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered accessors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<O: 'static> Default for NamedAccessors<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> fmt::Debug for NamedAccessors<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.value_type))
            .collect();
        names.sort_unstable();
        f.debug_struct("NamedAccessors")
            .field("owner", &type_name::<O>())
            .field("entries", &names)
            .finish()
    }
}

/// Generate an [`Accessor`] for a named field of a struct.
///
/// The getter clones the field; the setter assigns it.
///
/// ```
/// use tether_core::accessor;
///
/// struct Model { value: f32 }
///
/// let acc = accessor!(Model, value);
/// let mut m = Model { value: 0.5 };
/// acc.set(&mut m, 0.25);
/// assert_eq!(acc.get(&m), 0.25);
/// ```
#[macro_export]
macro_rules! accessor {
    ($owner:ty, $field:ident) => {
        $crate::accessor::Accessor::new(
            |owner: &$owner| ::std::clone::Clone::clone(&owner.$field),
            |owner: &mut $owner, value| owner.$field = value,
        )
    };
}

/// Build a [`NamedAccessors`] table keyed by field name.
///
/// ```
/// use tether_core::named_accessors;
///
/// struct Model { name: String, state: bool }
///
/// let table = named_accessors!(Model { name, state });
/// assert_eq!(table.len(), 2);
/// assert!(table.resolve::<bool>("state").is_ok());
/// ```
#[macro_export]
macro_rules! named_accessors {
    ($owner:ty { $($field:ident),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut table = $crate::accessor::NamedAccessors::<$owner>::new();
        $(
            table.insert(stringify!($field), $crate::accessor!($owner, $field));
        )*
        table
    }};
}
