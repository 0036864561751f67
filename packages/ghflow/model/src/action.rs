//! The contract every reusable-action wrapper satisfies.
//!
//! A wrapper is a plain value type with one field per input of the wrapped
//! action. It reports a fixed `uses` reference and the inputs the author
//! actually set, so the renderer can emit it without knowing anything about
//! the action itself. Most wrappers are declared with [`step_action!`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::InputValue;

/// A typed adapter for one third-party reusable action.
///
/// Implementations must return the same [`reference`](Self::reference) for
/// every value of the type, and must only report inputs whose value is *set*
/// (see [`InputField`] for what counts as set).
///
/// # Examples
///
/// ```
/// use ghflow_model::{Inputs, StepAction};
///
/// #[derive(Debug)]
/// struct Greet {
///     who: String,
/// }
///
/// impl StepAction for Greet {
///     fn reference(&self) -> &str {
///         "octo-org/greet@v1"
///     }
///
///     fn inputs(&self) -> Inputs {
///         let mut inputs = Inputs::new();
///         inputs.field("who", &self.who);
///         inputs
///     }
/// }
///
/// let greet = Greet { who: String::new() };
/// assert!(greet.inputs().is_empty());
/// ```
pub trait StepAction: std::fmt::Debug + Send + Sync {
    /// The `owner/repo@ref` (or `owner/repo/path@ref`) emitted as `uses`.
    fn reference(&self) -> &str;

    /// The inputs emitted under `with`.
    fn inputs(&self) -> Inputs;
}

/// The `with` mapping of an action step.
///
/// Keys iterate (and serialize) in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Inputs(BTreeMap<String, InputValue>);

impl Inputs {
    /// Creates an empty input set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Records `value` under `key` if the value is set.
    ///
    /// Unset values (empty strings, zero integers, `false`, empty lists and
    /// `None`) are skipped.
    pub fn field<F: InputField + ?Sized>(&mut self, key: &str, value: &F) -> &mut Self {
        if let Some(value) = value.to_input() {
            self.0.insert(key.to_string(), value);
        }
        self
    }

    /// Records `value` under `key` unconditionally
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<InputValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Looks up the value recorded under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.0.get(key)
    }

    /// Whether an input is recorded under `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether no input is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of inputs set
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the inputs in key order
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, InputValue> {
        self.0.iter()
    }

    /// Consumes the set, returning the underlying sorted map
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, InputValue> {
        self.0
    }
}

impl From<BTreeMap<String, InputValue>> for Inputs {
    fn from(value: BTreeMap<String, InputValue>) -> Self {
        Self(value)
    }
}

impl<K: Into<String>, V: Into<InputValue>> FromIterator<(K, V)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Inputs {
    type Item = (String, InputValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, InputValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Inputs {
    type Item = (&'a String, &'a InputValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, InputValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A wrapper field type, and the rule deciding whether its value is set.
///
/// * `String`/`str`: set unless empty
/// * integers: set unless zero; `u64`/`usize` values past `i64::MAX` are
///   emitted as strings
/// * `bool`: set only when `true`
/// * `Vec<String>`: set unless empty, emitted newline-separated
/// * `Option<T>`: a tri-state, set whenever it is `Some`, including
///   `Some(0)`, `Some(false)` and `Some(String::new())`
pub trait InputField {
    /// The value to emit, or `None` when the field is unset
    fn to_input(&self) -> Option<InputValue>;
}

impl InputField for str {
    fn to_input(&self) -> Option<InputValue> {
        (!self.is_empty()).then(|| InputValue::String(self.to_string()))
    }
}

impl InputField for String {
    fn to_input(&self) -> Option<InputValue> {
        self.as_str().to_input()
    }
}

impl InputField for bool {
    fn to_input(&self) -> Option<InputValue> {
        self.then_some(InputValue::Bool(true))
    }
}

impl InputField for Vec<String> {
    fn to_input(&self) -> Option<InputValue> {
        (!self.is_empty()).then(|| InputValue::String(self.join("\n")))
    }
}

impl<T: Clone + Into<InputValue>> InputField for Option<T> {
    fn to_input(&self) -> Option<InputValue> {
        self.clone().map(Into::into)
    }
}

macro_rules! impl_integer_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl InputField for $ty {
                fn to_input(&self) -> Option<InputValue> {
                    (*self != 0).then(|| InputValue::from(*self))
                }
            }
        )*
    };
}

impl_integer_field!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// Declares a reusable-action wrapper from a table of its inputs.
///
/// Each row maps a Rust field to the action's input key. The generated type
/// derives `Default`, exposes a `REFERENCE` constant, a `new()` constructor,
/// one chainable setter per field, and implements [`StepAction`] by feeding
/// every field through [`Inputs::field`].
///
/// # Examples
///
/// ```
/// use ghflow_model::{StepAction, step_action};
///
/// step_action! {
///     /// Posts a message to a chat channel
///     pub struct Notify("octo-org/notify@v2") {
///         /// Channel to post to
///         channel: String => "channel",
///         /// Retry count
///         retries: u32 => "retries",
///         /// Mention everyone
///         mention_all: bool => "mention-all",
///     }
/// }
///
/// let notify = Notify::new().channel("#builds").retries(3_u32);
///
/// assert_eq!(notify.reference(), "octo-org/notify@v2");
/// assert_eq!(notify.inputs().len(), 2);
/// ```
#[macro_export]
macro_rules! step_action {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($reference:literal) {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $ty:ty => $key:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $name {
            /// The `uses` reference of this action
            pub const REFERENCE: &'static str = $reference;

            /// Creates the action with every input unset
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            $(
                $(#[$field_meta])*
                #[must_use]
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = value.into();
                    self
                }
            )*
        }

        impl $crate::StepAction for $name {
            fn reference(&self) -> &str {
                Self::REFERENCE
            }

            fn inputs(&self) -> $crate::Inputs {
                #[allow(unused_mut)]
                let mut inputs = $crate::Inputs::new();
                $(
                    inputs.field($key, &self.$field);
                )*
                inputs
            }
        }
    };
}
