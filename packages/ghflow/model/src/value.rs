//! Scalar values used for action inputs, environment variables and matrix axes.

use serde::Serialize;

/// A scalar that can appear as an action input, an environment variable value,
/// or a matrix axis value.
///
/// Template expressions such as `${{ secrets.TOKEN }}` are plain
/// [`InputValue::String`]s; they are never interpreted.
///
/// # Examples
///
/// ```
/// use ghflow_model::InputValue;
///
/// assert_eq!(InputValue::from("stable"), InputValue::String("stable".to_string()));
/// assert_eq!(InputValue::from(7_u32), InputValue::Integer(7));
/// assert_eq!(InputValue::from(true), InputValue::Bool(true));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputValue {
    /// String scalar, emitted literally
    String(String),
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Integer(i64),
    /// Floating point scalar.
    ///
    /// Floats are emitted in their shortest form, so `3.10` renders as `3.1`.
    /// Version-like values (`python-version`, `go-version`, ...) must be
    /// strings.
    Float(f64),
}

impl InputValue {
    /// Returns the string contents if this is a string scalar
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::Bool(_) | Self::Integer(_) | Self::Float(_) => None,
        }
    }

    /// Returns the integer value if this is an integer scalar
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::String(_) | Self::Bool(_) | Self::Float(_) => None,
        }
    }

    /// Returns the boolean value if this is a boolean scalar
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::String(_) | Self::Integer(_) | Self::Float(_) => None,
        }
    }
}

impl std::fmt::Display for InputValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<&String> for InputValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Version numbers belong in strings; `3.10_f64` is emitted as `3.1`.
impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for InputValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for InputValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            /// Values beyond `i64::MAX` are emitted as their decimal string
            impl From<$ty> for InputValue {
                fn from(value: $ty) -> Self {
                    i64::try_from(value)
                        .map_or_else(|_| Self::String(value.to_string()), Self::Integer)
                }
            }
        )*
    };
}

impl_from_wide_integer!(u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_integer_conversions_widen_to_i64() {
        assert_eq!(InputValue::from(-3_i8), InputValue::Integer(-3));
        assert_eq!(InputValue::from(65_535_u16), InputValue::Integer(65_535));
        assert_eq!(
            InputValue::from(u32::MAX),
            InputValue::Integer(i64::from(u32::MAX))
        );
    }

    #[test_log::test]
    fn test_wide_integers_fall_back_to_strings_past_i64() {
        assert_eq!(InputValue::from(42_u64), InputValue::Integer(42));
        assert_eq!(InputValue::from(7_usize), InputValue::Integer(7));
        assert_eq!(
            InputValue::from(u64::MAX),
            InputValue::String("18446744073709551615".to_string())
        );
    }

    #[test_log::test]
    fn test_floats_drop_trailing_zeros_but_strings_do_not() {
        let yaml = serde_yaml::to_string(&vec![
            InputValue::from(3.10_f64),
            InputValue::from("3.10"),
        ])
        .unwrap();
        let reparsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(reparsed[0].as_f64(), Some(3.1));
        assert_eq!(reparsed[1].as_str(), Some("3.10"));
    }

    #[test_log::test]
    fn test_untagged_serialization_emits_bare_scalars() {
        let values = vec![
            InputValue::from("./build"),
            InputValue::from(7_u32),
            InputValue::from(false),
        ];

        let yaml = serde_yaml::to_string(&values).unwrap();

        assert_eq!(yaml, "- ./build\n- 7\n- false\n");
    }

    #[test_log::test]
    fn test_numeric_looking_strings_stay_strings() {
        let yaml = serde_yaml::to_string(&InputValue::from("1.70")).unwrap();
        let reparsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(reparsed.as_str(), Some("1.70"));
    }

    #[test_log::test]
    fn test_accessors() {
        assert_eq!(InputValue::from("x").as_str(), Some("x"));
        assert_eq!(InputValue::from(2_i32).as_integer(), Some(2));
        assert_eq!(InputValue::from(true).as_bool(), Some(true));
        assert_eq!(InputValue::from(true).as_str(), None);
    }
}
