use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::{Describe, Mappable};

// -----------------------------------------------------------------------------
// Value

/// A value produced by resolving raw JSON against a declared type.
///
/// Structured data that is kept as data (untyped values, `array` and `object`
/// kinds) stays in [`Value::Json`]; typed collections become [`Value::List`];
/// described and codec types become [`Value::Object`].
#[derive(Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Json(serde_json::Value),
    Object(Box<dyn Mappable>),
}

impl Value {
    /// Boxes `value` into [`Value::Object`].
    #[inline]
    pub fn object<T: Mappable>(value: T) -> Self {
        Self::Object(Box::new(value))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the variant, used in log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Json(_) => "json",
            Self::Object(_) => "object",
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&dyn Mappable> {
        match self {
            Self::Object(object) => Some(&**object),
            _ => None,
        }
    }

    /// Returns the object as a `T`, if it is one.
    #[inline]
    pub fn downcast_ref<T: Mappable>(&self) -> Option<&T> {
        self.as_object()?.downcast_ref::<T>()
    }

    #[inline]
    pub fn into_object(self) -> Option<Box<dyn Mappable>> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Converts into raw JSON, failing on objects.
    pub fn into_json(self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;

        Some(match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(b),
            Self::Int(i) => Json::from(i),
            Self::Float(f) => serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number),
            Self::String(s) => Json::String(s),
            Self::List(items) => Json::Array(
                items
                    .into_iter()
                    .map(Value::into_json)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Self::Json(json) => json,
            Self::Object(_) => return None,
        })
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::String(s),
            json @ (Json::Array(_) | Json::Object(_)) => Self::Json(json),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Self::Object(object) => f.debug_tuple("Object").field(&object.type_ident().name()).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// FromValue

/// Conversion from a resolved [`Value`] into a concrete field or parameter type.
///
/// Returns `None` when the value has another shape; the read then leaves the
/// field untouched or skips the setter.
///
/// # Examples
///
/// ```
/// use vc_mapper::{FromValue, Value};
///
/// assert_eq!(i32::from_value(Value::Int(7)), Some(7));
/// assert_eq!(Option::<String>::from_value(Value::Null), Some(None));
/// assert_eq!(String::from_value(Value::Null), None);
/// assert_eq!(
///     Vec::<i64>::from_value(Value::List(vec![Value::Int(1), Value::Int(2)])),
///     Some(vec![1, 2]),
/// );
/// ```
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue for bool {
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            #[inline]
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Int(i) => <$ty>::try_from(i).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_from_value_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            #[inline]
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Float(f) => Some(f as $ty),
                    Value::Int(i) => Some(i as $ty),
                    _ => None,
                }
            }
        }
    )*};
}

impl_from_value_float!(f32, f64);

impl FromValue for String {
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            value => T::from_value(value).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            Value::Json(serde_json::Value::Array(items)) => items
                .into_iter()
                .map(|item| T::from_value(Value::from(item)))
                .collect(),
            _ => None,
        }
    }
}

impl FromValue for serde_json::Value {
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        value.into_json()
    }
}

impl FromValue for serde_json::Map<String, serde_json::Value> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Json(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

impl<T: Describe> FromValue for T {
    fn from_value(value: Value) -> Option<Self> {
        value.into_object()?.take::<T>().ok()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_numbers() {
        assert!(matches!(Value::from(json!(3)), Value::Int(3)));
        assert!(matches!(Value::from(json!(0.5)), Value::Float(f) if f == 0.5));
        assert!(matches!(Value::from(json!(u64::MAX)), Value::Float(_)));
        assert!(matches!(Value::from(json!([1])), Value::Json(_)));
        assert!(Value::from(json!(null)).is_null());
    }

    #[test]
    fn into_json_of_lists() {
        let list = Value::List(vec![Value::Int(1), Value::String("a".into()), Value::Null]);
        assert_eq!(list.into_json(), Some(json!([1, "a", null])));

        let nested = Value::List(vec![Value::object(String::from("x"))]);
        assert_eq!(nested.into_json(), None);
    }

    #[test]
    fn primitive_conversions() {
        assert_eq!(u8::from_value(Value::Int(300)), None);
        assert_eq!(f64::from_value(Value::Int(2)), Some(2.0));
        assert_eq!(bool::from_value(Value::Int(1)), None);
        assert_eq!(
            Option::<i64>::from_value(Value::Int(5)),
            Some(Some(5)),
        );
        assert_eq!(
            Vec::<String>::from_value(Value::Json(json!(["a", "b"]))),
            Some(vec!["a".to_owned(), "b".to_owned()]),
        );
        assert_eq!(Vec::<String>::from_value(Value::Json(json!(["a", 1]))), None);
        assert_eq!(
            serde_json::Value::from_value(Value::Json(json!({"k": 1}))),
            Some(json!({"k": 1})),
        );
    }
}
