use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use indexmap::IndexMap;

use crate::Value;
use crate::info::{ClassDescriptor, ScalarKind, TypeIdent, Typed};

// -----------------------------------------------------------------------------
// View

/// A borrowed structural view of a [`Mappable`] value.
///
/// The writer dispatches on it: text, null, containers and scalars are
/// converted directly, [`View::Object`] goes through codecs, output
/// capabilities and finally the value's descriptor.
pub enum View<'a> {
    Null,
    Text(&'a str),
    Bool(bool),
    Int(i64),
    Float(f64),
    Entries(Entries<'a>),
    /// A described or codec-handled value.
    Object,
    /// A wrapper, such as `Option` or `Box`, around another value.
    Inner(&'a dyn Mappable),
}

/// Elements of an ordered or keyed container.
pub enum Entries<'a> {
    List(Vec<&'a dyn Mappable>),
    Keyed(Vec<(&'a str, &'a dyn Mappable)>),
}

impl View<'_> {
    /// The scalar kind of a leaf view.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            View::Text(_) => Some(ScalarKind::String),
            View::Bool(_) => Some(ScalarKind::Bool),
            View::Int(_) => Some(ScalarKind::Int),
            View::Float(_) => Some(ScalarKind::Float),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Mappable

/// A value that can be written to JSON, and produced by a read.
///
/// Besides [`view`](Mappable::view), an object can expose output
/// capabilities. The writer tries them in declaration order and uses the
/// first one present.
///
/// Described types get this trait through [`Describe`].
pub trait Mappable: Any + Send + Sync {
    fn type_ident(&self) -> TypeIdent;

    fn view(&self) -> View<'_>;

    /// Iterable semantics, written like a container.
    fn as_entries(&self) -> Option<Entries<'_>> {
        None
    }

    /// Self-serialization, written with `serde_json`.
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        None
    }

    /// Conversion into a JSON mapping.
    fn to_mapping(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
        None
    }

    /// Conversion into JSON text, used as is.
    fn to_json(&self) -> Option<String> {
        None
    }

    /// Display conversion, used as is.
    fn as_display(&self) -> Option<&dyn fmt::Display> {
        None
    }
}

impl fmt::Debug for dyn Mappable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mappable").field(&self.type_ident().name()).finish()
    }
}

impl dyn Mappable {
    #[inline]
    pub fn is<T: Mappable>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Mappable>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Mappable>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }

    /// Takes the boxed value as a `T`, giving it back on mismatch.
    pub fn take<T: Mappable>(self: Box<Self>) -> Result<T, Box<dyn Mappable>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// Follows [`View::Inner`] wrappers down to the wrapped value.
    pub fn unwrapped(&self) -> &dyn Mappable {
        let mut current = self;
        while let View::Inner(inner) = current.view() {
            current = inner;
        }
        current
    }

    /// The text of a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self.unwrapped().view() {
            View::Text(text) => Some(text),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Describe

/// A type described by a [`ClassDescriptor`].
///
/// Implementing it makes the type [`Mappable`], [`Typed`] and
/// [`FromValue`](crate::FromValue). The output capability hooks mirror the
/// ones of [`Mappable`].
///
/// # Examples
///
/// ```
/// use vc_mapper::{Describe, ObjectMapper, Typed};
/// use vc_mapper::info::{ClassDescriptor, FieldDescriptor, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Keys {
///     p256dh: String,
///     auth: String,
/// }
///
/// impl Describe for Keys {
///     const NAME: &'static str = "Keys";
///
///     fn describe() -> ClassDescriptor {
///         ClassDescriptor::builder::<Self>()
///             .field(FieldDescriptor::new(
///                 "p256dh",
///                 TypeDescriptor::string(),
///                 |k: &Keys| &k.p256dh,
///                 |k: &mut Keys, v: String| k.p256dh = v,
///             ))
///             .field(FieldDescriptor::new(
///                 "auth",
///                 TypeDescriptor::string(),
///                 |k: &Keys| &k.auth,
///                 |k: &mut Keys, v: String| k.auth = v,
///             ))
///             .build()
///     }
/// }
///
/// let mapper = ObjectMapper::new();
/// let keys: Keys = mapper.read_value(r#"{"p256dh":"p","auth":"a"}"#).unwrap();
/// assert_eq!(keys.auth, "a");
/// assert_eq!(mapper.write_value_as_string(&keys), r#"{"p256dh":"p","auth":"a"}"#);
/// assert_eq!(<Keys as Typed>::type_ident().name(), "Keys");
/// ```
pub trait Describe: Default + Send + Sync + 'static {
    /// Type name used for lookups and messages.
    const NAME: &'static str;

    /// Names this type also answers to when matching codecs and union members.
    const ANCESTORS: &'static [&'static str] = &[];

    fn describe() -> ClassDescriptor;

    fn as_entries(&self) -> Option<Entries<'_>> {
        None
    }

    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        None
    }

    fn to_mapping(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
        None
    }

    fn to_json(&self) -> Option<String> {
        None
    }

    fn as_display(&self) -> Option<&dyn fmt::Display> {
        None
    }
}

impl<T: Describe> Typed for T {
    #[inline]
    fn type_ident() -> TypeIdent {
        TypeIdent::new(T::NAME)
            .with_ancestors(T::ANCESTORS)
            .with_describe(T::describe)
    }
}

impl<T: Describe> Mappable for T {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        <T as Typed>::type_ident()
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::Object
    }

    #[inline]
    fn as_entries(&self) -> Option<Entries<'_>> {
        Describe::as_entries(self)
    }

    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        Describe::as_serialize(self)
    }

    #[inline]
    fn to_mapping(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
        Describe::to_mapping(self)
    }

    #[inline]
    fn to_json(&self) -> Option<String> {
        Describe::to_json(self)
    }

    #[inline]
    fn as_display(&self) -> Option<&dyn fmt::Display> {
        Describe::as_display(self)
    }
}

// -----------------------------------------------------------------------------
// Implementations

const ARRAY: TypeIdent = TypeIdent::scalar(ScalarKind::Array);

impl Mappable for String {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        TypeIdent::scalar(ScalarKind::String)
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::Text(self)
    }
}

impl Mappable for &'static str {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        TypeIdent::scalar(ScalarKind::String)
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::Text(self)
    }
}

impl Mappable for bool {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        TypeIdent::scalar(ScalarKind::Bool)
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::Bool(*self)
    }
}

macro_rules! impl_mappable_int {
    ($($ty:ty),* $(,)?) => {$(
        impl Mappable for $ty {
            #[inline]
            fn type_ident(&self) -> TypeIdent {
                TypeIdent::scalar(ScalarKind::Int)
            }

            #[inline]
            fn view(&self) -> View<'_> {
                match i64::try_from(*self) {
                    Ok(i) => View::Int(i),
                    Err(_) => View::Float(*self as f64),
                }
            }
        }
    )*};
}

impl_mappable_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_mappable_float {
    ($($ty:ty),* $(,)?) => {$(
        impl Mappable for $ty {
            #[inline]
            fn type_ident(&self) -> TypeIdent {
                TypeIdent::scalar(ScalarKind::Float)
            }

            #[inline]
            fn view(&self) -> View<'_> {
                View::Float(*self as f64)
            }
        }
    )*};
}

impl_mappable_float!(f32, f64);

impl Mappable for () {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        TypeIdent::scalar(ScalarKind::Null)
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::Null
    }
}

impl<T: Mappable> Mappable for Option<T> {
    fn type_ident(&self) -> TypeIdent {
        match self {
            Some(value) => value.type_ident(),
            None => TypeIdent::scalar(ScalarKind::Null),
        }
    }

    fn view(&self) -> View<'_> {
        match self {
            Some(value) => View::Inner(value),
            None => View::Null,
        }
    }
}

impl Mappable for Box<dyn Mappable> {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        (**self).type_ident()
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::Inner(&**self)
    }
}

impl<T: Mappable> Mappable for Vec<T> {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        ARRAY
    }

    fn view(&self) -> View<'_> {
        View::Entries(Entries::List(
            self.iter().map(|item| item as &dyn Mappable).collect(),
        ))
    }
}

impl<T: Mappable> Mappable for BTreeMap<String, T> {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        ARRAY
    }

    fn view(&self) -> View<'_> {
        View::Entries(Entries::Keyed(
            self.iter()
                .map(|(key, item)| (key.as_str(), item as &dyn Mappable))
                .collect(),
        ))
    }
}

impl<T: Mappable> Mappable for IndexMap<String, T> {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        ARRAY
    }

    fn view(&self) -> View<'_> {
        View::Entries(Entries::Keyed(
            self.iter()
                .map(|(key, item)| (key.as_str(), item as &dyn Mappable))
                .collect(),
        ))
    }
}

impl Mappable for serde_json::Value {
    fn type_ident(&self) -> TypeIdent {
        use serde_json::Value as Json;

        TypeIdent::scalar(match self {
            Json::Null => ScalarKind::Null,
            Json::Bool(_) => ScalarKind::Bool,
            Json::Number(n) if n.is_f64() => ScalarKind::Float,
            Json::Number(_) => ScalarKind::Int,
            Json::String(_) => ScalarKind::String,
            Json::Array(_) | Json::Object(_) => ScalarKind::Array,
        })
    }

    fn view(&self) -> View<'_> {
        use serde_json::Value as Json;

        match self {
            Json::Null => View::Null,
            Json::Bool(b) => View::Bool(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => View::Int(i),
                None => View::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => View::Text(s),
            Json::Array(items) => View::Entries(Entries::List(
                items.iter().map(|item| item as &dyn Mappable).collect(),
            )),
            Json::Object(map) => map.view(),
        }
    }
}

impl Mappable for serde_json::Map<String, serde_json::Value> {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        ARRAY
    }

    fn view(&self) -> View<'_> {
        View::Entries(Entries::Keyed(
            self.iter()
                .map(|(key, item)| (key.as_str(), item as &dyn Mappable))
                .collect(),
        ))
    }
}

impl Mappable for Value {
    fn type_ident(&self) -> TypeIdent {
        match self {
            Value::Null => TypeIdent::scalar(ScalarKind::Null),
            Value::Bool(_) => TypeIdent::scalar(ScalarKind::Bool),
            Value::Int(_) => TypeIdent::scalar(ScalarKind::Int),
            Value::Float(_) => TypeIdent::scalar(ScalarKind::Float),
            Value::String(_) => TypeIdent::scalar(ScalarKind::String),
            Value::List(_) => ARRAY,
            Value::Json(json) => json.type_ident(),
            Value::Object(object) => object.type_ident(),
        }
    }

    fn view(&self) -> View<'_> {
        match self {
            Value::Null => View::Null,
            Value::Bool(b) => View::Bool(*b),
            Value::Int(i) => View::Int(*i),
            Value::Float(f) => View::Float(*f),
            Value::String(s) => View::Text(s),
            Value::List(items) => View::Entries(Entries::List(
                items.iter().map(|item| item as &dyn Mappable).collect(),
            )),
            Value::Json(json) => View::Inner(json),
            Value::Object(object) => View::Inner(&**object),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
