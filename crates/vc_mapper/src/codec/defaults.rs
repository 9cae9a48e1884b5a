use alloc::string::String;

use crate::codec::{Codec, CodecError, CodecRegistry};
use crate::info::{TypeIdent, Typed};
use crate::{FromValue, Mappable, Value, View};

// -----------------------------------------------------------------------------
// JsonObject

/// An opaque JSON object, read and written as is.
///
/// Declare a field as `TypeDescriptor::of::<JsonObject>()` to keep a free-form
/// object; [`JsonObjectCodec`] handles it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonObject(pub serde_json::Map<String, serde_json::Value>);

impl JsonObject {
    #[inline]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}

impl Typed for JsonObject {
    #[inline]
    fn type_ident() -> TypeIdent {
        TypeIdent::new("JsonObject")
    }
}

impl Mappable for JsonObject {
    #[inline]
    fn type_ident(&self) -> TypeIdent {
        <Self as Typed>::type_ident()
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::Object
    }
}

impl FromValue for JsonObject {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(object) => object.take::<JsonObject>().ok(),
            Value::Json(serde_json::Value::Object(map)) => Some(JsonObject(map)),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// JsonObjectCodec

/// Passes [`JsonObject`] values through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonObjectCodec;

impl Codec for JsonObjectCodec {
    fn encode(&self, value: &dyn Mappable, _: &str) -> String {
        match value.downcast_ref::<JsonObject>() {
            Some(object) => serde_json::to_string(&object.0).unwrap_or_default(),
            None => String::from("{}"),
        }
    }

    fn decode(&self, raw: &serde_json::Value, type_name: &str) -> Result<Value, CodecError> {
        match raw {
            serde_json::Value::Object(map) => Ok(Value::object(JsonObject(map.clone()))),
            _ => Err(CodecError::unexpected(type_name, raw)),
        }
    }
}

// -----------------------------------------------------------------------------
// Defaults

/// Registers the default codecs into `registry`.
///
/// - [`JsonObjectCodec`] for `JsonObject`.
/// - [`DateTimeCodec`](crate::codec::DateTimeCodec) for
///   [`DATE_TIME_INTERFACE`](crate::codec::DATE_TIME_INTERFACE), with the
///   `chrono` feature.
pub fn install_defaults(registry: &CodecRegistry) {
    registry.register::<JsonObjectCodec>(<JsonObject as Typed>::type_ident().name());

    #[cfg(feature = "chrono")]
    registry.register::<crate::codec::DateTimeCodec>(crate::codec::DATE_TIME_INTERFACE);
}

// -----------------------------------------------------------------------------
// Tests
