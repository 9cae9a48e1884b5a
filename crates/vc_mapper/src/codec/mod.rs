//! Pluggable encoders and decoders bound to type names.
//!
//! ## Menu
//!
//! - [`Codec`]: An `encode`/`decode` pair.
//! - [`CodecRegistry`]: One scope of registrations with its own lookup cache.
//!   A [`MapperContext`](crate::MapperContext) owns the shared scope, every
//!   [`ObjectMapper`](crate::ObjectMapper) owns an instance scope consulted first.
//! - Default codecs, installed by [`MapperContext::new`](crate::MapperContext::new):
//!     - [`JsonObjectCodec`]: passes opaque JSON objects ([`JsonObject`]) through.
//!     - [`DateTimeCodec`]: RFC 3339 text for `chrono` date-times, registered
//!       for [`DATE_TIME_INTERFACE`] (requires the `chrono` feature).
//!
//! ## Lookup order
//!
//! For a type identity, the instance scope is searched for an exact name,
//! then for the first registered ancestor name; then the shared scope the
//! same way. Scalar leaves are looked up by their kind name (`"string"`,
//! `"int"`, ...).

// -----------------------------------------------------------------------------
// Modules

mod defaults;
mod registry;

#[cfg(feature = "chrono")]
mod datetime;

// -----------------------------------------------------------------------------
// Exports

pub use crate::error::CodecError;
pub use defaults::{JsonObject, JsonObjectCodec, install_defaults};
pub use registry::{CodecFactory, CodecRegistry};

#[cfg(feature = "chrono")]
pub use datetime::{DATE_TIME_INTERFACE, DateTimeCodec};

use alloc::string::String;

use crate::{Mappable, Value};

// -----------------------------------------------------------------------------
// Codec

/// Custom conversion of one type, or of one scalar kind.
///
/// `type_name` is the name that was looked up, so a codec registered for an
/// ancestor knows which concrete type is requested.
///
/// # Examples
///
/// ```
/// use vc_mapper::codec::{Codec, CodecError};
/// use vc_mapper::{Mappable, ObjectMapper, Value};
///
/// #[derive(Default)]
/// struct Upper;
///
/// impl Codec for Upper {
///     fn encode(&self, value: &dyn Mappable, _: &str) -> String {
///         value.as_str().unwrap_or_default().to_uppercase()
///     }
///
///     fn decode(&self, raw: &serde_json::Value, type_name: &str) -> Result<Value, CodecError> {
///         match raw.as_str() {
///             Some(text) => Ok(Value::String(text.to_uppercase())),
///             None => Err(CodecError::unexpected(type_name, raw)),
///         }
///     }
/// }
///
/// let mapper = ObjectMapper::new();
/// mapper.add_codec::<Upper>("string");
/// assert_eq!(mapper.write_value_as_string(&vec!["a", "b"]), r#"["A","B"]"#);
/// ```
pub trait Codec: Send + Sync + 'static {
    fn encode(&self, value: &dyn Mappable, type_name: &str) -> String;

    fn decode(&self, raw: &serde_json::Value, type_name: &str) -> Result<Value, CodecError>;
}
