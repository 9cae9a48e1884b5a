use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::codec::{Codec, CodecRegistry};
use crate::info::TypeIdent;
use crate::reader::Reader;
use crate::writer::Writer;
use crate::{Describe, Mappable, MapperContext, MapperError};

// -----------------------------------------------------------------------------
// MapperOptions

/// Runtime options of an [`ObjectMapper`].
///
/// Deserializable, so it can be embedded in a host configuration.
///
/// ```
/// use vc_mapper::MapperOptions;
///
/// let options: MapperOptions = serde_json::from_str(r#"{"pretty": true}"#).unwrap();
/// assert!(options.pretty);
///
/// let options: MapperOptions = serde_json::from_str("{}").unwrap();
/// assert!(!options.pretty);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperOptions {
    /// Write indented JSON text instead of compact text.
    pub pretty: bool,
}

// -----------------------------------------------------------------------------
// JsonInput

/// The input of a read: JSON text or an already parsed value.
#[derive(Clone, Copy, Debug)]
pub enum JsonInput<'a> {
    Text(&'a str),
    Json(&'a Json),
}

impl<'a> From<&'a str> for JsonInput<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for JsonInput<'a> {
    #[inline]
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a Json> for JsonInput<'a> {
    #[inline]
    fn from(json: &'a Json) -> Self {
        Self::Json(json)
    }
}

// -----------------------------------------------------------------------------
// ObjectMapper

/// Reads JSON into described types and writes values as JSON.
///
/// A mapper owns an instance codec scope and refers to a shared
/// [`MapperContext`]. Instance codecs take precedence over shared ones.
///
/// # Examples
///
/// ```
/// use vc_mapper::{MapperError, ObjectMapper};
///
/// let mapper = ObjectMapper::new();
///
/// assert_eq!(mapper.write_value_as_string(&"plain"), "plain");
/// assert_eq!(mapper.write_value_as_string(&None::<i32>), "");
/// assert_eq!(mapper.write_value_as_string(&9), "9");
/// assert_eq!(mapper.write_value_as_string(&vec![1, 2]), "[1,2]");
///
/// let err = mapper.read_value_by_name("{}", "Unknown").unwrap_err();
/// assert!(matches!(err, MapperError::ClassNotFound { .. }));
/// ```
pub struct ObjectMapper {
    context: Arc<MapperContext>,
    codecs: CodecRegistry,
    options: MapperOptions,
}

impl Default for ObjectMapper {
    /// See [`ObjectMapper::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectMapper {
    /// Creates a mapper on a fresh [`MapperContext`] with default codecs.
    pub fn new() -> Self {
        Self::with_context(Arc::new(MapperContext::new()))
    }

    /// Creates a mapper sharing `context` with other mappers.
    pub fn with_context(context: Arc<MapperContext>) -> Self {
        Self {
            context,
            codecs: CodecRegistry::new(),
            options: MapperOptions::default(),
        }
    }

    #[inline]
    pub fn with_options(mut self, options: MapperOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn options(&self) -> MapperOptions {
        self.options
    }

    #[inline]
    pub fn set_options(&mut self, options: MapperOptions) {
        self.options = options;
    }

    #[inline]
    pub fn context(&self) -> &Arc<MapperContext> {
        &self.context
    }

    /// The instance codec scope.
    #[inline]
    pub fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    /// Registers `T` in the shared descriptor cache.
    #[inline]
    pub fn register<T: Describe>(&self) -> bool {
        self.context.register::<T>()
    }

    // -------------------------------------------------------------------------
    // Codecs

    /// Registers an instance codec for `target`, visible to this mapper only.
    #[inline]
    pub fn add_codec<C: Codec + Default>(&self, target: impl Into<String>) {
        self.codecs.register::<C>(target);
    }

    #[inline]
    pub fn add_codec_with<C, F>(&self, target: impl Into<String>, factory: F)
    where
        C: Codec,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.codecs.register_with(target, factory);
    }

    #[inline]
    pub fn remove_codec(&self, target: &str) -> bool {
        self.codecs.unregister(target)
    }

    /// Registers a codec in the shared scope, visible to every mapper on the
    /// same context.
    #[inline]
    pub fn add_shared_codec<C: Codec + Default>(&self, target: impl Into<String>) {
        self.context.codecs().register::<C>(target);
    }

    #[inline]
    pub fn add_shared_codec_with<C, F>(&self, target: impl Into<String>, factory: F)
    where
        C: Codec,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.context.codecs().register_with(target, factory);
    }

    #[inline]
    pub fn remove_shared_codec(&self, target: &str) -> bool {
        self.context.codecs().unregister(target)
    }

    /// The codec applying to `ident`: instance scope first, then shared scope.
    pub fn find_codec(&self, ident: &TypeIdent) -> Option<Arc<dyn Codec>> {
        self.codecs
            .lookup(ident)
            .or_else(|| self.context.codecs().lookup(ident))
    }

    // -------------------------------------------------------------------------
    // Read & Write

    /// Reads a `T` from JSON text or a parsed JSON value.
    ///
    /// # Errors
    ///
    /// - [`MapperError::Json`] if the text is not JSON.
    /// - [`MapperError::ExpectedObject`] if the input is not a JSON object.
    /// - [`MapperError::NotNullViolation`] if a non-nullable field of `T` is
    ///   left null.
    /// - [`MapperError::UnionResolution`] if no member of a union field matches.
    pub fn read_value<'a, T: Describe>(&self, input: impl Into<JsonInput<'a>>) -> Result<T, MapperError> {
        self.register::<T>();
        self.read_value_by_name(input, T::NAME)?
            .take::<T>()
            .map_err(|_| MapperError::class_not_found(T::NAME))
    }

    /// Reads the registered type named `type_name`.
    ///
    /// # Errors
    ///
    /// [`MapperError::ClassNotFound`] if no such type is registered, otherwise
    /// as [`read_value`](Self::read_value).
    pub fn read_value_by_name<'a>(
        &self,
        input: impl Into<JsonInput<'a>>,
        type_name: &str,
    ) -> Result<Box<dyn Mappable>, MapperError> {
        let class = self.context.descriptors().describe(type_name)?;

        let parsed: Json;
        let json = match input.into() {
            JsonInput::Text(text) => {
                parsed = serde_json::from_str(text)?;
                &parsed
            }
            JsonInput::Json(json) => json,
        };

        let Json::Object(raw) = json else {
            return Err(MapperError::ExpectedObject {
                type_name: type_name.into(),
            });
        };
        Reader::new(self).read_class(raw, &class)
    }

    /// Writes `value` as JSON text.
    ///
    /// Text is returned verbatim and null as empty text; scalars are cast to
    /// text; containers and objects are encoded as JSON.
    #[inline]
    pub fn write_value_as_string(&self, value: &dyn Mappable) -> String {
        Writer::new(self).write_text(value)
    }

    /// Converts `value` into a JSON tree, as it is embedded inside objects.
    #[inline]
    pub fn write_value(&self, value: &dyn Mappable) -> Json {
        Writer::new(self).convert_output(value)
    }
}

impl fmt::Debug for ObjectMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectMapper")
            .field("context", &self.context)
            .field("codecs", &self.codecs)
            .field("options", &self.options)
            .finish()
    }
}
