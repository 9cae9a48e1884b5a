use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

// -----------------------------------------------------------------------------
// MapperError

/// An error raised while reading JSON into a typed value.
///
/// Writing never fails, so every variant describes a decode failure.
/// Inside the resolver all of them except [`MapperError::UnionResolution`]
/// are narrowed to a null value; they surface to callers only from the
/// top-level type or as the cause of a union failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapperError {
    /// The target type has no registered descriptor.
    #[error("Class {type_name} not found")]
    ClassNotFound { type_name: String },

    /// A non-nullable field resolved to null and no invoked setter fills it.
    ///
    /// A present value the field's type cannot hold, such as `300` for a
    /// `u8`, is reported the same way.
    #[error("{type_name}::${field} must not be null")]
    NotNullViolation { type_name: String, field: String },

    /// No member of a union type produced a value.
    ///
    /// `source` is the error of the first member that failed, if any.
    #[error("Cannot construct value for union type {members}")]
    UnionResolution {
        members: String,
        #[source]
        source: Option<Box<MapperError>>,
    },

    /// A codec refused the raw value.
    #[error("Codec for {type_name} failed: {source}")]
    Codec {
        type_name: String,
        #[source]
        source: CodecError,
    },

    /// The top-level input of a read was not a JSON object.
    #[error("Expected a JSON object to read {type_name}")]
    ExpectedObject { type_name: String },

    /// The input text is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl MapperError {
    #[inline]
    pub(crate) fn class_not_found(type_name: &str) -> Self {
        Self::ClassNotFound {
            type_name: type_name.into(),
        }
    }

    #[inline]
    pub(crate) fn not_null(type_name: &str, field: &str) -> Self {
        Self::NotNullViolation {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Returns `true` for errors the resolver must not swallow.
    #[inline]
    pub(crate) fn is_union_failure(&self) -> bool {
        matches!(self, Self::UnionResolution { .. })
    }
}

// -----------------------------------------------------------------------------
// CodecError

/// An error returned by [`Codec::decode`](crate::codec::Codec::decode).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The raw value has a shape the codec cannot decode.
    #[error("Unexpected {found} for {type_name}")]
    UnexpectedInput { type_name: String, found: String },

    /// A free-form failure.
    #[error("{0}")]
    Message(String),
}

impl CodecError {
    /// Creates [`CodecError::UnexpectedInput`], describing `raw` by its JSON kind.
    pub fn unexpected(type_name: &str, raw: &serde_json::Value) -> Self {
        let found = match raw {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Self::UnexpectedInput {
            type_name: type_name.into(),
            found: found.into(),
        }
    }

    /// Creates [`CodecError::Message`] from any displayable value.
    #[inline]
    pub fn custom(message: impl Display) -> Self {
        Self::Message(message.to_string())
    }
}

// -----------------------------------------------------------------------------
// Tests
