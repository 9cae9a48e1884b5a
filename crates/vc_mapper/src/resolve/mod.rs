//! Conversion of one raw JSON value against a declared type.

// -----------------------------------------------------------------------------
// Modules

mod coerce;

// -----------------------------------------------------------------------------
// TypeResolver

use alloc::boxed::Box;
use alloc::vec::Vec;

use serde_json::Value as Json;

use crate::info::{ScalarKind, TypeDescriptor, TypeIdent};
use crate::reader::Reader;
use crate::{MapperError, ObjectMapper, Value};

use coerce::coerce;

/// Resolves raw values for one [`ObjectMapper`].
///
/// Failures are narrowed to [`Value::Null`], except union failures which
/// propagate to the caller.
pub(crate) struct TypeResolver<'m> {
    mapper: &'m ObjectMapper,
}

impl<'m> TypeResolver<'m> {
    #[inline]
    pub(crate) fn new(mapper: &'m ObjectMapper) -> Self {
        Self { mapper }
    }

    /// Resolves `raw` against `ty`, honoring an element type override for
    /// `array` types. Absent and null raw values resolve to null.
    pub(crate) fn resolve(
        &self,
        raw: Option<&Json>,
        ty: Option<&TypeDescriptor>,
        element: Option<&TypeDescriptor>,
    ) -> Result<Value, MapperError> {
        let Some(raw) = raw.filter(|raw| !raw.is_null()) else {
            return Ok(Value::Null);
        };
        let Some(ty) = ty else {
            return Ok(Value::from(raw.clone()));
        };

        match self.attempt(raw, ty, element) {
            Err(err) if !err.is_union_failure() => {
                log::debug!("`{}` resolved to null: {err}", ty.name());
                Ok(Value::Null)
            }
            result => result,
        }
    }

    fn attempt(
        &self,
        raw: &Json,
        ty: &TypeDescriptor,
        element: Option<&TypeDescriptor>,
    ) -> Result<Value, MapperError> {
        match (ty, element) {
            (
                TypeDescriptor::Scalar {
                    kind: ScalarKind::Array,
                    ..
                },
                Some(element),
            ) => Ok(self.collection(raw, element)),
            (TypeDescriptor::Scalar { kind, .. }, _) => Ok(self.scalar(raw, *kind)),
            (TypeDescriptor::Collection { element, .. }, _) => Ok(self.collection(raw, element)),
            (TypeDescriptor::Object { ident, .. }, _) => self.object(raw, ident),
            (TypeDescriptor::Union { members, .. }, _) => self.union(raw, ty, members, element),
        }
    }

    fn scalar(&self, raw: &Json, kind: ScalarKind) -> Value {
        let value = match self.mapper.find_codec(&TypeIdent::scalar(kind)) {
            Some(codec) => match codec.decode(raw, kind.name()) {
                Ok(value) => value,
                Err(err) => {
                    log::debug!("`{}` codec failed, resolved to null: {err}", kind.name());
                    return Value::Null;
                }
            },
            None => Value::from(raw.clone()),
        };

        let found = value.kind_name();
        coerce(value, kind).unwrap_or_else(|| {
            log::debug!("cannot coerce {found} into `{}`, resolved to null", kind.name());
            Value::Null
        })
    }

    fn collection(&self, raw: &Json, element: &TypeDescriptor) -> Value {
        let items: Vec<&Json> = match raw {
            Json::Array(items) => items.iter().collect(),
            Json::Object(map) => map.values().collect(),
            _ => return Value::Null,
        };

        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            match self.resolve(Some(item), Some(element), None) {
                Ok(value) => resolved.push(value),
                Err(err) => {
                    log::debug!("element of `{}` failed, collection resolved to null: {err}", element.name());
                    return Value::Null;
                }
            }
        }
        Value::List(resolved)
    }

    fn object(&self, raw: &Json, ident: &TypeIdent) -> Result<Value, MapperError> {
        let value = match self.mapper.find_codec(ident) {
            Some(codec) => codec
                .decode(raw, ident.name())
                .map_err(|source| MapperError::Codec {
                    type_name: ident.name().into(),
                    source,
                })?,
            None => match raw {
                Json::Object(map) => Value::Object(Reader::new(self.mapper).read(map, ident)?),
                _ => Value::Null,
            },
        };

        match value {
            Value::Object(object) if object.type_ident().is_a(ident.name()) => Ok(Value::Object(object)),
            Value::Null => Ok(Value::Null),
            other => {
                log::debug!("{} is not a `{ident}`, resolved to null", other.kind_name());
                Ok(Value::Null)
            }
        }
    }

    fn union(
        &self,
        raw: &Json,
        ty: &TypeDescriptor,
        members: &[TypeDescriptor],
        element: Option<&TypeDescriptor>,
    ) -> Result<Value, MapperError> {
        let mut first_error: Option<MapperError> = None;

        for member in members {
            match self.attempt(raw, member, element) {
                Ok(value) if !value.is_null() => return Ok(value),
                Ok(_) if member.is_null_kind() => return Ok(Value::Null),
                Ok(_) => {}
                Err(err) => {
                    log::debug!("union member `{}` failed: {err}", member.name());
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        Err(MapperError::UnionResolution {
            members: ty.name().into_owned(),
            source: first_error.map(Box::new),
        })
    }
}
