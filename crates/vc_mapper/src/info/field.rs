use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use thiserror::Error;

use crate::info::TypeDescriptor;
use crate::naming::snake_case;
use crate::{FromValue, Mappable, Value};

// -----------------------------------------------------------------------------
// Erased accessors

type FieldGetFn = dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Mappable> + Send + Sync;

pub(crate) type FieldSetFn = dyn Fn(&mut dyn Any, Value) -> Result<(), AccessError> + Send + Sync;

/// Failure of an erased field or setter access.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessError {
    #[error("the instance is not of the described type")]
    Instance,
    #[error("the value cannot be converted into the target type")]
    Value,
}

fn erase_get<G>(get: G) -> Box<FieldGetFn>
where
    G: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Mappable> + Send + Sync + 'static,
{
    Box::new(get)
}

/// Wraps a typed assignment into an erased one, shared with setters.
pub(crate) fn erase_set<T, V, S>(set: S) -> Box<FieldSetFn>
where
    T: Any,
    V: FromValue,
    S: Fn(&mut T, V) + Send + Sync + 'static,
{
    Box::new(move |instance: &mut dyn Any, value: Value| -> Result<(), AccessError> {
        let instance = instance.downcast_mut::<T>().ok_or(AccessError::Instance)?;
        let value = V::from_value(value).ok_or(AccessError::Value)?;
        set(instance, value);
        Ok(())
    })
}

struct FieldAccess {
    get: Box<FieldGetFn>,
    set: Box<FieldSetFn>,
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// A field of a described type.
///
/// Public fields carry erased accessors; fields created with
/// [`FieldDescriptor::hidden`] carry none and are only reachable through a
/// getter when writing.
///
/// # Examples
///
/// ```
/// use vc_mapper::info::{FieldDescriptor, TypeDescriptor};
///
/// #[derive(Default)]
/// struct User {
///     user_agent: String,
/// }
///
/// let field = FieldDescriptor::new(
///     "userAgent",
///     TypeDescriptor::string(),
///     |u: &User| &u.user_agent,
///     |u: &mut User, v: String| u.user_agent = v,
/// );
/// assert_eq!(field.wire_name(), "user_agent");
///
/// let field = field.rename("ua");
/// assert_eq!(field.wire_name(), "ua");
/// ```
pub struct FieldDescriptor {
    name: &'static str,
    ty: Option<TypeDescriptor>,
    wire_name: String,
    element: Option<TypeDescriptor>,
    access: Option<FieldAccess>,
}

impl FieldDescriptor {
    /// Creates a public field of `T` holding an `F`.
    ///
    /// Pass `None` as `ty` for an untyped field.
    pub fn new<T, F, G, S>(
        name: &'static str,
        ty: impl Into<Option<TypeDescriptor>>,
        get: G,
        set: S,
    ) -> Self
    where
        T: Any,
        F: Mappable + FromValue,
        G: Fn(&T) -> &F + Send + Sync + 'static,
        S: Fn(&mut T, F) + Send + Sync + 'static,
    {
        let get = erase_get(move |instance: &dyn Any| {
            instance
                .downcast_ref::<T>()
                .map(|instance| get(instance) as &dyn Mappable)
        });

        Self {
            name,
            ty: ty.into(),
            wire_name: snake_case(name),
            element: None,
            access: Some(FieldAccess {
                get,
                set: erase_set(set),
            }),
        }
    }

    /// Creates a non-public field.
    ///
    /// It is never assigned by a read and is written only through its getter.
    pub fn hidden(name: &'static str, ty: impl Into<Option<TypeDescriptor>>) -> Self {
        Self {
            name,
            ty: ty.into(),
            wire_name: snake_case(name),
            element: None,
            access: None,
        }
    }

    /// Overrides the wire key, in both directions.
    pub fn rename(mut self, wire_name: &str) -> Self {
        self.wire_name = wire_name.into();
        self
    }

    /// Declares the element type of an `array` field.
    pub fn element(mut self, element: TypeDescriptor) -> Self {
        self.element = Some(element);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn ty(&self) -> Option<&TypeDescriptor> {
        self.ty.as_ref()
    }

    #[inline]
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    #[inline]
    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        self.element.as_ref()
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.access.is_some()
    }

    /// Untyped fields accept null.
    #[inline]
    pub fn allows_null(&self) -> bool {
        self.ty.as_ref().is_none_or(TypeDescriptor::allows_null)
    }

    pub(crate) fn read<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Mappable> {
        self.access.as_ref().and_then(|access| (access.get)(instance))
    }

    pub(crate) fn assign(&self, instance: &mut dyn Any, value: Value) -> Result<(), AccessError> {
        match &self.access {
            Some(access) => (access.set)(instance, value),
            None => Err(AccessError::Instance),
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("wire_name", &self.wire_name)
            .field("element", &self.element)
            .field("public", &self.is_public())
            .finish()
    }
}
