use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::info::TypeDescriptor;
use crate::info::field::{AccessError, FieldSetFn, erase_set};
use crate::{FromValue, Mappable, Value};

// -----------------------------------------------------------------------------
// ParameterDescriptor

/// The declared type of a setter parameter.
#[derive(Clone, Debug)]
pub struct ParameterDescriptor {
    name: &'static str,
    ty: Option<TypeDescriptor>,
    element: Option<TypeDescriptor>,
}

impl ParameterDescriptor {
    #[inline]
    pub fn new(name: &'static str, ty: impl Into<Option<TypeDescriptor>>) -> Self {
        Self {
            name,
            ty: ty.into(),
            element: None,
        }
    }

    /// A parameter without declared type, raw values pass through.
    #[inline]
    pub fn untyped(name: &'static str) -> Self {
        Self::new(name, None::<TypeDescriptor>)
    }

    /// Declares the element type of an `array` parameter.
    #[inline]
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
    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        self.element.as_ref()
    }
}

// -----------------------------------------------------------------------------
// MethodDescriptor

type GetterFn = dyn Fn(&dyn Any) -> Option<Box<dyn Mappable>> + Send + Sync;

enum MethodKind {
    Getter(Box<GetterFn>),
    Setter(Box<FieldSetFn>),
}

/// An accessor method of a described type.
///
/// Getters are named `get*` and return an owned value; setters are named
/// `set*` and take one resolved argument.
///
/// # Examples
///
/// ```
/// use vc_mapper::info::{MethodDescriptor, ParameterDescriptor, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Person {
///     first_name: String,
///     last_name: String,
///     request_number: i64,
/// }
///
/// let full_name = MethodDescriptor::getter("getFullName", |p: &Person| {
///     format!("{} {}", p.first_name, p.last_name)
/// })
/// .append_as("full_name");
/// assert_eq!(full_name.append_name(), Some("full_name"));
///
/// let set_num = MethodDescriptor::setter(
///     "setRequestNum",
///     ParameterDescriptor::new("num", TypeDescriptor::string()),
///     |p: &mut Person, num: String| p.request_number = num.parse().unwrap_or_default(),
/// )
/// .fills("requestNumber");
/// assert!(set_num.is_setter());
/// assert!(set_num.does_fill("requestNumber"));
/// ```
pub struct MethodDescriptor {
    name: &'static str,
    params: Vec<ParameterDescriptor>,
    append_as: Option<&'static str>,
    fills: Vec<&'static str>,
    kind: MethodKind,
}

impl MethodDescriptor {
    /// Creates a getter of `T` returning an `R`.
    pub fn getter<T, R, G>(name: &'static str, get: G) -> Self
    where
        T: Any,
        R: Mappable,
        G: Fn(&T) -> R + Send + Sync + 'static,
    {
        let get = move |instance: &dyn Any| -> Option<Box<dyn Mappable>> {
            let instance = instance.downcast_ref::<T>()?;
            Some(Box::new(get(instance)))
        };

        Self {
            name,
            params: Vec::new(),
            append_as: None,
            fills: Vec::new(),
            kind: MethodKind::Getter(Box::new(get)),
        }
    }

    /// Creates a setter of `T` taking a `P`, resolved against `param`.
    pub fn setter<T, P, S>(name: &'static str, param: ParameterDescriptor, set: S) -> Self
    where
        T: Any,
        P: FromValue,
        S: Fn(&mut T, P) + Send + Sync + 'static,
    {
        Self {
            name,
            params: alloc::vec![param],
            append_as: None,
            fills: Vec::new(),
            kind: MethodKind::Setter(erase_set(set)),
        }
    }

    /// Appends the getter's result to the output under `wire_name`.
    #[inline]
    pub fn append_as(mut self, wire_name: &'static str) -> Self {
        self.append_as = Some(wire_name);
        self
    }

    /// Declares that the setter assigns `field`.
    ///
    /// A non-nullable field left null by the first pass of a read is accepted
    /// when a setter that fills it has been invoked.
    #[inline]
    pub fn fills(mut self, field: &'static str) -> Self {
        self.fills.push(field);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn params(&self) -> &[ParameterDescriptor] {
        &self.params
    }

    #[inline]
    pub fn first_param(&self) -> Option<&ParameterDescriptor> {
        self.params.first()
    }

    #[inline]
    pub fn append_name(&self) -> Option<&'static str> {
        self.append_as
    }

    #[inline]
    pub fn filled_fields(&self) -> &[&'static str] {
        &self.fills
    }

    #[inline]
    pub fn does_fill(&self, field: &str) -> bool {
        self.fills.iter().any(|name| *name == field)
    }

    #[inline]
    pub fn is_getter(&self) -> bool {
        matches!(self.kind, MethodKind::Getter(_))
    }

    #[inline]
    pub fn is_setter(&self) -> bool {
        matches!(self.kind, MethodKind::Setter(_))
    }

    pub(crate) fn call_getter(&self, instance: &dyn Any) -> Option<Box<dyn Mappable>> {
        match &self.kind {
            MethodKind::Getter(get) => get(instance),
            MethodKind::Setter(_) => None,
        }
    }

    pub(crate) fn call_setter(&self, instance: &mut dyn Any, arg: Value) -> Result<(), AccessError> {
        match &self.kind {
            MethodKind::Setter(set) => set(instance, arg),
            MethodKind::Getter(_) => Err(AccessError::Instance),
        }
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("kind", &if self.is_getter() { "getter" } else { "setter" })
            .field("params", &self.params)
            .field("append_as", &self.append_as)
            .field("fills", &self.fills)
            .finish()
    }
}
