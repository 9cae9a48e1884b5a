use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use indexmap::IndexMap;

use crate::info::{FieldDescriptor, MethodDescriptor, TypeIdent, Typed};
use crate::naming::{getter_name, setter_name};
use crate::{Describe, Mappable};

// -----------------------------------------------------------------------------
// ClassDescriptor

/// The structure of a described type, built once and cached.
///
/// Fields and methods keep their declaration order.
///
/// # Examples
///
/// ```
/// use vc_mapper::Describe;
/// use vc_mapper::info::{ClassDescriptor, FieldDescriptor, MethodDescriptor, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Company {
///     name: String,
///     secret: String,
/// }
///
/// impl Describe for Company {
///     const NAME: &'static str = "Company";
///
///     fn describe() -> ClassDescriptor {
///         ClassDescriptor::builder::<Self>()
///             .field(FieldDescriptor::new(
///                 "name",
///                 TypeDescriptor::string(),
///                 |c: &Company| &c.name,
///                 |c: &mut Company, v: String| c.name = v,
///             ))
///             .field(FieldDescriptor::hidden("secret", TypeDescriptor::string()))
///             .method(MethodDescriptor::getter("getName", |c: &Company| c.name.to_uppercase()))
///             .build()
///     }
/// }
///
/// let class = Company::describe();
/// assert_eq!(class.name(), "Company");
/// assert_eq!(class.fields().len(), 1);
/// assert_eq!(class.hidden_fields().len(), 1);
/// assert!(class.getter_for("name").is_some());
/// assert!(class.setter_for("name").is_none());
/// ```
pub struct ClassDescriptor {
    ident: TypeIdent,
    construct: fn() -> Box<dyn Mappable>,
    fields: Vec<FieldDescriptor>,
    hidden: Vec<FieldDescriptor>,
    methods: IndexMap<&'static str, MethodDescriptor>,
}

fn construct<T: Describe>() -> Box<dyn Mappable> {
    Box::new(T::default())
}

impl ClassDescriptor {
    /// Starts describing `T`.
    #[inline]
    pub fn builder<T: Describe>() -> ClassBuilder {
        ClassBuilder {
            class: ClassDescriptor {
                ident: <T as Typed>::type_ident(),
                construct: construct::<T>,
                fields: Vec::new(),
                hidden: Vec::new(),
                methods: IndexMap::new(),
            },
        }
    }

    #[inline]
    pub fn ident(&self) -> &TypeIdent {
        &self.ident
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.ident.name()
    }

    /// Creates a default instance of the described type.
    #[inline]
    pub fn new_instance(&self) -> Box<dyn Mappable> {
        (self.construct)()
    }

    /// Public fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Non-public fields in declaration order.
    #[inline]
    pub fn hidden_fields(&self) -> &[FieldDescriptor] {
        &self.hidden
    }

    /// Returns the public field named `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Accessor methods in declaration order.
    pub fn methods(&self) -> impl ExactSizeIterator<Item = &MethodDescriptor> {
        self.methods.values()
    }

    #[inline]
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    /// Returns the setter named exactly `name`.
    pub fn setter(&self, name: &str) -> Option<&MethodDescriptor> {
        self.method(name).filter(|method| method.is_setter())
    }

    /// Returns the getter named exactly `name`.
    pub fn getter(&self, name: &str) -> Option<&MethodDescriptor> {
        self.method(name).filter(|method| method.is_getter())
    }

    /// Returns the setter owning `field`, `set` + the capitalized name.
    pub fn setter_for(&self, field: &str) -> Option<&MethodDescriptor> {
        self.setter(&setter_name(field))
    }

    /// Returns the getter owning `field`, `get` + the capitalized name.
    pub fn getter_for(&self, field: &str) -> Option<&MethodDescriptor> {
        self.getter(&getter_name(field))
    }

    /// Getters whose result is appended to the output, with their wire names.
    pub fn appended(&self) -> impl Iterator<Item = (&'static str, &MethodDescriptor)> {
        self.methods
            .values()
            .filter(|method| method.is_getter())
            .filter_map(|method| method.append_name().map(|wire| (wire, method)))
    }

    /// Identities of described types reachable from fields and setter parameters.
    pub(crate) fn dependencies(&self) -> Vec<TypeIdent> {
        let mut found = Vec::new();
        let mut push = |ident: &TypeIdent| {
            if ident.describe_fn().is_some() && !found.contains(ident) {
                found.push(*ident);
            }
        };

        for field in self.fields.iter().chain(&self.hidden) {
            field.ty().into_iter().chain(field.element_type()).for_each(|ty| ty.for_each_ident(&mut push));
        }
        for param in self.methods.values().flat_map(MethodDescriptor::params) {
            param.ty().into_iter().chain(param.element_type()).for_each(|ty| ty.for_each_ident(&mut push));
        }
        found
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("ident", &self.ident)
            .field("fields", &self.fields)
            .field("hidden", &self.hidden)
            .field("methods", &self.methods.values().collect::<Vec<_>>())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ClassBuilder

/// Builder of a [`ClassDescriptor`], see [`ClassDescriptor::builder`].
pub struct ClassBuilder {
    class: ClassDescriptor,
}

impl ClassBuilder {
    /// Adds a field. Fields created with [`FieldDescriptor::hidden`] are
    /// recorded as non-public.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        if field.is_public() {
            self.class.fields.push(field);
        } else {
            self.class.hidden.push(field);
        }
        self
    }

    /// Adds an accessor method.
    ///
    /// Only `get*` and `set*` names take part in mapping, others are dropped.
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        let name = method.name();
        if !(name.starts_with("get") || name.starts_with("set")) {
            log::warn!(
                "`{}::{name}` is not an accessor method and will be ignored.",
                self.class.name(),
            );
            return self;
        }
        if self.class.methods.insert(name, method).is_some() {
            log::warn!("`{}::{name}` is declared twice, the last one wins.", self.class.name());
        }
        self
    }

    #[inline]
    pub fn build(self) -> ClassDescriptor {
        self.class
    }
}
