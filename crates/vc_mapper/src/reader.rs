use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use serde_json::{Map, Value as Json};

use crate::hash::HashSet;
use crate::info::{ClassDescriptor, FieldDescriptor, MethodDescriptor, TypeIdent};
use crate::naming::{setter_name, studly_case};
use crate::resolve::TypeResolver;
use crate::{Mappable, MapperError, ObjectMapper};

// -----------------------------------------------------------------------------
// Reader

/// Builds instances of described types from raw JSON objects.
pub(crate) struct Reader<'m> {
    mapper: &'m ObjectMapper,
    resolver: TypeResolver<'m>,
}

#[inline]
fn target(instance: &mut Box<dyn Mappable>) -> &mut dyn Any {
    &mut **instance
}

impl<'m> Reader<'m> {
    #[inline]
    pub(crate) fn new(mapper: &'m ObjectMapper) -> Self {
        Self {
            mapper,
            resolver: TypeResolver::new(mapper),
        }
    }

    /// Reads the type behind `ident`, registering it first if it is describable.
    pub(crate) fn read(
        &self,
        raw: &Map<String, Json>,
        ident: &TypeIdent,
    ) -> Result<Box<dyn Mappable>, MapperError> {
        let class = self.mapper.context().descriptors().describe_ident(ident)?;
        self.read_class(raw, &class)
    }

    pub(crate) fn read_class(
        &self,
        raw: &Map<String, Json>,
        class: &ClassDescriptor,
    ) -> Result<Box<dyn Mappable>, MapperError> {
        let mut instance = class.new_instance();
        let mut invoked: HashSet<&'static str> = HashSet::default();
        let mut pending: Vec<&FieldDescriptor> = Vec::new();

        // Public fields, a setter owning the field replaces the assignment.
        for field in class.fields() {
            let raw_value = raw.get(field.wire_name());

            if let Some(setter) = class.setter_for(field.name()) {
                if self.invoke(class, setter, raw_value, &mut instance)? {
                    invoked.insert(setter.name());
                } else if !field.allows_null() {
                    pending.push(field);
                }
                continue;
            }

            let value = self
                .resolver
                .resolve(raw_value, field.ty(), field.element_type())?;

            if value.is_null() && !field.allows_null() {
                pending.push(field);
                continue;
            }

            // A value the field cannot hold counts as null.
            let found = value.kind_name();
            if let Err(err) = field.assign(target(&mut instance), value) {
                log::debug!("cannot assign {found} to `{}::{}`: {err}", class.name(), field.name());
                if !field.allows_null() {
                    log::debug!("`{}::{}` is pending as null", class.name(), field.name());
                    pending.push(field);
                }
            }
        }

        // Setters matching raw keys, each invoked at most once.
        for (key, raw_value) in raw {
            let studly = format!("set{}", studly_case(key));
            if invoked.contains(studly.as_str()) {
                continue;
            }
            if let Some(setter) = class.setter(&studly) {
                if self.invoke(class, setter, Some(raw_value), &mut instance)? {
                    invoked.insert(setter.name());
                }
                continue;
            }

            let plain = setter_name(key);
            if invoked.contains(plain.as_str()) {
                continue;
            }
            if let Some(setter) = class.setter(&plain)
                && self.invoke(class, setter, Some(raw_value), &mut instance)?
            {
                invoked.insert(setter.name());
            }
        }

        for field in pending {
            let filled = invoked
                .iter()
                .filter_map(|name| class.method(name))
                .any(|setter| setter.does_fill(field.name()));

            if !filled {
                return Err(MapperError::not_null(class.name(), field.name()));
            }
        }

        Ok(instance)
    }

    /// Resolves the argument and invokes `setter`, returns `false` if the
    /// argument does not fit the setter's parameter.
    fn invoke(
        &self,
        class: &ClassDescriptor,
        setter: &MethodDescriptor,
        raw_value: Option<&Json>,
        instance: &mut Box<dyn Mappable>,
    ) -> Result<bool, MapperError> {
        let param = setter.first_param();
        let arg = self.resolver.resolve(
            raw_value,
            param.and_then(|param| param.ty()),
            param.and_then(|param| param.element_type()),
        )?;

        let found = arg.kind_name();
        match setter.call_setter(target(instance), arg) {
            Ok(()) => Ok(true),
            Err(err) => {
                log::debug!("`{}::{}` skipped for {found}: {err}", class.name(), setter.name());
                Ok(false)
            }
        }
    }
}
