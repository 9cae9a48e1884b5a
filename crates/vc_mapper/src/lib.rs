#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Allows `vc_mapper::...` paths inside macros to resolve in this crate too.
extern crate self as vc_mapper;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod context;
mod error;
mod hash;
mod mapper;
mod mappable;
mod reader;
mod resolve;
mod value;
mod writer;

pub mod codec;
pub mod info;
pub mod naming;

#[cfg(feature = "auto_register")]
mod auto_register;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use cache::DescriptorCache;
pub use context::MapperContext;
pub use error::MapperError;
pub use info::Typed;
pub use mappable::{Describe, Entries, Mappable, View};
pub use mapper::{JsonInput, MapperOptions, ObjectMapper};
pub use value::{FromValue, Value};

#[cfg(feature = "auto_register")]
pub use auto_register::AutoRegistration;

/// Submits [`Describe`] types for static registration.
///
/// Expands to nothing without the `auto_register` feature.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($($ty:ty),+ $(,)?) => {};
}

/// The most commonly used items.
pub mod prelude {
    pub use crate::codec::{Codec, CodecError};
    pub use crate::info::{ClassDescriptor, FieldDescriptor, MethodDescriptor};
    pub use crate::info::{ParameterDescriptor, TypeDescriptor, TypeIdent};
    pub use crate::{Describe, FromValue, Mappable, Value};
    pub use crate::{MapperContext, MapperError, ObjectMapper};
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests;
