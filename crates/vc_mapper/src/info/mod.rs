//! Descriptors of mappable types.
//!
//! ## Menu
//!
//! - [`TypeIdent`]: The identity of a type: a name, the names of its ancestors,
//!   and optionally the function describing it.
//! - [`Typed`]: A trait for obtaining a type's [`TypeIdent`].
//!
//! - [`TypeDescriptor`]: The declared type of a field or parameter, one of:
//!     - `Scalar`: one of the [`ScalarKind`]s, `bool`, `int`, `float`, `string`,
//!       `array`, `object` and the pseudo kind `null`.
//!     - `Object`: a described type or a type handled by a codec.
//!     - `Collection`: an array whose elements resolve to one type.
//!     - `Union`: members tried in declaration order.
//!
//! - [`FieldDescriptor`]: A field, its wire key and its erased accessors.
//! - [`ParameterDescriptor`]: The declared type of a setter parameter.
//! - [`MethodDescriptor`]: A `get*` or `set*` accessor, optionally appended to
//!   the output or declared to fill fields.
//! - [`ClassDescriptor`]: Everything above for one type, built once by
//!   [`Describe::describe`](crate::Describe::describe) through a [`ClassBuilder`].

// -----------------------------------------------------------------------------
// Modules

mod class;
mod field;
mod method;
mod type_desc;
mod type_ident;

// -----------------------------------------------------------------------------
// Exports

pub use class::{ClassBuilder, ClassDescriptor};
pub use field::FieldDescriptor;
pub use method::{MethodDescriptor, ParameterDescriptor};
pub use type_desc::{ScalarKind, TypeDescriptor};
pub use type_ident::{TypeIdent, Typed};

