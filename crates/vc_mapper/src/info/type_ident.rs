use core::fmt;

use crate::info::{ClassDescriptor, ScalarKind};

// -----------------------------------------------------------------------------
// TypeIdent

/// The identity of a mappable type.
///
/// Two identities are equal when their names are equal. `ancestors` lists the
/// names a value of this type also answers to, which is how codecs registered
/// for a base name (e.g. `DateTimeInterface`) match concrete types.
///
/// # Examples
///
/// ```
/// use vc_mapper::info::TypeIdent;
///
/// const IDENT: TypeIdent = TypeIdent::new("DateTime").with_ancestors(&["DateTimeInterface"]);
///
/// assert!(IDENT.is_a("DateTime"));
/// assert!(IDENT.is_a("DateTimeInterface"));
/// assert!(!IDENT.is_a("Keys"));
/// ```
#[derive(Clone, Copy)]
pub struct TypeIdent {
    name: &'static str,
    ancestors: &'static [&'static str],
    describe: Option<fn() -> ClassDescriptor>,
}

impl TypeIdent {
    /// Creates an identity without ancestors.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            ancestors: &[],
            describe: None,
        }
    }

    /// The identity of a scalar kind, used to look up leaf codecs.
    #[inline]
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self::new(kind.name())
    }

    #[inline]
    pub const fn with_ancestors(mut self, ancestors: &'static [&'static str]) -> Self {
        self.ancestors = ancestors;
        self
    }

    /// Attaches the function building the type's descriptor, so the type
    /// can be registered the first time it is met.
    #[inline]
    pub const fn with_describe(mut self, describe: fn() -> ClassDescriptor) -> Self {
        self.describe = Some(describe);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ancestors(&self) -> &'static [&'static str] {
        self.ancestors
    }

    #[inline]
    pub fn describe_fn(&self) -> Option<fn() -> ClassDescriptor> {
        self.describe
    }

    /// Returns `true` if `name` is this type or one of its ancestors.
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name || self.ancestors.iter().any(|ancestor| *ancestor == name)
    }
}

impl PartialEq for TypeIdent {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeIdent {}

impl fmt::Debug for TypeIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeIdent")
            .field("name", &self.name)
            .field("ancestors", &self.ancestors)
            .field("describable", &self.describe.is_some())
            .finish()
    }
}

impl fmt::Display for TypeIdent {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// -----------------------------------------------------------------------------
// Typed

/// A type with a static [`TypeIdent`].
///
/// Implemented for every [`Describe`](crate::Describe) type, and by hand for
/// opaque types handled by a codec.
pub trait Typed: 'static {
    fn type_ident() -> TypeIdent;
}
