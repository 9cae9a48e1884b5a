use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::info::{TypeIdent, Typed};

// -----------------------------------------------------------------------------
// ScalarKind

/// Built-in kinds a raw value can be coerced into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    String,
    /// Raw JSON array or object, kept as data.
    Array,
    /// Raw JSON object, kept as data.
    Object,
    /// The `null` pseudo kind, only meaningful as a union member.
    Null,
}

impl ScalarKind {
    /// The kind name, also the target name of leaf codecs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The declared type of a field or a setter parameter.
///
/// A missing descriptor (`None` where an `Option<TypeDescriptor>` is taken)
/// means untyped: raw values pass through as is.
///
/// # Examples
///
/// ```
/// use vc_mapper::info::TypeDescriptor;
///
/// let ty = TypeDescriptor::union([TypeDescriptor::int(), TypeDescriptor::null()]);
/// assert!(ty.allows_null());
/// assert_eq!(ty.name(), "int|null");
///
/// let ty = TypeDescriptor::string().nullable();
/// assert!(ty.allows_null());
/// assert!(!TypeDescriptor::string().allows_null());
/// ```
#[derive(Clone, Debug)]
pub enum TypeDescriptor {
    Scalar { kind: ScalarKind, nullable: bool },
    Object { ident: TypeIdent, nullable: bool },
    Collection { element: Box<TypeDescriptor>, nullable: bool },
    Union { members: Vec<TypeDescriptor>, nullable: bool },
}

impl TypeDescriptor {
    #[inline]
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar {
            kind,
            nullable: matches!(kind, ScalarKind::Null),
        }
    }

    #[inline]
    pub const fn bool() -> Self {
        Self::scalar(ScalarKind::Bool)
    }

    #[inline]
    pub const fn int() -> Self {
        Self::scalar(ScalarKind::Int)
    }

    #[inline]
    pub const fn float() -> Self {
        Self::scalar(ScalarKind::Float)
    }

    #[inline]
    pub const fn string() -> Self {
        Self::scalar(ScalarKind::String)
    }

    #[inline]
    pub const fn array() -> Self {
        Self::scalar(ScalarKind::Array)
    }

    #[inline]
    pub const fn object() -> Self {
        Self::scalar(ScalarKind::Object)
    }

    #[inline]
    pub const fn null() -> Self {
        Self::scalar(ScalarKind::Null)
    }

    /// An object type identified by `T`.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::ident(T::type_ident())
    }

    #[inline]
    pub const fn ident(ident: TypeIdent) -> Self {
        Self::Object {
            ident,
            nullable: false,
        }
    }

    /// An array whose elements all resolve against `element`.
    #[inline]
    pub fn collection(element: TypeDescriptor) -> Self {
        Self::Collection {
            element: Box::new(element),
            nullable: false,
        }
    }

    /// A union of `members`, nullable if one of them is the `null` kind.
    pub fn union(members: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        let members: Vec<TypeDescriptor> = members.into_iter().collect();
        let nullable = members.iter().any(TypeDescriptor::is_null_kind);
        Self::Union { members, nullable }
    }

    /// Marks the type as accepting null.
    pub fn nullable(mut self) -> Self {
        match &mut self {
            Self::Scalar { nullable, .. }
            | Self::Object { nullable, .. }
            | Self::Collection { nullable, .. }
            | Self::Union { nullable, .. } => *nullable = true,
        }
        self
    }

    pub fn allows_null(&self) -> bool {
        match self {
            Self::Scalar { nullable, .. }
            | Self::Object { nullable, .. }
            | Self::Collection { nullable, .. }
            | Self::Union { nullable, .. } => *nullable,
        }
    }

    /// Returns `true` for the `null` pseudo kind.
    #[inline]
    pub fn is_null_kind(&self) -> bool {
        matches!(
            self,
            Self::Scalar {
                kind: ScalarKind::Null,
                ..
            }
        )
    }

    /// The name used in messages; union members are joined with `|`.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Self::Scalar { kind, .. } => Cow::Borrowed(kind.name()),
            Self::Object { ident, .. } => Cow::Borrowed(ident.name()),
            Self::Collection { .. } => Cow::Borrowed(ScalarKind::Array.name()),
            Self::Union { members, .. } => {
                let mut joined = String::new();
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        joined.push('|');
                    }
                    joined.push_str(&member.name());
                }
                Cow::Owned(joined)
            }
        }
    }

    /// Object identities reachable from this type.
    pub(crate) fn for_each_ident(&self, f: &mut dyn FnMut(&TypeIdent)) {
        match self {
            Self::Scalar { .. } => {}
            Self::Object { ident, .. } => f(ident),
            Self::Collection { element, .. } => element.for_each_ident(f),
            Self::Union { members, .. } => {
                members.iter().for_each(|member| member.for_each_ident(f));
            }
        }
    }
}

impl From<ScalarKind> for TypeDescriptor {
    #[inline]
    fn from(kind: ScalarKind) -> Self {
        Self::scalar(kind)
    }
}

// -----------------------------------------------------------------------------
// Tests
