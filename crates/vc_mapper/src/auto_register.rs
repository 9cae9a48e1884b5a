use crate::info::{TypeIdent, Typed};
use crate::{Describe, DescriptorCache};

// -----------------------------------------------------------------------------
// AutoRegistration

/// A statically submitted [`Describe`] type, see [`auto_register!`](crate::auto_register).
pub struct AutoRegistration {
    ident: fn() -> TypeIdent,
}

impl AutoRegistration {
    #[inline]
    pub const fn of<T: Describe>() -> Self {
        Self {
            ident: <T as Typed>::type_ident,
        }
    }

    #[inline]
    pub fn ident(&self) -> TypeIdent {
        (self.ident)()
    }
}

inventory::collect!(AutoRegistration);

pub(crate) fn register_all(cache: &DescriptorCache) {
    for registration in inventory::iter::<AutoRegistration> {
        cache.register_ident(&registration.ident());
    }
}

// -----------------------------------------------------------------------------
// Macro

/// Submits [`Describe`](crate::Describe) types for static registration.
///
/// Every [`DescriptorCache::new`](crate::DescriptorCache::new) (and so every
/// [`ObjectMapper::new`](crate::ObjectMapper::new)) knows them, which lets
/// [`read_value_by_name`](crate::ObjectMapper::read_value_by_name) find types
/// that were never registered explicitly.
///
/// Expands to nothing without the `auto_register` feature.
#[macro_export]
macro_rules! auto_register {
    ($($ty:ty),+ $(,)?) => {
        $(
            $crate::__macro_exports::inventory::submit! {
                $crate::AutoRegistration::of::<$ty>()
            }
        )+
    };
}
