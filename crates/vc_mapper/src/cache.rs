use alloc::sync::Arc;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::MapperError;
use crate::hash::HashMap;
use crate::info::{ClassDescriptor, TypeIdent, Typed};
use crate::Describe;

// -----------------------------------------------------------------------------
// DescriptorCache

/// Registered types and their descriptors, built on first use.
///
/// A type becomes known through [`register`](Self::register), through a
/// [`TypeIdent`] carrying its describe function (the object types of fields
/// and setter parameters are registered when their owner is described), or
/// through static registration with the `auto_register` feature.
///
/// Descriptors are never invalidated. Two threads describing the same type
/// at once may both run its builder; the first result stored is kept.
///
/// # Examples
///
/// ```
/// use vc_mapper::{Describe, DescriptorCache, MapperError};
/// use vc_mapper::info::ClassDescriptor;
///
/// #[derive(Default)]
/// struct Empty;
///
/// impl Describe for Empty {
///     const NAME: &'static str = "Empty";
///
///     fn describe() -> ClassDescriptor {
///         ClassDescriptor::builder::<Self>().build()
///     }
/// }
///
/// let cache = DescriptorCache::empty();
/// assert!(matches!(cache.describe("Empty"), Err(MapperError::ClassNotFound { .. })));
///
/// cache.register::<Empty>();
/// let first = cache.describe("Empty").unwrap();
/// let second = cache.describe("Empty").unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
pub struct DescriptorCache {
    known: RwLock<HashMap<&'static str, fn() -> ClassDescriptor>>,
    described: RwLock<HashMap<&'static str, Arc<ClassDescriptor>>>,
}

impl Default for DescriptorCache {
    /// See [`DescriptorCache::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorCache {
    /// Creates a cache without any registered type.
    pub fn empty() -> Self {
        Self {
            known: RwLock::new(HashMap::default()),
            described: RwLock::new(HashMap::default()),
        }
    }

    /// Creates a cache holding the statically registered types.
    ///
    /// Without the `auto_register` feature this is [`DescriptorCache::empty`].
    pub fn new() -> Self {
        let cache = Self::empty();
        #[cfg(feature = "auto_register")]
        crate::auto_register::register_all(&cache);
        cache
    }

    /// Registers `T`, returns `false` if it was already known.
    #[inline]
    pub fn register<T: Describe>(&self) -> bool {
        self.register_ident(&<T as Typed>::type_ident())
    }

    /// Registers the type behind `ident`, returns `false` if it was already
    /// known or carries no describe function.
    pub fn register_ident(&self, ident: &TypeIdent) -> bool {
        let Some(describe) = ident.describe_fn() else {
            return false;
        };
        if self.is_registered(ident.name()) {
            return false;
        }

        let mut known = self.known.write().unwrap_or_else(PoisonError::into_inner);
        if known.contains_key(ident.name()) {
            return false;
        }
        known.insert(ident.name(), describe);
        true
    }

    #[inline]
    pub fn is_registered(&self, name: &str) -> bool {
        self.known
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Returns `true` once the descriptor of `name` has been built.
    #[inline]
    pub fn is_described(&self, name: &str) -> bool {
        self.described
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Returns the descriptor of the type named `name`, building it on first use.
    ///
    /// # Errors
    ///
    /// [`MapperError::ClassNotFound`] if the type is not registered.
    pub fn describe(&self, name: &str) -> Result<Arc<ClassDescriptor>, MapperError> {
        if let Some(class) = self
            .described
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(Arc::clone(class));
        }

        let describe = self
            .known
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
            .ok_or_else(|| MapperError::class_not_found(name))?;

        let class = Arc::new(describe());
        for dependency in class.dependencies() {
            self.register_ident(&dependency);
        }
        log::trace!("described `{name}`");

        let mut described = self.described.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(described.entry(class.name()).or_insert(class)))
    }

    /// Registers the type behind `ident` if needed, then describes it.
    pub fn describe_ident(&self, ident: &TypeIdent) -> Result<Arc<ClassDescriptor>, MapperError> {
        self.register_ident(ident);
        self.describe(ident.name())
    }
}

impl fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(
                self.known
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .keys(),
            )
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
