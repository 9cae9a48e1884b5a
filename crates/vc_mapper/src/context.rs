use crate::codec::{CodecRegistry, install_defaults};
use crate::{Describe, DescriptorCache};

// -----------------------------------------------------------------------------
// MapperContext

/// State shared by every [`ObjectMapper`](crate::ObjectMapper) built on it:
/// the descriptor cache and the shared codec scope.
///
/// Construct one and hand it to mappers as an `Arc`; codecs registered here
/// are visible to all of them, below their own instance codecs.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_mapper::{MapperContext, ObjectMapper};
/// use vc_mapper::codec::JsonObjectCodec;
///
/// let context = Arc::new(MapperContext::new());
/// let a = ObjectMapper::with_context(Arc::clone(&context));
/// let b = ObjectMapper::with_context(Arc::clone(&context));
///
/// a.add_shared_codec::<JsonObjectCodec>("Settings");
/// assert!(b.context().codecs().contains("Settings"));
///
/// a.add_codec::<JsonObjectCodec>("Profile");
/// assert!(!b.context().codecs().contains("Profile"));
/// ```
#[derive(Debug)]
pub struct MapperContext {
    descriptors: DescriptorCache,
    codecs: CodecRegistry,
}

impl Default for MapperContext {
    /// See [`MapperContext::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MapperContext {
    /// Creates a context with the default codecs installed.
    pub fn new() -> Self {
        let context = Self::without_default_codecs();
        install_defaults(&context.codecs);
        context
    }

    /// Creates a context whose shared codec scope is empty.
    pub fn without_default_codecs() -> Self {
        Self {
            descriptors: DescriptorCache::new(),
            codecs: CodecRegistry::new(),
        }
    }

    #[inline]
    pub fn descriptors(&self) -> &DescriptorCache {
        &self.descriptors
    }

    /// The shared codec scope.
    #[inline]
    pub fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    /// Registers `T` in the descriptor cache.
    #[inline]
    pub fn register<T: Describe>(&self) -> bool {
        self.descriptors.register::<T>()
    }
}
