use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::codec::Codec;
use crate::hash::HashMap;
use crate::info::TypeIdent;

// -----------------------------------------------------------------------------
// CodecRegistry

/// Creates the codec instance of a registration.
pub type CodecFactory = Arc<dyn Fn() -> Arc<dyn Codec> + Send + Sync>;

struct Scope {
    registrations: IndexMap<String, CodecFactory>,
    // Per requested name, `None` caches a miss.
    resolved: HashMap<String, Option<Arc<dyn Codec>>>,
    // Bumped by every mutation.
    generation: u64,
}

impl Scope {
    fn find(&self, ident: &TypeIdent) -> Option<&CodecFactory> {
        self.registrations.get(ident.name()).or_else(|| {
            self.registrations
                .iter()
                .find(|(target, _)| ident.is_a(target))
                .map(|(_, factory)| factory)
        })
    }
}

/// One scope of codec registrations.
///
/// Lookups are cached per requested name, misses included. Any mutation
/// clears this scope's cache under the same write lock, so a lookup never
/// returns a codec that was unregistered.
///
/// A factory runs once per requested name; later lookups of that name share
/// the instance. Factories run without the scope lock held, two racing first
/// lookups may both build and the first insert wins.
///
/// # Examples
///
/// ```
/// use vc_mapper::codec::{CodecRegistry, JsonObjectCodec};
/// use vc_mapper::info::TypeIdent;
///
/// const KEYS: TypeIdent = TypeIdent::new("Keys");
///
/// let registry = CodecRegistry::new();
/// assert!(registry.lookup(&KEYS).is_none());
///
/// registry.register::<JsonObjectCodec>("Keys");
/// assert!(registry.lookup(&KEYS).is_some());
///
/// registry.unregister("Keys");
/// assert!(registry.lookup(&KEYS).is_none());
/// ```
pub struct CodecRegistry {
    scope: RwLock<Scope>,
}

impl Default for CodecRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self {
            scope: RwLock::new(Scope {
                registrations: IndexMap::new(),
                resolved: HashMap::default(),
                generation: 0,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Scope> {
        self.scope.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Scope> {
        self.scope.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `C::default()` for `target`, replacing any previous codec.
    #[inline]
    pub fn register<C: Codec + Default>(&self, target: impl Into<String>) {
        self.register_with(target, C::default);
    }

    /// Registers a codec built by `factory` for `target`.
    pub fn register_with<C, F>(&self, target: impl Into<String>, factory: F)
    where
        C: Codec,
        F: Fn() -> C + Send + Sync + 'static,
    {
        let factory: CodecFactory = Arc::new(move || Arc::new(factory()) as Arc<dyn Codec>);
        self.register_factory(target, factory);
    }

    /// Registers one shared codec instance for `target`.
    pub fn register_instance(&self, target: impl Into<String>, codec: Arc<dyn Codec>) {
        self.register_factory(target, Arc::new(move || Arc::clone(&codec)));
    }

    pub fn register_factory(&self, target: impl Into<String>, factory: CodecFactory) {
        let mut scope = self.write();
        scope.registrations.insert(target.into(), factory);
        scope.resolved.clear();
        scope.generation += 1;
    }

    /// Removes the codec of `target`, returns `false` if there was none.
    pub fn unregister(&self, target: &str) -> bool {
        let mut scope = self.write();
        let removed = scope.registrations.shift_remove(target).is_some();
        scope.resolved.clear();
        scope.generation += 1;
        removed
    }

    #[inline]
    pub fn contains(&self, target: &str) -> bool {
        self.read().registrations.contains_key(target)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.read().registrations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read().registrations.is_empty()
    }

    /// Finds the codec of `ident` in this scope: exact name first, then the
    /// first registered ancestor.
    pub fn lookup(&self, ident: &TypeIdent) -> Option<Arc<dyn Codec>> {
        let (factory, generation) = {
            let scope = self.read();
            if let Some(resolved) = scope.resolved.get(ident.name()) {
                return resolved.clone();
            }
            (scope.find(ident).cloned(), scope.generation)
        };

        // Factories run unlocked, they may look up codecs themselves.
        let codec = factory.map(|factory| factory());

        let mut scope = self.write();
        if scope.generation != generation {
            drop(scope);
            return self.lookup(ident);
        }
        log::trace!("codec lookup of `{}`: found = {}", ident.name(), codec.is_some());
        scope
            .resolved
            .entry(ident.name().into())
            .or_insert(codec)
            .clone()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.read().registrations.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
