//! Hash containers used by the caches, based on `hashbrown` and `foldhash`.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6A09E667F3BCC908);

/// Fixed hash state based on `foldhash`, seeded with a constant.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Containers

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

pub(crate) type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;
