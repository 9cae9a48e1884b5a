//! Items used by the exported macros, not public API.

#[cfg(feature = "auto_register")]
pub use inventory;
