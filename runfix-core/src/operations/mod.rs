//! High-level operations that correspond to CLI commands
//!
//! These merge the loaded [`Config`](crate::Config) with per-invocation
//! overrides, resolve the candidate files and hand off to the batch engine.

pub mod fix;
pub mod restore;

pub use fix::{fix_operation, FixRequest};
pub use restore::{restore_operation, RestoreRequest};
