//! Entry store module.
//!
//! The in-memory collection is the source of truth for all changelog data.

mod contract;
mod entry_store;
mod seed;

pub use contract::*;
pub use entry_store::*;

#[cfg(test)]
pub(crate) use contract::{ReadOnlyApi, UnreachableApi};
