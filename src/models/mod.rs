//! Data models for the changelog application.
//!
//! These models match the frontend TypeScript interfaces for seamless interoperability.

mod entry;
mod reaction;
mod revision;

pub use entry::*;
pub use reaction::*;
pub use revision::*;
