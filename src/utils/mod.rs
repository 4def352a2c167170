//! Utility modules for browser access and display formatting.
//!
//! Provides:
//! - [`dom`] - Window, storage, and global lookups
//! - [`format`] - Address shortening for display

pub mod dom;
pub mod format;
