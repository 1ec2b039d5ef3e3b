//! Shared types for the presale hold service
//!
//! Common types used across crates: the unified error system
//! (codes, `AppError`, API response envelope) and small utilities.

pub mod error;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
