//! Shared utilities for aarpub.
//!
//! Cross-cutting concerns used by the other crates: the error type,
//! filesystem helpers, digests, external process spawning, and terminal
//! status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;
