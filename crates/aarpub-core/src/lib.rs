//! Core data types for aarpub.
//!
//! This crate defines what a publishing run is made of: the `Aarpub.toml`
//! manifest, the publication catalog it carries, the `.aarpub.env` secrets
//! file, and the settings resolved once from the environment at start-up.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod catalog;
pub mod manifest;
pub mod properties;
pub mod settings;
