//! Infrastructure layer for the settings application.
//!
//! Contains the file-system adapters: configuration storage and the catalog
//! manifest reader.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `lexicon_core`, but MUST NOT be imported by the `application` layer.

pub mod catalog;
pub mod storage;
