//! Application layer use cases for the settings tool.
//!
//! Use cases here operate on an already loaded [`Configuration`] and a
//! dictionary [`Catalog`]; they never touch the file system.  Loading and
//! saving belong to `infrastructure::storage`, and the catalog comes in
//! through the [`ports::CatalogProvider`] trait.
//!
//! # Sub-modules
//!
//! - **`session`**      – Resolves persisted groups against the catalog and
//!   applies membership edits; `commit` yields the configuration to save.
//! - **`manage_paths`** – Adds and removes dictionary search paths.
//! - **`ports`**        – Traits implemented by the infrastructure layer.
//!
//! [`Configuration`]: lexicon_core::Configuration
//! [`Catalog`]: lexicon_core::Catalog

pub mod manage_paths;
pub mod ports;
pub mod session;
