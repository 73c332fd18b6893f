//! # lexicon-core
//!
//! Configuration core of the Lexicon dictionary application: the in-memory
//! configuration model, the codec for the per-user configuration document,
//! and the resolution and editing rules for dictionary groups.
//!
//! This crate does no file-system I/O.  Locating, reading and writing the
//! configuration file is the job of `lexicon-settings`.
//!
//! # Architecture overview
//!
//! - **`catalog`** – The runtime set of loaded dictionaries.  It is rebuilt on
//!   every run by scanning the configured paths, so it is never persisted.
//!
//! - **`config`** – [`Configuration`]: search paths, groups (by dictionary
//!   identifier), preferences, and the last selected group per UI context.
//!
//! - **`document`** – Parses and renders the configuration document.  Parsing
//!   is all-or-nothing; rendering is byte-for-byte deterministic.
//!
//! - **`groups`** – Resolves persisted groups against a catalog snapshot and
//!   defines the ordered-list editing contract a UI must follow.

pub mod catalog;
pub mod config;
pub mod document;
pub mod groups;

pub use catalog::{Catalog, CatalogEntry, Dictionary, DictionaryRef};
pub use config::{Configuration, PersistedGroup, PreferenceKey, Preferences, ScanPopupModifiers};
pub use document::{parse_document, render_document, DocumentError, RenderError};
pub use groups::{resolve, resolve_single, unresolve, DictList, EditError, GroupList, ResolvedGroup};
