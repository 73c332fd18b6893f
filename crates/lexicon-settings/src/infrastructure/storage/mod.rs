//! Storage infrastructure: the per-user directory and the configuration file.
//!
//! - `home`   – locates (and lazily creates) the per-user storage root.
//! - `config` – reads and writes the configuration document inside it, and
//!   hands out the index directory and stylesheet paths.
//!
//! The document format itself lives in `lexicon_core::document`; this module
//! only moves bytes between that codec and the file system.

pub mod config;
pub mod home;

pub use config::{ConfigStore, ConfigStoreError};
pub use home::ConfigRoot;
