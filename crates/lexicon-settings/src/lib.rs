//! lexicon-settings library entry point.
//!
//! Shares the module tree between the `lexicon-settings` binary and the
//! integration tests in `tests/`.

pub mod application;
pub mod infrastructure;
