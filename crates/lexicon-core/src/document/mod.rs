//! Codec for the persisted configuration document.
//!
//! Document shape (root element `config`):
//! ```text
//! config
//!   paths
//!     path*                      text = filesystem path
//!   groups
//!     group*                     attributes: name, icon?
//!       dictionary*              text = dictionary identifier
//!   preferences
//!     enableTrayIcon             "0" | "1"
//!     startToTray                "0" | "1"
//!     closeToTray                "0" | "1"
//!     enableScanPopup            "0" | "1"
//!     enableScanPopupModifiers   "0" | "1"
//!     scanPopupModifiers         decimal u32
//!   lastMainGroup                text
//!   lastPopupGroup               text
//! ```
//!
//! Reading is lenient about content and strict about syntax: any section may
//! be missing, unknown elements are ignored, flags are `true` only for the
//! exact text `"1"`.  A document that is not well-formed fails with
//! [`DocumentError`] and nothing is salvaged from it.
//!
//! Writing is deterministic: the same [`Configuration`] always renders to the
//! same bytes, with a one-space indent and no XML declaration.

mod reader;
mod tree;
mod writer;

use thiserror::Error;

pub use reader::parse_document;
pub use writer::render_document;

/// Name of the document element.
pub const ROOT_ELEMENT: &str = "config";

/// The document is not well-formed.
///
/// `line` and `column` are 1-based; the column counts characters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed document at line {line}, column {column}: {message}")]
pub struct DocumentError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl DocumentError {
    /// Builds an error for byte `offset` of `input`.
    pub fn at(input: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_column(input, offset);
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// The document could not be rendered.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot write configuration document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("rendered configuration document is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Converts a byte offset into a 1-based (line, column) pair.
fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let bytes = input.as_bytes();
    let prefix = &bytes[..offset.min(bytes.len())];

    let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = prefix
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |nl| nl + 1);
    let column = String::from_utf8_lossy(&prefix[line_start..]).chars().count() + 1;

    (line, column)
}
