//! XML reading and writing errors.

use thiserror::Error;

/// Errors raised while turning wire text into an element tree or back.
#[derive(Error, Debug)]
pub enum XmlError {
    /// Underlying XML syntax error
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute inside a start tag
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Output sink failure while rendering
    #[error("XML write error: {0}")]
    Io(#[from] std::io::Error),

    /// Tag or attribute name that is not valid UTF-8
    #[error("invalid UTF-8 in name at byte {position}")]
    InvalidName { position: u64 },

    /// Document ended before the root element was closed
    #[error("unexpected end of document inside <{open_tag}>")]
    UnexpectedEof { open_tag: String },

    /// Close tag does not match the element currently open
    #[error("mismatched close tag: expected </{expected}>, got </{found}>")]
    MismatchedTag { expected: String, found: String },

    /// Input contained no root element at all
    #[error("document has no root element")]
    NoRootElement,
}

/// Result type for xmldoc operations
pub type XmlResult<T> = std::result::Result<T, XmlError>;
