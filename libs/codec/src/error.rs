//! Mapping-level errors for record/document conversion
//!
//! Provides the full error taxonomy for the spbwire codec. Shape errors
//! indicate a bug in a record's field-binding table; document errors a
//! mismatch between an input document and the expected record type;
//! dispatch errors an unresolvable message identity. Constraint violations
//! are raised by record constructors and carried through untouched.

use thiserror::Error;

/// Codec errors with diagnostic context
///
/// Every variant is terminal and non-retryable: these are programming or
/// data errors, never transient conditions. The only deliberately swallowed
/// condition in the crate is the registry load hook reporting NotFound,
/// which never surfaces as an error at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WireError {
    /// Record declares no field bindings, so no base tag can be derived
    #[error("record {record} declares no field paths to derive a base tag from")]
    BaseTagNotFound { record: &'static str },

    /// A field's path is rooted outside the record's base tag
    #[error("field {field} of {record}: path root <{root}> disagrees with base tag <{base_tag}>")]
    DiffBaseTag {
        record: &'static str,
        field: &'static str,
        base_tag: String,
        root: String,
    },

    /// Scalar field bound without a text() or @attribute selector
    #[error("field {field} of {record}: scalar fields require a text() or @attribute selector")]
    SelectorMissing {
        record: &'static str,
        field: &'static str,
    },

    /// Composite or group field bound with a terminal selector
    #[error("field {field} of {record}: composite fields cannot carry a terminal selector")]
    SelectorPresent {
        record: &'static str,
        field: &'static str,
    },

    /// Path segment that cannot name an element (empty, or a stray selector)
    #[error("malformed segment {segment:?} in path {path:?}")]
    InvalidLocalName { path: String, segment: String },

    /// Empty field path
    #[error("empty field path")]
    EmptyPath,

    /// Document root tag does not match the record being deserialized
    #[error("document root <{found}> does not match expected base tag <{expected}>")]
    BaseTagMismatch { expected: String, found: String },

    /// No CodMsg element with text content anywhere in the document
    #[error("no CodMsg element with text content found in document")]
    CodeNotFound,

    /// Code known but resolution was asked for its default version and none
    /// was ever registered
    #[error("message {code} has no registered default version")]
    NoDefaultVersion { code: String },

    /// No implementation registered for this (code, version) pair
    #[error("message {code} version {version} is not implemented")]
    NotImplemented { code: String, version: String },

    /// Constructor-level absence of a required field
    #[error("required field {field} of {record} is missing from the document")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    /// Field-level or business-rule violation raised by a record
    /// constructor; the mapper never produces or interprets these
    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    /// Wire text could not be read or written
    #[error("wire document error: {0}")]
    Xml(String),
}

impl WireError {
    /// Create a DiffBaseTag error for a mis-rooted field path
    pub fn diff_base_tag(
        record: &'static str,
        field: &'static str,
        base_tag: impl Into<String>,
        root: impl Into<String>,
    ) -> Self {
        Self::DiffBaseTag {
            record,
            field,
            base_tag: base_tag.into(),
            root: root.into(),
        }
    }

    /// Create an InvalidLocalName error for a malformed path segment
    pub fn invalid_local_name(path: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::InvalidLocalName {
            path: path.into(),
            segment: segment.into(),
        }
    }

    /// Create a BaseTagMismatch error for a document/record disagreement
    pub fn base_tag_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::BaseTagMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a NoDefaultVersion dispatch error
    pub fn no_default_version(code: impl Into<String>) -> Self {
        Self::NoDefaultVersion { code: code.into() }
    }

    /// Create a NotImplemented dispatch error
    pub fn not_implemented(code: impl Into<String>, version: impl Into<String>) -> Self {
        Self::NotImplemented {
            code: code.into(),
            version: version.into(),
        }
    }
}

impl From<xmldoc::XmlError> for WireError {
    fn from(err: xmldoc::XmlError) -> Self {
        Self::Xml(err.to_string())
    }
}

/// Violation of a field-level constraint or cross-field business rule.
///
/// Produced by record constructors and the scalar layer, never by the
/// mapper itself; [`WireError::Constraint`] carries it through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value for {field}: {reason}")]
pub struct ConstraintViolation {
    pub field: String,
    pub reason: String,
}

impl ConstraintViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for codec operations
pub type WireResult<T> = std::result::Result<T, WireError>;
