//! Field path specifications.
//!
//! A path string locates one field's value inside a wire document: a `/`
//! separated chain of element names, optionally ending in a terminal
//! selector. `STR0005/VlrLanc/text()` addresses element text,
//! `STR0005/Lanc/@tipo` an attribute, and a selector-less path such as
//! `STR0005/Grupo_Lanc` a composite or repeated group node.

use crate::error::{WireError, WireResult};

/// Terminal selector of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// The text content of the leaf element
    Text,
    /// A named attribute of the leaf element
    Attribute(String),
    /// No terminal selector: the leaf element itself (composite/group)
    None,
}

/// A parsed field path: one or more element names plus a terminal selector.
///
/// Immutable value object with structural equality; parsed once per field
/// binding at record-definition time and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpec {
    elements: Vec<String>,
    selector: Selector,
}

impl PathSpec {
    /// Parse a path string.
    ///
    /// The final segment is inspected: a literal `text()` selects element
    /// text, a leading `@` selects an attribute, anything else leaves the
    /// full segment list as the element path with no selector. An empty
    /// path fails with [`WireError::EmptyPath`]; an empty segment or empty
    /// attribute name with [`WireError::InvalidLocalName`].
    pub fn parse(path: &str) -> WireResult<Self> {
        if path.is_empty() {
            return Err(WireError::EmptyPath);
        }

        let mut segments: Vec<&str> = path.split('/').collect();
        let selector = match segments.last() {
            Some(&"text()") => {
                segments.pop();
                Selector::Text
            }
            Some(last) if last.starts_with('@') => {
                let name = &last[1..];
                if name.is_empty() {
                    return Err(WireError::invalid_local_name(path, *last));
                }
                let selector = Selector::Attribute(name.to_string());
                segments.pop();
                selector
            }
            _ => Selector::None,
        };

        if segments.is_empty() {
            return Err(WireError::EmptyPath);
        }
        for segment in &segments {
            if segment.is_empty() || segment.starts_with('@') || *segment == "text()" {
                return Err(WireError::invalid_local_name(path, *segment));
            }
        }

        Ok(Self {
            elements: segments.into_iter().map(String::from).collect(),
            selector,
        })
    }

    /// Element names from root to leaf, always at least one.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Root element name (first segment).
    pub fn root(&self) -> &str {
        &self.elements[0]
    }

    /// Leaf element name (last segment; equals the root for single-segment
    /// paths).
    pub fn leaf(&self) -> &str {
        &self.elements[self.elements.len() - 1]
    }

    /// Terminal selector.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}
