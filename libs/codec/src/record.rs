//! Record traits and raw field carriers.
//!
//! A record participates in mapping through two traits. [`Message`] is the
//! serialize side: object-safe, so composite and group fields can recurse
//! through `&dyn Message` without the mapper knowing concrete types.
//! [`FromTree`] is the deserialize side: the mapper resolves every bound
//! path into a [`RawRecord`] of raw inputs and hands it to the record's own
//! validated constructor, which renders scalars through the scalar layer
//! and decides what is required. [`MessageSpec`] is the static handle the
//! registry stores per (code, version).

use std::any::Any;
use std::collections::HashMap;

use xmldoc::Element;

use crate::binding::Descriptor;
use crate::error::{WireError, WireResult};

/// A field's value as seen by the serialize pass.
///
/// Scalars arrive already rendered to wire text; the mapper never touches
/// native scalar types.
pub enum FieldValue<'a> {
    Scalar(Option<String>),
    Composite(Option<&'a dyn Message>),
    List(Vec<&'a dyn Message>),
}

/// Serialize-side view of a record.
pub trait Message: Any + std::fmt::Debug {
    /// The record's static binding table.
    fn descriptor(&self) -> &'static Descriptor;

    /// Current value of the named field. Called only with field names from
    /// this record's own descriptor.
    fn value(&self, field: &str) -> FieldValue<'_>;

    /// Upcast for concrete-type recovery after dynamic dispatch.
    fn as_any(&self) -> &dyn Any;
}

/// Deserialize-side constructor of a record.
pub trait FromTree: Sized {
    /// The record's static binding table.
    fn descriptor() -> &'static Descriptor;

    /// Build the record from raw field inputs. Scalar parsing, required
    /// field checks, and business rules all happen here; failures pass
    /// through the mapper unchanged.
    fn from_raw(raw: RawRecord<'_>) -> WireResult<Self>;
}

/// One field's raw input as resolved from the document.
#[derive(Debug, Clone)]
pub enum Raw<'a> {
    /// Element text or attribute value
    Text(&'a str),
    /// The leaf node of a composite field
    Node(&'a Element),
    /// All sibling nodes of a repeated group, in document order
    Nodes(Vec<&'a Element>),
}

/// Raw field inputs collected by one deserialize pass.
///
/// Fields the document did not provide are simply absent from the map;
/// absence is not an error until a constructor declares the field required.
#[derive(Debug)]
pub struct RawRecord<'a> {
    record: &'static str,
    fields: HashMap<&'static str, Raw<'a>>,
}

impl<'a> RawRecord<'a> {
    pub(crate) fn new(record: &'static str) -> Self {
        Self {
            record,
            fields: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, field: &'static str, raw: Raw<'a>) {
        self.fields.insert(field, raw);
    }

    /// Record type name, for error context.
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Raw text of a scalar field, if the document provided one.
    pub fn text(&self, field: &str) -> Option<&'a str> {
        match self.fields.get(field) {
            Some(Raw::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Raw text of a scalar field the constructor considers mandatory.
    pub fn require_text(&self, field: &'static str) -> WireResult<&'a str> {
        self.text(field).ok_or(WireError::MissingField {
            record: self.record,
            field,
        })
    }

    /// Leaf node of a composite field, if present.
    pub fn node(&self, field: &str) -> Option<&'a Element> {
        match self.fields.get(field) {
            Some(Raw::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Sibling nodes of a repeated group; empty when the document carries
    /// none.
    pub fn nodes(&self, field: &str) -> &[&'a Element] {
        match self.fields.get(field) {
            Some(Raw::Nodes(nodes)) => nodes,
            _ => &[],
        }
    }
}

/// Static registry handle for one (code, version) implementation.
///
/// The descriptor and decode entry points are plain function pointers so a
/// handle can live in a `static` and be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct MessageSpec {
    /// Message code, e.g. "STR0005"
    pub code: &'static str,
    /// Catalogue version, e.g. "10.2"
    pub version: &'static str,
    /// The implementation's binding table
    pub descriptor: fn() -> &'static Descriptor,
    /// Decode a payload subtree into a boxed record
    pub decode: fn(&Element) -> WireResult<Box<dyn Message>>,
}

/// Ready-made [`MessageSpec::decode`] implementation for any record that
/// is both mappable and constructible.
pub fn decode_boxed<T>(doc: &Element) -> WireResult<Box<dyn Message>>
where
    T: FromTree + Message + 'static,
{
    Ok(Box::new(crate::mapper::deserialize::<T>(doc)?))
}
