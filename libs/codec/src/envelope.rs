//! # Envelope Adapter - Interbank Document Wrapper
//!
//! ## Purpose
//!
//! Every document on the wire shares one fixed outer shape regardless of
//! the message it carries: a `DOC` root, a `BCMSG` header block with sender
//! and recipient identifiers, the system domain, and the operation number,
//! and a `SISMSG` block hosting the message-specific payload subtree. The
//! envelope is itself an ordinary record mapped through the tree mapper;
//! only the payload graft and lookup are envelope-specific.
//!
//! ## Document Shape
//!
//! ```text
//! <DOC xmlns="...">
//!   <BCMSG>
//!     <IdentdEmissor>…</IdentdEmissor>
//!     <IdentdDestinatario>…</IdentdDestinatario>
//!     <DomSist>…</DomSist>
//!     <NUOp>…</NUOp>
//!   </BCMSG>
//!   <SISMSG>
//!     <STR0005>…payload…</STR0005>
//!   </SISMSG>
//! </DOC>
//! ```

use std::any::Any;

use once_cell::sync::Lazy;
use tracing::trace;
use xmldoc::Element;

use crate::binding::{Descriptor, Shape};
use crate::constants::ENVELOPE_PAYLOAD_TAG;
use crate::error::{WireError, WireResult};
use crate::mapper;
use crate::record::{FieldValue, FromTree, Message, RawRecord};
use crate::registry::{extract_message_code, Registry};

/// The fixed header fields common to every interbank document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Sender institution identifier
    pub sender: String,
    /// Recipient institution identifier
    pub recipient: String,
    /// System domain code
    pub domain: String,
    /// Operation number assigned by the sender
    pub op_number: String,
}

static DESCRIPTOR: Lazy<Descriptor> = Lazy::new(|| {
    Descriptor::build(
        "Envelope",
        &[
            ("sender", "DOC/BCMSG/IdentdEmissor/text()", Shape::Scalar),
            (
                "recipient",
                "DOC/BCMSG/IdentdDestinatario/text()",
                Shape::Scalar,
            ),
            ("domain", "DOC/BCMSG/DomSist/text()", Shape::Scalar),
            ("op_number", "DOC/BCMSG/NUOp/text()", Shape::Scalar),
        ],
    )
    .expect("envelope field table")
});

impl Message for Envelope {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "sender" => FieldValue::Scalar(Some(self.sender.clone())),
            "recipient" => FieldValue::Scalar(Some(self.recipient.clone())),
            "domain" => FieldValue::Scalar(Some(self.domain.clone())),
            "op_number" => FieldValue::Scalar(Some(self.op_number.clone())),
            _ => FieldValue::Scalar(None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FromTree for Envelope {
    fn descriptor() -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn from_raw(raw: RawRecord<'_>) -> WireResult<Self> {
        Ok(Self {
            sender: raw.require_text("sender")?.to_string(),
            recipient: raw.require_text("recipient")?.to_string(),
            domain: raw.require_text("domain")?.to_string(),
            op_number: raw.require_text("op_number")?.to_string(),
        })
    }
}

impl Envelope {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        domain: impl Into<String>,
        op_number: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            domain: domain.into(),
            op_number: op_number.into(),
        }
    }

    /// Wrap a payload record into a complete document tree.
    pub fn to_document(&self, payload: &dyn Message) -> WireResult<Element> {
        self.to_document_with_namespace(payload, None)
    }

    /// Wrap a payload record, declaring a default namespace on the root.
    pub fn to_document_with_namespace(
        &self,
        payload: &dyn Message,
        namespace: Option<&str>,
    ) -> WireResult<Element> {
        let mut doc = mapper::serialize(self)?;
        if let Some(namespace) = namespace {
            doc.set_attr("xmlns", namespace);
        }
        let payload_tree = mapper::serialize(payload)?;
        trace!(payload = payload_tree.tag(), "wrapping payload into envelope");
        doc.child_or_insert(ENVELOPE_PAYLOAD_TAG).push_child(payload_tree);
        Ok(doc)
    }

    /// Wrap a payload record and render the full document text.
    pub fn to_xml(&self, payload: &dyn Message) -> WireResult<String> {
        Ok(self.to_document(payload)?.to_xml_document()?)
    }

    /// Unwrap a document into its envelope and the raw payload subtree,
    /// when one is present. Callers that know the expected record type
    /// should prefer [`Envelope::from_document`].
    pub fn open(doc: &Element) -> WireResult<(Envelope, Option<&Element>)> {
        let envelope: Envelope = mapper::deserialize(doc)?;
        let payload = doc
            .child(ENVELOPE_PAYLOAD_TAG)
            .and_then(|block| block.children().first());
        Ok((envelope, payload))
    }

    /// Unwrap a document into its envelope and a typed payload record.
    pub fn from_document<T: FromTree>(doc: &Element) -> WireResult<(Envelope, T)> {
        let envelope: Envelope = mapper::deserialize(doc)?;
        let payload_node = payload_node(doc, T::descriptor().base_tag()?)?;
        Ok((envelope, mapper::deserialize(payload_node)?))
    }

    /// Parse wire text and unwrap it into a typed payload record.
    pub fn from_xml<T: FromTree>(input: &str) -> WireResult<(Envelope, T)> {
        let doc = Element::from_xml(input)?;
        Self::from_document(&doc)
    }

    /// Unwrap a document whose message type is only known at runtime: scan
    /// for the message code, resolve it through the registry, and decode
    /// the payload dynamically.
    pub fn decode_document(
        doc: &Element,
        registry: &Registry,
    ) -> WireResult<(Envelope, Box<dyn Message>)> {
        let envelope: Envelope = mapper::deserialize(doc)?;
        let code = extract_message_code(doc)?;
        let spec = registry.resolve(code, None)?;
        let payload_node = payload_node(doc, (spec.descriptor)().base_tag()?)?;
        let payload = (spec.decode)(payload_node)?;
        Ok((envelope, payload))
    }

    /// Parse wire text and unwrap it dynamically through the registry.
    pub fn decode_xml(
        input: &str,
        registry: &Registry,
    ) -> WireResult<(Envelope, Box<dyn Message>)> {
        let doc = Element::from_xml(input)?;
        Self::decode_document(&doc, registry)
    }
}

/// Locate the payload subtree under `SISMSG` by its base tag.
fn payload_node<'a>(doc: &'a Element, base_tag: &str) -> WireResult<&'a Element> {
    let block = doc.child(ENVELOPE_PAYLOAD_TAG);
    block.and_then(|b| b.child(base_tag)).ok_or_else(|| {
        let found = block
            .and_then(|b| b.children().first())
            .map(|c| c.tag())
            .unwrap_or("");
        WireError::base_tag_mismatch(base_tag, found)
    })
}
