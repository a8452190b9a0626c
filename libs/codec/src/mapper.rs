//! # Tree Mapper - Record/Document Conversion Engine
//!
//! ## Purpose
//!
//! The generic engine that turns any bound record into a document tree and
//! back, driven entirely by the record's [`Descriptor`] table. Shape
//! invariants are enforced field by field during each pass: the first
//! violation aborts the call and no partial tree escapes.
//!
//! ## Mapping Rules
//!
//! - Scalar fields land on the leaf element's text or on a named
//!   attribute; absent scalars create no leaf node at all.
//! - Composite fields graft a recursively serialized sub-record onto the
//!   leaf element.
//! - Group fields emit one fresh sibling element per item directly under
//!   the leaf's parent; repeated groups are positional, never keyed, so an
//!   existing sibling is never reused.
//! - Intermediate path segments are found or created on the way down and
//!   shared between fields, so `ROOT/Group/a/text()` and
//!   `ROOT/Group/b/@attr` populate one `Group` element.

use tracing::trace;
use xmldoc::Element;

use crate::binding::{check_binding, Descriptor, FieldBinding, Shape};
use crate::error::{WireError, WireResult};
use crate::path::Selector;
use crate::record::{FieldValue, FromTree, Message, Raw, RawRecord};

/// Serialize a record into a fresh document tree rooted at its base tag.
pub fn serialize(record: &dyn Message) -> WireResult<Element> {
    let descriptor = record.descriptor();
    let base_tag = descriptor.base_tag()?;
    trace!(record = descriptor.record(), base_tag, "serializing record");

    let mut root = Element::new(base_tag);
    for binding in descriptor.bindings() {
        check_binding(descriptor.record(), base_tag, binding)?;
        serialize_field(record, descriptor, binding, &mut root)?;
    }
    Ok(root)
}

fn serialize_field(
    record: &dyn Message,
    descriptor: &'static Descriptor,
    binding: &FieldBinding,
    root: &mut Element,
) -> WireResult<()> {
    let record_name = descriptor.record();
    let elements = binding.path().elements();
    let value = record.value(binding.name());

    match binding.path().selector() {
        Selector::Text => {
            let value = expect_scalar(record_name, binding, value)?;
            let parent = walk_intermediates(root, intermediates(elements));
            if let Some(text) = value {
                leaf_node(parent, elements).set_text(text);
            }
        }
        Selector::Attribute(attr) => {
            let value = expect_scalar(record_name, binding, value)?;
            let parent = walk_intermediates(root, intermediates(elements));
            if let Some(text) = value {
                leaf_node(parent, elements).set_attr(attr.clone(), text);
            }
        }
        Selector::None => match binding.shape() {
            Shape::Composite => {
                let value = expect_composite(record_name, binding, value)?;
                let parent = walk_intermediates(root, intermediates(elements));
                if let Some(sub) = value {
                    let sub_tree = serialize(sub)?;
                    let leaf_tag = binding.path().leaf();
                    if sub_tree.tag() != leaf_tag {
                        panic!(
                            "sub-record {} roots at <{}> but field {} of {} is bound to <{}>",
                            sub.descriptor().record(),
                            sub_tree.tag(),
                            binding.name(),
                            record_name,
                            leaf_tag
                        );
                    }
                    leaf_node(parent, elements).absorb(sub_tree);
                }
            }
            Shape::List => {
                let items = expect_list(record_name, binding, value)?;
                let parent = walk_intermediates(root, intermediates(elements));
                let leaf_tag = binding.path().leaf();
                for item in items {
                    let sub_tree = serialize(item)?;
                    if sub_tree.tag() != leaf_tag {
                        panic!(
                            "sub-record {} roots at <{}> but group field {} of {} is bound to <{}>",
                            item.descriptor().record(),
                            sub_tree.tag(),
                            binding.name(),
                            record_name,
                            leaf_tag
                        );
                    }
                    parent.push_child(sub_tree);
                }
            }
            Shape::Scalar => unreachable!("scalar bindings without selector are rejected upfront"),
        },
    }
    Ok(())
}

/// Deserialize a document tree into a concrete record type.
///
/// The document's root tag must equal the record's base tag; that check
/// happens before any field is read. Per-field absence is never an error
/// here; the record's constructor decides what is required.
pub fn deserialize<T: FromTree>(doc: &Element) -> WireResult<T> {
    T::from_raw(collect(doc, T::descriptor())?)
}

/// Resolve every bound path of `descriptor` against `doc` into raw inputs.
pub(crate) fn collect<'a>(
    doc: &'a Element,
    descriptor: &'static Descriptor,
) -> WireResult<RawRecord<'a>> {
    let record_name = descriptor.record();
    let base_tag = descriptor.base_tag()?;
    if doc.tag() != base_tag {
        return Err(WireError::base_tag_mismatch(base_tag, doc.tag()));
    }
    trace!(record = record_name, base_tag, "deserializing record");

    let mut raw = RawRecord::new(record_name);
    for binding in descriptor.bindings() {
        check_binding(record_name, base_tag, binding)?;
        let elements = binding.path().elements();
        match binding.path().selector() {
            Selector::Text => {
                if let Some(text) = find_leaf(doc, elements).and_then(|leaf| leaf.text()) {
                    raw.insert(binding.name(), Raw::Text(text));
                }
            }
            Selector::Attribute(attr) => {
                if let Some(value) = find_leaf(doc, elements).and_then(|leaf| leaf.attr(attr)) {
                    raw.insert(binding.name(), Raw::Text(value));
                }
            }
            Selector::None => match binding.shape() {
                Shape::Composite => {
                    if let Some(node) = find_leaf(doc, elements) {
                        raw.insert(binding.name(), Raw::Node(node));
                    }
                }
                Shape::List => {
                    let leaf_tag = binding.path().leaf();
                    let nodes: Vec<&Element> = match descend(doc, intermediates(elements)) {
                        Some(parent) => parent.children_named(leaf_tag).collect(),
                        None => Vec::new(),
                    };
                    raw.insert(binding.name(), Raw::Nodes(nodes));
                }
                Shape::Scalar => {
                    unreachable!("scalar bindings without selector are rejected upfront")
                }
            },
        }
    }
    Ok(raw)
}

/// Segments strictly between the root and the leaf.
fn intermediates(elements: &[String]) -> &[String] {
    if elements.len() <= 1 {
        &[]
    } else {
        &elements[1..elements.len() - 1]
    }
}

fn walk_intermediates<'t>(root: &'t mut Element, segments: &[String]) -> &'t mut Element {
    let mut node = root;
    for segment in segments {
        node = node.child_or_insert(segment);
    }
    node
}

/// The element the leaf segment addresses, created on demand. For a
/// single-segment path the leaf is the record root itself.
fn leaf_node<'t>(parent: &'t mut Element, elements: &[String]) -> &'t mut Element {
    if elements.len() == 1 {
        parent
    } else {
        parent.child_or_insert(&elements[elements.len() - 1])
    }
}

fn find_leaf<'a>(doc: &'a Element, elements: &[String]) -> Option<&'a Element> {
    descend(doc, &elements[1..])
}

fn descend<'a>(root: &'a Element, segments: &[String]) -> Option<&'a Element> {
    let mut node = root;
    for segment in segments {
        node = node.child(segment)?;
    }
    Some(node)
}

fn expect_scalar<'a>(
    record: &'static str,
    binding: &FieldBinding,
    value: FieldValue<'a>,
) -> WireResult<Option<String>> {
    match value {
        FieldValue::Scalar(value) => Ok(value),
        FieldValue::Composite(_) | FieldValue::List(_) => Err(WireError::SelectorPresent {
            record,
            field: binding.name(),
        }),
    }
}

fn expect_composite<'a>(
    record: &'static str,
    binding: &FieldBinding,
    value: FieldValue<'a>,
) -> WireResult<Option<&'a dyn Message>> {
    match value {
        FieldValue::Composite(value) => Ok(value),
        FieldValue::Scalar(_) => Err(WireError::SelectorMissing {
            record,
            field: binding.name(),
        }),
        FieldValue::List(_) => panic!(
            "field {} of {} is declared composite but yields a repeated group",
            binding.name(),
            record
        ),
    }
}

fn expect_list<'a>(
    record: &'static str,
    binding: &FieldBinding,
    value: FieldValue<'a>,
) -> WireResult<Vec<&'a dyn Message>> {
    match value {
        FieldValue::List(items) => Ok(items),
        FieldValue::Scalar(_) => Err(WireError::SelectorMissing {
            record,
            field: binding.name(),
        }),
        FieldValue::Composite(_) => panic!(
            "field {} of {} is declared as a repeated group but yields a single composite",
            binding.name(),
            record
        ),
    }
}
