//! Ordered, labeled element tree.
//!
//! An [`Element`] is the in-memory form of one wire document node: a tag
//! name, an unordered attribute map, optional text content, and an ordered
//! list of child elements. Trees are built fresh on every serialize call and
//! consumed read-only on deserialize; nothing here is shared or cached.

use std::collections::BTreeMap;

use crate::error::XmlResult;

/// One node of a wire document.
///
/// Equality is structural: two elements are equal when tag, attributes,
/// text, and children (in order) all match. Attribute order is not
/// observable; children order is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Tag name of this element.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Text content, if any was set.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// All attributes, in name order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append a child element, returning a reference to it.
    pub fn push_child(&mut self, child: Element) -> &mut Element {
        let idx = self.children.len();
        self.children.push(child);
        &mut self.children[idx]
    }

    /// Direct children, in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// First direct child with the given tag, creating and appending an
    /// empty one when none exists yet.
    pub fn child_or_insert(&mut self, tag: &str) -> &mut Element {
        match self.children.iter().position(|c| c.tag == tag) {
            Some(idx) => &mut self.children[idx],
            None => self.push_child(Element::new(tag)),
        }
    }

    /// All direct children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Depth-first scan for the first element with the given tag that has
    /// text content, returning that text. The scan looks at this element
    /// itself before descending.
    pub fn descendant_text(&self, tag: &str) -> Option<&str> {
        if self.tag == tag {
            if let Some(text) = self.text() {
                return Some(text);
            }
        }
        self.children
            .iter()
            .find_map(|child| child.descendant_text(tag))
    }

    /// Move the attributes, text, and children of `other` into this
    /// element. Existing attributes with the same name are overwritten;
    /// children are appended after any already present.
    pub fn absorb(&mut self, other: Element) {
        self.attrs.extend(other.attrs);
        if other.text.is_some() {
            self.text = other.text;
        }
        self.children.extend(other.children);
    }

    /// Parse a UTF-8 XML document into an element tree.
    pub fn from_xml(input: &str) -> XmlResult<Element> {
        crate::reader::read_document(input)
    }

    /// Render this tree as an XML fragment without a declaration.
    pub fn to_xml(&self) -> XmlResult<String> {
        crate::writer::write_fragment(self)
    }

    /// Render this tree as a full document with the UTF-8 XML declaration.
    pub fn to_xml_document(&self) -> XmlResult<String> {
        crate::writer::write_document(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_lookup_returns_first_match() {
        let mut root = Element::new("ROOT");
        root.push_child(Element::new("A")).set_text("first");
        root.push_child(Element::new("A")).set_text("second");

        assert_eq!(root.child("A").unwrap().text(), Some("first"));
        assert!(root.child("B").is_none());
    }

    #[test]
    fn child_or_insert_reuses_existing_node() {
        let mut root = Element::new("ROOT");
        root.child_or_insert("Group").set_attr("k", "v");
        root.child_or_insert("Group").set_text("t");

        assert_eq!(root.children().len(), 1);
        let group = root.child("Group").unwrap();
        assert_eq!(group.attr("k"), Some("v"));
        assert_eq!(group.text(), Some("t"));
    }

    #[test]
    fn children_named_preserves_document_order() {
        let mut root = Element::new("ROOT");
        for n in ["1", "2", "3"] {
            root.push_child(Element::new("Item")).set_text(n);
        }
        root.push_child(Element::new("Other"));

        let texts: Vec<_> = root.children_named("Item").map(|c| c.text().unwrap()).collect();
        assert_eq!(texts, ["1", "2", "3"]);
    }

    #[test]
    fn descendant_text_scans_depth_first() {
        let mut root = Element::new("DOC");
        let sismsg = root.push_child(Element::new("SISMSG"));
        let msg = sismsg.push_child(Element::new("STR0005"));
        msg.push_child(Element::new("CodMsg")).set_text("STR0005");

        assert_eq!(root.descendant_text("CodMsg"), Some("STR0005"));
        assert_eq!(root.descendant_text("Missing"), None);
    }

    #[test]
    fn absorb_merges_attributes_text_and_children() {
        let mut target = Element::new("Leaf");
        target.set_attr("kept", "1");

        let mut sub = Element::new("Leaf");
        sub.set_attr("added", "2");
        sub.set_text("payload");
        sub.push_child(Element::new("Inner"));

        target.absorb(sub);
        assert_eq!(target.attr("kept"), Some("1"));
        assert_eq!(target.attr("added"), Some("2"));
        assert_eq!(target.text(), Some("payload"));
        assert_eq!(target.children().len(), 1);
    }

    #[test]
    fn structural_equality_ignores_attribute_insertion_order() {
        let mut a = Element::new("T");
        a.set_attr("x", "1");
        a.set_attr("y", "2");

        let mut b = Element::new("T");
        b.set_attr("y", "2");
        b.set_attr("x", "1");

        assert_eq!(a, b);
    }
}
