//! Field binding tables.
//!
//! Every record type declares a [`Descriptor`]: an ordered table pairing
//! each field with a parsed [`PathSpec`] and its value shape. Tables are
//! built once per type (typically behind a `once_cell::sync::Lazy` static)
//! and read-only thereafter; the shape invariants can be verified for a
//! whole table with [`Descriptor::validate`], which message-definition
//! tests run so each path table is independently checked.

use crate::error::{WireError, WireResult};
use crate::path::{PathSpec, Selector};

/// Declared value shape of a bound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A single textual value, rendered through the scalar layer
    Scalar,
    /// A nested sub-record grafted onto the leaf element
    Composite,
    /// A repeated sub-record group: one sibling element per item
    List,
}

/// One field's binding: identifier, parsed path, and declared shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    name: &'static str,
    path: PathSpec,
    shape: Shape,
}

impl FieldBinding {
    pub fn new(name: &'static str, path: &str, shape: Shape) -> WireResult<Self> {
        Ok(Self {
            name,
            path: PathSpec::parse(path)?,
            shape,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn path(&self) -> &PathSpec {
        &self.path
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }
}

/// The full binding table of one record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    record: &'static str,
    base_tag_override: Option<&'static str>,
    bindings: Vec<FieldBinding>,
}

impl Descriptor {
    /// Build a descriptor from `(field, path, shape)` rows, parsing each
    /// path. Fails on the first unparseable path.
    pub fn build(
        record: &'static str,
        rows: &[(&'static str, &str, Shape)],
    ) -> WireResult<Self> {
        let mut bindings = Vec::with_capacity(rows.len());
        for (name, path, shape) in rows {
            bindings.push(FieldBinding::new(name, path, *shape)?);
        }
        Ok(Self {
            record,
            base_tag_override: None,
            bindings,
        })
    }

    /// Override the base tag instead of deriving it from the first binding.
    pub fn with_base_tag(mut self, tag: &'static str) -> Self {
        self.base_tag_override = Some(tag);
        self
    }

    /// Record type name, used in error context.
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Field bindings in declaration order.
    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// The root element tag all of this record's paths must agree on:
    /// the explicit override when one was supplied, otherwise the root
    /// segment of the first binding's path.
    pub fn base_tag(&self) -> WireResult<&str> {
        if let Some(tag) = self.base_tag_override {
            return Ok(tag);
        }
        self.bindings
            .first()
            .map(|binding| binding.path().root())
            .ok_or(WireError::BaseTagNotFound {
                record: self.record,
            })
    }

    /// Run the shape checks over the whole table.
    ///
    /// The mapper performs the same checks field by field during each pass;
    /// this entry point lets a record's own tests verify the table once,
    /// up front.
    pub fn validate(&self) -> WireResult<()> {
        let base_tag = self.base_tag()?;
        for binding in &self.bindings {
            check_binding(self.record, base_tag, binding)?;
        }
        Ok(())
    }
}

/// Shape invariants for a single binding against the record's base tag.
///
/// Scalar fields need a terminal selector, composite and group fields must
/// not have one, every path must be rooted at the base tag, and a group
/// needs a parent element to host its siblings.
pub(crate) fn check_binding(
    record: &'static str,
    base_tag: &str,
    binding: &FieldBinding,
) -> WireResult<()> {
    if binding.path().root() != base_tag {
        return Err(WireError::diff_base_tag(
            record,
            binding.name(),
            base_tag,
            binding.path().root(),
        ));
    }
    match (binding.shape(), binding.path().selector()) {
        (Shape::Scalar, Selector::Text | Selector::Attribute(_)) => Ok(()),
        (Shape::Scalar, Selector::None) => Err(WireError::SelectorMissing {
            record,
            field: binding.name(),
        }),
        (Shape::Composite | Shape::List, Selector::Text | Selector::Attribute(_)) => {
            Err(WireError::SelectorPresent {
                record,
                field: binding.name(),
            })
        }
        (Shape::List, Selector::None) if binding.path().elements().len() < 2 => {
            // A repeated group emits siblings under the leaf's parent, so a
            // single-segment path leaves it nowhere to put them.
            Err(WireError::invalid_local_name(
                binding.path().root(),
                binding.path().root(),
            ))
        }
        (Shape::Composite | Shape::List, Selector::None) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_tag_comes_from_the_first_binding() {
        let descriptor = Descriptor::build(
            "Sample",
            &[
                ("a", "ROOT/a/text()", Shape::Scalar),
                ("b", "ROOT/Group/b/@attr", Shape::Scalar),
            ],
        )
        .unwrap();
        assert_eq!(descriptor.base_tag().unwrap(), "ROOT");
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn base_tag_override_wins() {
        let descriptor = Descriptor::build("Sample", &[("a", "ROOT/a/text()", Shape::Scalar)])
            .unwrap()
            .with_base_tag("OTHER");
        assert_eq!(descriptor.base_tag().unwrap(), "OTHER");
    }

    #[test]
    fn empty_table_has_no_base_tag() {
        let descriptor = Descriptor::build("Empty", &[]).unwrap();
        assert_eq!(
            descriptor.base_tag(),
            Err(WireError::BaseTagNotFound { record: "Empty" })
        );
    }

    #[test]
    fn mis_rooted_path_fails_validation() {
        let descriptor = Descriptor::build(
            "Sample",
            &[
                ("a", "ROOT/a/text()", Shape::Scalar),
                ("b", "ELSEWHERE/b/text()", Shape::Scalar),
            ],
        )
        .unwrap();
        assert!(matches!(
            descriptor.validate(),
            Err(WireError::DiffBaseTag { field: "b", .. })
        ));
    }

    #[test]
    fn scalar_without_selector_fails_validation() {
        let descriptor =
            Descriptor::build("Sample", &[("a", "ROOT/a", Shape::Scalar)]).unwrap();
        assert!(matches!(
            descriptor.validate(),
            Err(WireError::SelectorMissing { field: "a", .. })
        ));
    }

    #[test]
    fn composite_with_selector_fails_validation() {
        let descriptor =
            Descriptor::build("Sample", &[("sub", "ROOT/Sub/text()", Shape::Composite)])
                .unwrap();
        assert!(matches!(
            descriptor.validate(),
            Err(WireError::SelectorPresent { field: "sub", .. })
        ));
    }

    #[test]
    fn single_segment_group_fails_validation() {
        let descriptor =
            Descriptor::build("Sample", &[("items", "ROOT", Shape::List)]).unwrap();
        assert!(matches!(
            descriptor.validate(),
            Err(WireError::InvalidLocalName { .. })
        ));
    }

    #[test]
    fn unparseable_path_fails_the_build() {
        assert_eq!(
            Descriptor::build("Sample", &[("a", "", Shape::Scalar)]),
            Err(WireError::EmptyPath)
        );
    }
}
