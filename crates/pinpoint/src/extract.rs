//! Element descriptor extraction.
//!
//! [`ElementHandle`] is the seam between the engine and whatever holds the
//! live page. The engine ships one implementation over [`crate::dom`]
//! snapshots; a browser-backed adapter implements the same trait and gets
//! the same descriptors.

use tracing::trace;

use crate::descriptor::{AncestorSegment, BoundingBox, DescriptorBuilder, ElementDescriptor};
use crate::descriptor::{split_classes, STYLE_ALLOW_LIST};
use crate::result::{PinpointError, PinpointResult};

/// Read-only access to one node of a live or captured document
pub trait ElementHandle: Sized {
    /// Whether the node is an element (as opposed to text, comment, ...)
    fn is_element(&self) -> bool;

    /// Tag name in any case
    fn tag_name(&self) -> String;

    /// Attributes in source order
    fn attributes(&self) -> Vec<(String, String)>;

    /// One attribute value
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes()
            .into_iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Concatenated direct text-node children
    fn direct_text(&self) -> String;

    /// Concatenated descendant text
    fn rendered_text(&self) -> String;

    /// Viewport-relative box
    fn bounding_box(&self) -> BoundingBox;

    /// Resolved value of one computed style property
    fn computed_style(&self, property: &str) -> Option<String>;

    /// Parent element, if any
    fn parent(&self) -> Option<Self>;

    /// 1-based position among element siblings sharing this tag, and their count
    fn same_tag_position(&self) -> (usize, usize);

    /// First `<label for=id>` in the document
    fn label_for(&self, id: &str) -> Option<Self>;
}

/// Whether an attribute name is an inline event handler (`onclick`, ...)
#[must_use]
pub fn is_event_handler(name: &str) -> bool {
    name.len() > 2 && name.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("on"))
}

/// Produce an immutable descriptor for one element
///
/// # Errors
///
/// Returns an invalid argument error when the handle is not an element or
/// reports an empty tag. Both are caller contract violations.
pub fn extract<E: ElementHandle>(element: &E) -> PinpointResult<ElementDescriptor> {
    if !element.is_element() {
        return Err(PinpointError::invalid_argument(
            "cannot describe a non-element node",
        ));
    }
    let tag = element.tag_name().trim().to_ascii_lowercase();
    if tag.is_empty() {
        return Err(PinpointError::invalid_argument(
            "cannot describe an element with an empty tag",
        ));
    }

    let mut builder = DescriptorBuilder::new(&tag);
    for (name, value) in element.attributes() {
        if is_event_handler(&name) {
            trace!(attribute = %name, "dropping event handler attribute");
            continue;
        }
        builder = builder.attribute(name, value);
    }

    builder = builder
        .text_content(element.direct_text())
        .visible_text(element.rendered_text())
        .bounding_box(element.bounding_box());

    if let Some(label) = associated_label(element) {
        builder = builder.label_text(label.rendered_text());
    }

    for property in STYLE_ALLOW_LIST {
        if let Some(value) = element.computed_style(property) {
            builder = builder.style(*property, value);
        }
    }

    if tag != "body" {
        let (index, count) = element.same_tag_position();
        builder = builder.position(index, count);
        for segment in ancestor_segments(element) {
            builder = builder.ancestor(segment);
        }
    }

    builder.build()
}

/// `<label for=id>` wins over an enclosing `<label>`
fn associated_label<E: ElementHandle>(element: &E) -> Option<E> {
    if let Some(id) = element.attribute("id").filter(|id| !id.is_empty()) {
        if let Some(label) = element.label_for(&id) {
            return Some(label);
        }
    }

    let mut current = element.parent();
    while let Some(node) = current {
        if node.tag_name().eq_ignore_ascii_case("label") {
            return Some(node);
        }
        current = node.parent();
    }
    None
}

/// Parents of `element`, nearest first, stopping below `<body>`
fn ancestor_segments<E: ElementHandle>(element: &E) -> Vec<AncestorSegment> {
    let mut segments = Vec::new();
    let mut current = element.parent();
    while let Some(node) = current {
        let tag = node.tag_name().to_ascii_lowercase();
        if tag == "body" {
            break;
        }
        let (index, count) = node.same_tag_position();
        let mut segment = AncestorSegment::new(tag)
            .with_classes(split_classes(&node.attribute("class").unwrap_or_default()))
            .at(index, count);
        if let Some(id) = node.attribute("id") {
            segment = segment.with_id(id);
        }
        segments.push(segment);
        current = node.parent();
    }
    segments
}
