//! Element descriptors: immutable point-in-time snapshots of one element.
//!
//! Two text notions live side by side and must not be confused:
//!
//! - [`ElementDescriptor::text_content`] holds only the element's direct
//!   text-node children, capped at [`MAX_TEXT_CONTENT_CHARS`]. Inspection UIs
//!   show it; no strategy reads it.
//! - [`ElementDescriptor::visible_text`] holds the full rendered text
//!   (descendants included). The role strategy uses it as the accessible
//!   name of buttons and links, and the text strategy matches on it. The
//!   label strategy applies the same rule to the label element, which is
//!   what [`ElementDescriptor::label_text`] carries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::paths;
use crate::result::{PinpointError, PinpointResult};

/// Maximum characters kept in `text_content`, ellipsis included
pub const MAX_TEXT_CONTENT_CHARS: usize = 200;

/// Marker appended to capped `text_content`
pub const ELLIPSIS: &str = "...";

/// Computed style properties captured into a descriptor
pub const STYLE_ALLOW_LIST: &[&str] = &[
    "display",
    "position",
    "top",
    "right",
    "bottom",
    "left",
    "width",
    "height",
    "margin",
    "padding",
    "color",
    "background-color",
    "font-family",
    "font-size",
    "font-weight",
    "line-height",
    "text-align",
    "overflow",
    "float",
    "clear",
];

/// Viewport-relative bounding box in integer pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X position
    pub x: i32,
    /// Y position
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl BoundingBox {
    /// Create a new bounding box
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the box covers no area
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// One level of the walk from an element up to (excluding) `<body>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AncestorSegment {
    /// Lower-cased tag name
    pub tag: String,
    /// Identifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Class tokens in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// 1-based position among siblings sharing this tag
    pub index: usize,
    /// Number of siblings (self included) sharing this tag
    pub same_tag_count: usize,
}

impl AncestorSegment {
    /// Create a segment for an only child with no id or classes
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            index: 1,
            same_tag_count: 1,
        }
    }

    /// Set the identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
        self
    }

    /// Set the class tokens
    #[must_use]
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the position among same-tagged siblings
    #[must_use]
    pub const fn at(mut self, index: usize, same_tag_count: usize) -> Self {
        self.index = index;
        self.same_tag_count = same_tag_count;
        self
    }
}

/// Immutable snapshot of one element's structural facts.
///
/// Fields are private; a descriptor is produced once (by the extractor or
/// [`DescriptorBuilder`]) and only read afterwards. Inspecting the element
/// again yields a new descriptor. Deserialization goes through the builder,
/// so parsed descriptors hold the same invariants as built ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DescriptorWire")]
pub struct ElementDescriptor {
    tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default)]
    text_content: String,
    #[serde(default)]
    visible_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label_text: Option<String>,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
    #[serde(default)]
    bounding_box: BoundingBox,
    #[serde(default)]
    computed_styles: BTreeMap<String, String>,
    #[serde(default)]
    ancestor_chain: Vec<AncestorSegment>,
}

impl ElementDescriptor {
    /// Start building a descriptor for the given tag
    #[must_use]
    pub fn builder(tag: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder::new(tag)
    }

    /// Parse a descriptor produced by an external collaborator
    ///
    /// # Errors
    ///
    /// Returns a JSON error for malformed input and an invalid argument
    /// error when the tag is empty.
    pub fn from_json(json: &str) -> PinpointResult<Self> {
        let wire: DescriptorWire = serde_json::from_str(json)?;
        Self::try_from(wire)
    }

    /// Check the one precondition the engine has: a non-empty tag
    pub fn validate(&self) -> PinpointResult<()> {
        if self.tag.trim().is_empty() {
            return Err(PinpointError::invalid_argument(
                "element descriptor has an empty tag",
            ));
        }
        Ok(())
    }

    /// Lower-cased element name
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Identifier, if present and non-empty
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Class tokens in source order
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Direct text, trimmed and capped (display only)
    #[must_use]
    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    /// Full rendered text, whitespace collapsed and trimmed
    #[must_use]
    pub fn visible_text(&self) -> &str {
        &self.visible_text
    }

    /// Visible text of the associated or enclosing `<label>`
    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        self.label_text.as_deref()
    }

    /// All captured attributes
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Look up one attribute
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Look up one attribute, treating blank values as absent
    #[must_use]
    pub fn non_blank_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|v| !v.trim().is_empty())
    }

    /// Whether the attribute exists at all
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Bounding box
    #[must_use]
    pub const fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Allow-listed computed styles
    #[must_use]
    pub const fn computed_styles(&self) -> &BTreeMap<String, String> {
        &self.computed_styles
    }

    /// Walk from the element up to (excluding) `<body>`, element first
    #[must_use]
    pub fn ancestor_chain(&self) -> &[AncestorSegment] {
        &self.ancestor_chain
    }

    /// Full CSS path; empty when the element is `<body>`
    #[must_use]
    pub fn css_path(&self) -> String {
        paths::css_path(&self.ancestor_chain)
    }

    /// XPath; empty when the element is `<body>`
    #[must_use]
    pub fn xpath(&self) -> String {
        paths::xpath(&self.ancestor_chain)
    }
}

/// Descriptor as an external collaborator writes it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DescriptorWire {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text_content: String,
    visible_text: String,
    label_text: Option<String>,
    attributes: BTreeMap<String, String>,
    bounding_box: BoundingBox,
    computed_styles: BTreeMap<String, String>,
    ancestor_chain: Vec<AncestorSegment>,
}

impl TryFrom<DescriptorWire> for ElementDescriptor {
    type Error = PinpointError;

    fn try_from(wire: DescriptorWire) -> PinpointResult<Self> {
        let mut builder = DescriptorBuilder::new(wire.tag);
        for (name, value) in wire.attributes {
            builder = builder.attribute(name, value);
        }
        if let Some(id) = wire.id.filter(|id| !id.is_empty()) {
            if !builder.attributes.contains_key("id") {
                builder = builder.id(id);
            }
        }
        if !wire.classes.is_empty() && !builder.attributes.contains_key("class") {
            builder = builder.classes(wire.classes);
        }

        builder = builder
            .text_content(wire.text_content)
            .visible_text(wire.visible_text)
            .bounding_box(wire.bounding_box);
        if let Some(label) = wire.label_text {
            builder = builder.label_text(label);
        }
        for (property, value) in wire.computed_styles {
            builder = builder.style(property, value);
        }

        // The first segment is the element itself; the builder rebuilds it.
        let mut chain = wire.ancestor_chain.into_iter();
        if builder.tag != "body" {
            if let Some(own) = chain.next() {
                builder = builder.position(own.index, own.same_tag_count);
            }
            for segment in chain {
                builder = builder.ancestor(segment);
            }
        }
        builder.build()
    }
}

/// Builder for [`ElementDescriptor`].
///
/// `id` and `classes` are always derived from the `id` and `class`
/// attributes, so the two views cannot disagree. Unless the element is
/// `<body>`, the element's own segment is placed first in the ancestor
/// chain; call [`Self::ancestor`] for each parent, nearest first.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    tag: String,
    attributes: BTreeMap<String, String>,
    text_content: String,
    visible_text: String,
    label_text: Option<String>,
    bounding_box: BoundingBox,
    computed_styles: BTreeMap<String, String>,
    position: (usize, usize),
    ancestors: Vec<AncestorSegment>,
}

impl DescriptorBuilder {
    /// Create a builder for the given tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().trim().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text_content: String::new(),
            visible_text: String::new(),
            label_text: None,
            bounding_box: BoundingBox::default(),
            computed_styles: BTreeMap::new(),
            position: (1, 1),
            ancestors: Vec::new(),
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Set the `id` attribute
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attribute("id", id)
    }

    /// Set the `class` attribute from tokens
    #[must_use]
    pub fn classes<I, S>(self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = classes
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.attribute("class", joined)
    }

    /// Set the text: direct text and visible text are both derived from it
    #[must_use]
    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.text_content = cap_text(&collapse_whitespace(text.as_ref()));
        self.visible_text = collapse_whitespace(text.as_ref());
        self
    }

    /// Set direct text only (display field)
    #[must_use]
    pub fn text_content(mut self, text: impl AsRef<str>) -> Self {
        self.text_content = cap_text(&collapse_whitespace(text.as_ref()));
        self
    }

    /// Set full rendered text only
    #[must_use]
    pub fn visible_text(mut self, text: impl AsRef<str>) -> Self {
        self.visible_text = collapse_whitespace(text.as_ref());
        self
    }

    /// Set the associated label's visible text
    #[must_use]
    pub fn label_text(mut self, text: impl AsRef<str>) -> Self {
        let text = collapse_whitespace(text.as_ref());
        self.label_text = (!text.is_empty()).then_some(text);
        self
    }

    /// Set the bounding box
    #[must_use]
    pub const fn bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    /// Set a computed style; properties outside the allow-list are ignored
    #[must_use]
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let property = property.into();
        if STYLE_ALLOW_LIST.contains(&property.as_str()) {
            self.computed_styles.insert(property, value.into());
        }
        self
    }

    /// Set the element's 1-based position among same-tagged siblings
    #[must_use]
    pub const fn position(mut self, index: usize, same_tag_count: usize) -> Self {
        self.position = (index, same_tag_count);
        self
    }

    /// Append a parent segment (nearest parent first)
    #[must_use]
    pub fn ancestor(mut self, segment: AncestorSegment) -> Self {
        self.ancestors.push(segment);
        self
    }

    /// Finish the descriptor
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error when the tag is empty.
    pub fn build(self) -> PinpointResult<ElementDescriptor> {
        if self.tag.is_empty() {
            return Err(PinpointError::invalid_argument(
                "cannot describe an element with an empty tag",
            ));
        }

        let id = self
            .attributes
            .get("id")
            .filter(|v| !v.is_empty())
            .cloned();
        let classes = split_classes(self.attributes.get("class").map_or("", String::as_str));

        let mut ancestor_chain = Vec::with_capacity(self.ancestors.len() + 1);
        if self.tag != "body" {
            let mut own = AncestorSegment::new(&self.tag)
                .with_classes(classes.clone())
                .at(self.position.0, self.position.1);
            own.id.clone_from(&id);
            ancestor_chain.push(own);
            ancestor_chain.extend(self.ancestors);
        }

        Ok(ElementDescriptor {
            tag: self.tag,
            id,
            classes,
            text_content: self.text_content,
            visible_text: self.visible_text,
            label_text: self.label_text,
            attributes: self.attributes,
            bounding_box: self.bounding_box,
            computed_styles: self.computed_styles,
            ancestor_chain,
        })
    }
}

/// Split a `class` attribute into tokens, keeping source order
#[must_use]
pub fn split_classes(class_attr: &str) -> Vec<String> {
    class_attr.split_whitespace().map(str::to_string).collect()
}

/// Collapse whitespace runs to single spaces and trim
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap text at [`MAX_TEXT_CONTENT_CHARS`] characters, ellipsis included
#[must_use]
pub fn cap_text(text: &str) -> String {
    if text.chars().count() <= MAX_TEXT_CONTENT_CHARS {
        return text.to_string();
    }
    let keep = MAX_TEXT_CONTENT_CHARS - ELLIPSIS.len();
    let mut capped: String = text.chars().take(keep).collect();
    capped.push_str(ELLIPSIS);
    capped
}
