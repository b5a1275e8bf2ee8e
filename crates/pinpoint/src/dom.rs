//! Serializable DOM snapshots.
//!
//! A capture collaborator serializes the page as a nested JSON tree:
//!
//! ```json
//! {"tag": "body", "children": [
//!     {"tag": "button", "attributes": {"id": "go"}, "text": "Go"},
//!     {"text": "a bare text node"}
//! ]}
//! ```
//!
//! An element's `text` field is shorthand for a leading text child.
//! [`DomTree`] flattens the tree into an arena with parent links so
//! [`NodeRef`] can implement [`ElementHandle`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::descriptor::BoundingBox;
use crate::extract::ElementHandle;
use crate::result::{PinpointError, PinpointResult};

/// One node of a serialized snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotNode {
    /// Element node
    Element(SnapshotElement),
    /// Text node
    Text {
        /// Raw text
        text: String,
    },
}

/// A serialized element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotElement {
    /// Tag name
    pub tag: String,
    /// Attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Shorthand for a leading text child
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<SnapshotNode>,
    /// Bounding box
    #[serde(default, rename = "box")]
    pub bounding_box: BoundingBox,
    /// Computed styles
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

/// Index of a node in a [`DomTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        bounding_box: BoundingBox,
        styles: BTreeMap<String, String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-indexed snapshot; nodes are stored in document order
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Index a snapshot rooted at `root`
    #[must_use]
    pub fn new(root: SnapshotElement) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.push_element(root, None);
        tree
    }

    /// Parse and index a JSON snapshot
    ///
    /// # Errors
    ///
    /// Returns a JSON error for malformed input, or a snapshot error if the
    /// root is a text node.
    pub fn from_json(json: &str) -> PinpointResult<Self> {
        match serde_json::from_str::<SnapshotNode>(json)? {
            SnapshotNode::Element(root) => Ok(Self::new(root)),
            SnapshotNode::Text { .. } => Err(PinpointError::snapshot(
                "snapshot root must be an element",
            )),
        }
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    fn push_element(&mut self, element: SnapshotElement, parent: Option<NodeId>) -> NodeId {
        let id = self.push(
            NodeKind::Element {
                tag: element.tag,
                attributes: element.attributes,
                bounding_box: element.bounding_box,
                styles: element.styles,
            },
            parent,
        );
        if let Some(text) = element.text {
            self.push(NodeKind::Text(text), Some(id));
        }
        for child in element.children {
            match child {
                SnapshotNode::Element(child) => {
                    self.push_element(child, Some(id));
                }
                SnapshotNode::Text { text } => {
                    self.push(NodeKind::Text(text), Some(id));
                }
            }
        }
        id
    }

    /// Number of nodes, text nodes included
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handle for a node id
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// The root element
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.node(NodeId(0))
    }

    /// All element handles in document order
    pub fn elements(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len())
            .map(|i| NodeRef {
                tree: self,
                id: NodeId(i),
            })
            .filter(NodeRef::is_element)
    }

    /// First element whose `id` attribute equals `id`
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeRef<'_>> {
        self.elements()
            .find(|el| el.attribute("id").as_deref() == Some(id))
    }

    /// First element carrying attribute `name`
    #[must_use]
    pub fn find_by_attribute(&self, name: &str) -> Option<NodeRef<'_>> {
        self.elements().find(|el| el.attribute(name).is_some())
    }

    /// Follow element-child indices from the root; `[]` is the root itself
    #[must_use]
    pub fn at_path(&self, path: &[usize]) -> Option<NodeRef<'_>> {
        let mut current = self.root()?;
        for &index in path {
            current = current.element_children().nth(index)?;
        }
        Some(current)
    }

    /// Parse an index path like `0.2.1` (empty string is the root)
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if a segment is not an integer.
    pub fn parse_path(path: &str) -> PinpointResult<Vec<usize>> {
        let path = path.trim();
        if path.is_empty() {
            return Ok(Vec::new());
        }
        path.split('.')
            .map(|segment| {
                segment.trim().parse::<usize>().map_err(|_| {
                    PinpointError::invalid_argument(format!(
                        "bad element path segment '{segment}' in '{path}'"
                    ))
                })
            })
            .collect()
    }
}

/// Borrowed handle to one node of a [`DomTree`]
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    /// Node id
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// All child nodes, text included
    pub fn child_nodes(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Element children only
    pub fn element_children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.child_nodes().filter(NodeRef::is_element)
    }

    fn text(&self) -> Option<&'a str> {
        match &self.node().kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    fn push_descendant_text(&self, out: &mut String) {
        for child in self.child_nodes() {
            match child.text() {
                Some(text) => out.push_str(text),
                None => child.push_descendant_text(out),
            }
        }
    }
}

impl ElementHandle for NodeRef<'_> {
    fn is_element(&self) -> bool {
        matches!(self.node().kind, NodeKind::Element { .. })
    }

    fn tag_name(&self) -> String {
        match &self.node().kind {
            NodeKind::Element { tag, .. } => tag.clone(),
            NodeKind::Text(_) => String::new(),
        }
    }

    fn attributes(&self) -> Vec<(String, String)> {
        match &self.node().kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match &self.node().kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.clone()),
            NodeKind::Text(_) => None,
        }
    }

    fn direct_text(&self) -> String {
        self.child_nodes().filter_map(|c| c.text()).collect()
    }

    fn rendered_text(&self) -> String {
        let mut out = String::new();
        match self.text() {
            Some(text) => out.push_str(text),
            None => self.push_descendant_text(&mut out),
        }
        out
    }

    fn bounding_box(&self) -> BoundingBox {
        match &self.node().kind {
            NodeKind::Element { bounding_box, .. } => *bounding_box,
            NodeKind::Text(_) => BoundingBox::default(),
        }
    }

    fn computed_style(&self, property: &str) -> Option<String> {
        match &self.node().kind {
            NodeKind::Element { styles, .. } => styles.get(property).cloned(),
            NodeKind::Text(_) => None,
        }
    }

    fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    fn same_tag_position(&self) -> (usize, usize) {
        let Some(parent) = self.parent() else {
            return (1, 1);
        };
        let tag = self.tag_name();
        let mut index = 1;
        let mut count = 0;
        for sibling in parent.element_children() {
            if sibling.tag_name().eq_ignore_ascii_case(&tag) {
                count += 1;
                if sibling.id < self.id {
                    index += 1;
                }
            }
        }
        (index, count.max(1))
    }

    fn label_for(&self, id: &str) -> Option<Self> {
        self.tree.elements().find(|el| {
            el.tag_name().eq_ignore_ascii_case("label") && el.attribute("for").as_deref() == Some(id)
        })
    }
}
