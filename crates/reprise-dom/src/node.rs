use std::collections::HashMap;

use serde_json::Value;
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::Rect;

new_key_type! {
    pub struct NodeId;
}

/// One retained node in the document tree.
///
/// Attributes keep insertion order (serialization round-trips look like the
/// markup they came from). The `data` bag holds expando values bound to the
/// node before insertion, which is how the element factory hands large or
/// structured data to the first lifecycle pass.
pub struct Node {
    pub tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) classes: Vec<String>,
    pub(crate) text: String,
    pub(crate) data: HashMap<String, Value>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) bounds: Rect,
    pub(crate) connected: bool,
}

impl Node {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            classes: Vec::new(),
            text: String::new(),
            data: HashMap::new(),
            children: SmallVec::new(),
            parent: None,
            bounds: Rect::default(),
            connected: false,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
