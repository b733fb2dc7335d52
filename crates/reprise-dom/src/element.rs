use serde_json::Value;

use crate::events::{Event, EventType, ListenerId};
use crate::node::NodeId;
use crate::{Document, Rect};

/// Cloneable handle to one node. This is the surface hooks and callers work
/// against; everything forwards to the owning [`Document`].
#[derive(Clone)]
pub struct Element {
    doc: Document,
    id: NodeId,
}

impl Element {
    pub(crate) fn new(doc: Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn tag(&self) -> String {
        self.doc.tag(self.id)
    }

    pub fn is_connected(&self) -> bool {
        self.doc.is_connected(self.id)
    }

    // ----- structure -----

    pub fn append(&self, child: &Element) {
        self.doc.append(self.id, child.id);
    }

    pub fn remove(&self) {
        self.doc.remove(self.id);
    }

    pub fn clear_children(&self) {
        self.doc.clear_children(self.id);
    }

    pub fn replace_children(&self, children: &[Element]) {
        self.doc
            .replace_children(self.id, children.iter().map(|e| e.id).collect());
    }

    pub fn parent(&self) -> Option<Element> {
        self.doc.parent(self.id).map(|p| self.doc.element(p))
    }

    pub fn children(&self) -> Vec<Element> {
        self.doc
            .children(self.id)
            .into_iter()
            .map(|c| self.doc.element(c))
            .collect()
    }

    pub fn first_child(&self) -> Option<Element> {
        self.doc.first_child(self.id).map(|c| self.doc.element(c))
    }

    pub fn query_tag(&self, tag: &str) -> Vec<Element> {
        self.doc
            .descendants_with_tag(self.id, tag)
            .into_iter()
            .map(|n| self.doc.element(n))
            .collect()
    }

    pub fn query_class(&self, class: &str) -> Vec<Element> {
        self.doc
            .descendants_with_class(self.id, class)
            .into_iter()
            .map(|n| self.doc.element(n))
            .collect()
    }

    pub fn query_attr_value(&self, name: &str, value: &str) -> Vec<Element> {
        self.doc
            .descendants_with_attr_value(self.id, name, value)
            .into_iter()
            .map(|n| self.doc.element(n))
            .collect()
    }

    pub fn query_attr(&self, name: &str) -> Vec<Element> {
        self.doc
            .descendants_with_attr(self.id, name)
            .into_iter()
            .map(|n| self.doc.element(n))
            .collect()
    }

    pub fn closest(&self, tag: &str) -> Option<Element> {
        self.doc.closest(self.id, tag).map(|n| self.doc.element(n))
    }

    pub fn contains(&self, other: &Element) -> bool {
        self.doc.contains(self.id, other.id)
    }

    // ----- attributes, classes, text, data -----

    pub fn attr(&self, name: &str) -> Option<String> {
        self.doc.attr(self.id, name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.doc.has_attr(self.id, name)
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.doc.set_attr(self.id, name, value);
    }

    pub fn remove_attr(&self, name: &str) {
        self.doc.remove_attr(self.id, name);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.doc.has_class(self.id, class)
    }

    pub fn add_class(&self, class: &str) {
        self.doc.add_class(self.id, class);
    }

    pub fn remove_class(&self, class: &str) {
        self.doc.remove_class(self.id, class);
    }

    pub fn text(&self) -> String {
        self.doc.text(self.id)
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.doc.set_text(self.id, text);
    }

    pub fn data(&self, key: &str) -> Option<Value> {
        self.doc.data(self.id, key)
    }

    pub fn set_data(&self, key: impl Into<String>, value: Value) {
        self.doc.set_data(self.id, key, value);
    }

    // ----- geometry -----

    pub fn bounds(&self) -> Rect {
        self.doc.bounds(self.id)
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.doc.set_bounds(self.id, bounds);
    }

    // ----- events -----

    pub fn on(&self, ty: EventType, cb: impl Fn(&Document, &Event) + 'static) -> ListenerId {
        self.doc.add_listener(self.id, ty, cb)
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag())
            .field("id", &self.id)
            .finish()
    }
}
