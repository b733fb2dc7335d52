use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use serde_json::Value;
use slotmap::SlotMap;

use crate::events::Listener;
use crate::node::{Node, NodeId};
use crate::observers::{AttrMutation, AttrObserver, IntersectionObserver};
use crate::{Element, Rect};

pub type TaskFn = Box<dyn FnOnce()>;

pub(crate) struct DocInner {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) root: NodeId,
    pub(crate) viewport: Rect,
    pub(crate) tasks: VecDeque<TaskFn>,
    pub(crate) on_connected: Option<Rc<dyn Fn(&Document, NodeId)>>,
    pub(crate) on_disconnected: Option<Rc<dyn Fn(&Document, NodeId)>>,
    pub(crate) attr_observers: HashMap<u64, AttrObserver>,
    pub(crate) intersection_observers: HashMap<u64, IntersectionObserver>,
    pub(crate) next_observer: u64,
    pub(crate) node_listeners: HashMap<NodeId, Vec<Listener>>,
    pub(crate) document_listeners: Vec<Listener>,
    pub(crate) next_listener: u64,
}

/// Cloneable handle to the host document.
///
/// The document is single-threaded. Every callback (connection delegate,
/// observers, event listeners, deferred tasks) is invoked with no internal
/// borrow held, so callbacks are free to mutate the tree re-entrantly.
#[derive(Clone)]
pub struct Document(pub(crate) Rc<RefCell<DocInner>>);

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root_node = Node::new("document");
        root_node.connected = true;
        let root = nodes.insert(root_node);

        Document(Rc::new(RefCell::new(DocInner {
            nodes,
            root,
            viewport: Rect::new(0.0, 0.0, 1280.0, 800.0),
            tasks: VecDeque::new(),
            on_connected: None,
            on_disconnected: None,
            attr_observers: HashMap::new(),
            intersection_observers: HashMap::new(),
            next_observer: 1,
            node_listeners: HashMap::new(),
            document_listeners: Vec::new(),
            next_listener: 1,
        })))
    }

    pub fn root(&self) -> Element {
        let root = self.0.borrow().root;
        Element::new(self.clone(), root)
    }

    /// Creates a detached node. It enters the lifecycle when appended under a
    /// connected ancestor.
    pub fn create_element(&self, tag: impl Into<String>) -> Element {
        let id = self.0.borrow_mut().nodes.insert(Node::new(tag));
        Element::new(self.clone(), id)
    }

    pub fn element(&self, id: NodeId) -> Element {
        Element::new(self.clone(), id)
    }

    /// The insertion and removal dispatch the platform performs. Installed
    /// once by whatever runtime composes the document.
    pub fn set_connection_callbacks(
        &self,
        on_connected: impl Fn(&Document, NodeId) + 'static,
        on_disconnected: impl Fn(&Document, NodeId) + 'static,
    ) {
        let mut d = self.0.borrow_mut();
        d.on_connected = Some(Rc::new(on_connected));
        d.on_disconnected = Some(Rc::new(on_disconnected));
    }

    // ----- tree structure -----

    pub fn append(&self, parent: NodeId, child: NodeId) {
        let parent_connected = {
            let mut d = self.0.borrow_mut();
            if let Some(old_parent) = d.nodes[child].parent {
                d.nodes[old_parent].children.retain(|c| *c != child);
            }
            d.nodes[child].parent = Some(parent);
            d.nodes[parent].children.push(child);
            d.nodes[parent].connected
        };

        if parent_connected {
            self.connect_subtree(child);
        }
    }

    /// Detaches `node` from its parent. A connected subtree receives the
    /// disconnection dispatch in tree order. The nodes stay alive and can be
    /// re-appended later, which is what makes warm re-insertion possible.
    pub fn remove(&self, node: NodeId) {
        let was_connected = {
            let mut d = self.0.borrow_mut();
            if let Some(parent) = d.nodes[node].parent.take() {
                d.nodes[parent].children.retain(|c| *c != node);
            }
            d.nodes[node].connected
        };

        if was_connected {
            let subtree = self.subtree(node);
            log::trace!("disconnecting {} node(s)", subtree.len());
            {
                let mut d = self.0.borrow_mut();
                for &n in &subtree {
                    d.nodes[n].connected = false;
                }
            }
            let cb = self.0.borrow().on_disconnected.clone();
            if let Some(cb) = cb {
                for n in subtree {
                    cb(self, n);
                }
            }
        }
    }

    pub fn clear_children(&self, parent: NodeId) {
        let children: Vec<NodeId> = self.0.borrow().nodes[parent].children.to_vec();
        for child in children {
            self.remove(child);
        }
    }

    pub fn replace_children(&self, parent: NodeId, new_children: Vec<NodeId>) {
        self.clear_children(parent);
        for child in new_children {
            self.append(parent, child);
        }
    }

    fn connect_subtree(&self, node: NodeId) {
        // Snapshot first: nodes a connection callback appends are dispatched
        // by the nested append, not by this walk.
        let subtree = self.subtree(node);
        log::trace!("connecting {} node(s)", subtree.len());
        {
            let mut d = self.0.borrow_mut();
            for &n in &subtree {
                d.nodes[n].connected = true;
            }
        }
        let cb = self.0.borrow().on_connected.clone();
        if let Some(cb) = cb {
            for n in subtree {
                cb(self, n);
            }
        }
    }

    /// Pre-order walk of `node` and everything below it.
    pub(crate) fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let d = self.0.borrow();
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            for &c in d.nodes[n].children.iter().rev() {
                stack.push(c);
            }
        }
        out
    }

    // ----- node accessors -----

    pub fn tag(&self, node: NodeId) -> String {
        self.0.borrow().nodes[node].tag.clone()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.0.borrow().nodes[node].parent
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.0.borrow().nodes[node].children.to_vec()
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.0.borrow().nodes[node].children.first().copied()
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.0.borrow().nodes[node].connected
    }

    /// Self-or-descendants, pre-order. The query helpers filter this.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.subtree(node)
    }

    pub fn descendants_with_tag(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        let subtree = self.subtree(node);
        let d = self.0.borrow();
        subtree
            .into_iter()
            .filter(|&n| n != node && d.nodes[n].tag == tag)
            .collect()
    }

    pub fn descendants_with_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        let subtree = self.subtree(node);
        let d = self.0.borrow();
        subtree
            .into_iter()
            .filter(|&n| n != node && d.nodes[n].has_class(class))
            .collect()
    }

    pub fn descendants_with_attr_value(
        &self,
        node: NodeId,
        name: &str,
        value: &str,
    ) -> Vec<NodeId> {
        let subtree = self.subtree(node);
        let d = self.0.borrow();
        subtree
            .into_iter()
            .filter(|&n| n != node && d.nodes[n].attr(name) == Some(value))
            .collect()
    }

    pub fn descendants_with_attr(&self, node: NodeId, name: &str) -> Vec<NodeId> {
        let subtree = self.subtree(node);
        let d = self.0.borrow();
        subtree
            .into_iter()
            .filter(|&n| n != node && d.nodes[n].has_attr(name))
            .collect()
    }

    /// Nearest self-or-ancestor with the given tag.
    pub fn closest(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let d = self.0.borrow();
        let mut cur = Some(node);
        while let Some(n) = cur {
            if d.nodes[n].tag == tag {
                return Some(n);
            }
            cur = d.nodes[n].parent;
        }
        None
    }

    /// True when `other` is `node` or sits below it.
    pub fn contains(&self, node: NodeId, other: NodeId) -> bool {
        let d = self.0.borrow();
        let mut cur = Some(other);
        while let Some(n) = cur {
            if n == node {
                return true;
            }
            cur = d.nodes[n].parent;
        }
        false
    }

    // ----- attributes, classes, text, data -----

    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.0.borrow().nodes[node].attr(name).map(str::to_owned)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.0.borrow().nodes[node].has_attr(name)
    }

    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        let old = {
            let mut d = self.0.borrow_mut();
            let n = &mut d.nodes[node];
            match n.attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => Some(std::mem::replace(v, value.to_owned())),
                None => {
                    n.attrs.push((name.to_owned(), value.to_owned()));
                    None
                }
            }
        };
        self.notify_attr_change(
            node,
            AttrMutation {
                name: name.to_owned(),
                old_value: old,
                new_value: Some(value.to_owned()),
            },
        );
    }

    pub fn remove_attr(&self, node: NodeId, name: &str) {
        let old = {
            let mut d = self.0.borrow_mut();
            let n = &mut d.nodes[node];
            match n.attrs.iter().position(|(k, _)| k == name) {
                Some(idx) => Some(n.attrs.remove(idx).1),
                None => None,
            }
        };
        if old.is_some() {
            self.notify_attr_change(
                node,
                AttrMutation {
                    name: name.to_owned(),
                    old_value: old,
                    new_value: None,
                },
            );
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.0.borrow().nodes[node].has_class(class)
    }

    pub fn add_class(&self, node: NodeId, class: &str) {
        let mut d = self.0.borrow_mut();
        let n = &mut d.nodes[node];
        if !n.has_class(class) {
            n.classes.push(class.to_owned());
        }
    }

    pub fn remove_class(&self, node: NodeId, class: &str) {
        let mut d = self.0.borrow_mut();
        d.nodes[node].classes.retain(|c| c != class);
    }

    pub fn text(&self, node: NodeId) -> String {
        self.0.borrow().nodes[node].text.clone()
    }

    pub fn set_text(&self, node: NodeId, text: impl Into<String>) {
        self.0.borrow_mut().nodes[node].text = text.into();
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<Value> {
        self.0.borrow().nodes[node].data.get(key).cloned()
    }

    pub fn set_data(&self, node: NodeId, key: impl Into<String>, value: Value) {
        self.0.borrow_mut().nodes[node].data.insert(key.into(), value);
    }

    pub fn remove_data(&self, node: NodeId, key: &str) -> Option<Value> {
        self.0.borrow_mut().nodes[node].data.remove(key)
    }

    // ----- geometry -----

    pub fn bounds(&self, node: NodeId) -> Rect {
        self.0.borrow().nodes[node].bounds
    }

    pub fn set_bounds(&self, node: NodeId, bounds: Rect) {
        self.0.borrow_mut().nodes[node].bounds = bounds;
    }

    pub fn viewport(&self) -> Rect {
        self.0.borrow().viewport
    }

    pub fn set_viewport(&self, viewport: Rect) {
        self.0.borrow_mut().viewport = viewport;
    }

    // ----- deferred tasks (the next-turn scheduling primitive) -----

    /// Queues `task` to run on the next tick, after the current synchronous
    /// pass completes.
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.0.borrow_mut().tasks.push_back(Box::new(task));
    }

    /// Runs the tasks queued at the moment of the call. Tasks deferred while
    /// ticking run on the next tick.
    pub fn tick(&self) -> usize {
        let batch = self.0.borrow().tasks.len();
        for _ in 0..batch {
            let task = self.0.borrow_mut().tasks.pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
        batch
    }

    /// Ticks until the task queue is empty.
    pub fn settle(&self) {
        while self.tick() > 0 {}
    }

    pub fn pending_tasks(&self) -> usize {
        self.0.borrow().tasks.len()
    }
}
