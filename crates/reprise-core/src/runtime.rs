use std::cell::RefCell;
use std::rc::{Rc, Weak};

use reprise_dom::{Document, Element, ListenerId, NodeId, ObserverId};
use serde_json::Map;
use slotmap::SecondaryMap;

use crate::lazy::LazyWatch;
use crate::queue::RenderQueues;
use crate::registry::ComponentRegistry;
use crate::relay::PropsStore;
use crate::{Component, LifecycleFlags};

pub(crate) struct InstanceState {
    pub(crate) behavior: Rc<RefCell<Box<dyn Component>>>,
    pub(crate) flags: LifecycleFlags,
    pub(crate) props: PropsStore,
    /// Props captured at insertion, before the store was replaced. Flushed
    /// back into the store on every load.
    pub(crate) preserved: Option<Map<String, serde_json::Value>>,
    /// Attribute subscriptions wired during this pass; discarded en masse by
    /// a manual re-render.
    pub(crate) attr_watchers: Vec<ObserverId>,
    pub(crate) lazy_watch: Option<LazyWatch>,
    /// The document-level pointer-up/key-up pair while interacting.
    pub(crate) interacting: Option<(ListenerId, ListenerId)>,
    pub(crate) scroll_listener: Option<ListenerId>,
}

impl InstanceState {
    pub(crate) fn new(behavior: Box<dyn Component>) -> Self {
        Self {
            behavior: Rc::new(RefCell::new(behavior)),
            flags: LifecycleFlags::empty(),
            props: PropsStore::new(),
            preserved: None,
            attr_watchers: Vec::new(),
            lazy_watch: None,
            interacting: None,
            scroll_listener: None,
        }
    }
}

pub(crate) struct RuntimeInner {
    pub(crate) doc: Document,
    pub(crate) registry: RefCell<ComponentRegistry>,
    pub(crate) queues: RefCell<RenderQueues>,
    pub(crate) instances: RefCell<SecondaryMap<NodeId, InstanceState>>,
}

/// The composition root: owns the document handle, the component registry,
/// the render-queue registry, and per-node lifecycle state. Installs itself
/// as the document's connection delegate, so platform insertion and removal
/// flow through the lifecycle controller.
#[derive(Clone)]
pub struct Runtime(pub(crate) Rc<RuntimeInner>);

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        let doc = Document::new();
        let rt = Runtime(Rc::new(RuntimeInner {
            doc: doc.clone(),
            registry: RefCell::new(ComponentRegistry::default()),
            queues: RefCell::new(RenderQueues::default()),
            instances: RefCell::new(SecondaryMap::new()),
        }));

        let connected: Weak<RuntimeInner> = Rc::downgrade(&rt.0);
        let disconnected = connected.clone();
        doc.set_connection_callbacks(
            move |_, node| {
                if let Some(inner) = connected.upgrade() {
                    Runtime(inner).connected(node);
                }
            },
            move |_, node| {
                if let Some(inner) = disconnected.upgrade() {
                    Runtime(inner).disconnected(node);
                }
            },
        );

        rt
    }

    pub fn document(&self) -> &Document {
        &self.0.doc
    }

    /// Registers a component type under a tag name. Duplicate names warn and
    /// keep the first implementation.
    pub fn register(&self, name: &str, ctor: impl Fn() -> Box<dyn Component> + 'static) {
        self.0.registry.borrow_mut().register(name, Rc::new(ctor));
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.0.registry.borrow().is_registered(tag)
    }

    /// The instance surface for a node that went through component
    /// registration. `None` for plain nodes.
    pub fn instance(&self, node: NodeId) -> Option<Instance> {
        if self.0.instances.borrow().contains_key(node) {
            Some(self.instance_handle(node))
        } else {
            None
        }
    }

    pub(crate) fn instance_handle(&self, node: NodeId) -> Instance {
        Instance {
            rt: self.clone(),
            el: self.0.doc.element(node),
        }
    }

    pub(crate) fn behavior(&self, node: NodeId) -> Option<Rc<RefCell<Box<dyn Component>>>> {
        self.0
            .instances
            .borrow()
            .get(node)
            .map(|s| s.behavior.clone())
    }

    pub(crate) fn flag(&self, node: NodeId, flag: LifecycleFlags) -> bool {
        self.0
            .instances
            .borrow()
            .get(node)
            .is_some_and(|s| s.flags.contains(flag))
    }

    pub(crate) fn set_flag(&self, node: NodeId, flag: LifecycleFlags, on: bool) {
        if let Some(state) = self.0.instances.borrow_mut().get_mut(node) {
            state.flags.set(flag, on);
        }
    }

    pub(crate) fn props(&self, node: NodeId) -> PropsStore {
        self.0
            .instances
            .borrow()
            .get(node)
            .map(|s| s.props.clone())
            .unwrap_or_default()
    }
}

/// Handle to one live component instance — the surface hooks receive and
/// application code drives. Cloneable and cheap; everything forwards to the
/// runtime.
#[derive(Clone)]
pub struct Instance {
    pub(crate) rt: Runtime,
    pub(crate) el: Element,
}

impl Instance {
    pub fn element(&self) -> &Element {
        &self.el
    }

    pub fn runtime(&self) -> &Runtime {
        &self.rt
    }

    pub fn node(&self) -> NodeId {
        self.el.id()
    }

    /// The instance's observable props store. Writes project into marked
    /// descendants immediately.
    pub fn props(&self) -> PropsStore {
        self.rt.props(self.el.id())
    }

    /// Reads a value bound onto the node before insertion (element factory
    /// bindings).
    pub fn binding(&self, key: &str) -> Option<serde_json::Value> {
        self.el.data(key)
    }

    pub fn flags(&self) -> LifecycleFlags {
        self.rt
            .0
            .instances
            .borrow()
            .get(self.el.id())
            .map(|s| s.flags)
            .unwrap_or_default()
    }

    pub fn locked(&self) -> bool {
        self.flags().contains(LifecycleFlags::LOCKED)
    }

    pub fn spawned(&self) -> bool {
        self.flags().contains(LifecycleFlags::SPAWNED)
    }

    pub fn built(&self) -> bool {
        self.flags().contains(LifecycleFlags::BUILT)
    }

    pub fn rendered(&self) -> bool {
        self.flags().contains(LifecycleFlags::RENDERED)
    }
}
