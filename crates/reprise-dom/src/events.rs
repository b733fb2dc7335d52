use std::rc::Rc;

use crate::input::{DropPayload, Key, Modifiers, PointerButton};
use crate::node::NodeId;
use crate::Document;

#[derive(Clone, Debug)]
pub enum EventKind {
    PointerDown(PointerButton),
    PointerUp(PointerButton),
    KeyUp(Key),
    FocusIn,
    Scroll,
    DragEnter,
    DragOver,
    DragLeave,
    Drop(DropPayload),
}

/// Discriminant used when registering listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    PointerDown,
    PointerUp,
    KeyUp,
    FocusIn,
    Scroll,
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
}

#[derive(Clone, Debug)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    pub modifiers: Modifiers,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            modifiers: Modifiers::default(),
        }
    }

    pub fn ty(&self) -> EventType {
        match self.kind {
            EventKind::PointerDown(_) => EventType::PointerDown,
            EventKind::PointerUp(_) => EventType::PointerUp,
            EventKind::KeyUp(_) => EventType::KeyUp,
            EventKind::FocusIn => EventType::FocusIn,
            EventKind::Scroll => EventType::Scroll,
            EventKind::DragEnter => EventType::DragEnter,
            EventKind::DragOver => EventType::DragOver,
            EventKind::DragLeave => EventType::DragLeave,
            EventKind::Drop(_) => EventType::Drop,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

pub(crate) struct Listener {
    pub(crate) id: u64,
    pub(crate) ty: EventType,
    pub(crate) cb: Rc<dyn Fn(&Document, &Event)>,
}

impl Document {
    /// Listens for `ty` events on `node`. The listener fires whenever `node`
    /// is on the bubble path from the event target to the root.
    pub fn add_listener(
        &self,
        node: NodeId,
        ty: EventType,
        cb: impl Fn(&Document, &Event) + 'static,
    ) -> ListenerId {
        let mut d = self.0.borrow_mut();
        let id = d.next_listener;
        d.next_listener += 1;
        d.node_listeners.entry(node).or_default().push(Listener {
            id,
            ty,
            cb: Rc::new(cb),
        });
        ListenerId(id)
    }

    /// Document-level listener: fires for every event of `ty`, after the
    /// bubble phase.
    pub fn add_document_listener(
        &self,
        ty: EventType,
        cb: impl Fn(&Document, &Event) + 'static,
    ) -> ListenerId {
        let mut d = self.0.borrow_mut();
        let id = d.next_listener;
        d.next_listener += 1;
        d.document_listeners.push(Listener {
            id,
            ty,
            cb: Rc::new(cb),
        });
        ListenerId(id)
    }

    /// Removes a node-level or document-level listener. Removing an unknown
    /// id is a no-op.
    pub fn remove_listener(&self, id: ListenerId) {
        let mut d = self.0.borrow_mut();
        for listeners in d.node_listeners.values_mut() {
            listeners.retain(|l| l.id != id.0);
        }
        d.document_listeners.retain(|l| l.id != id.0);
    }

    pub fn document_listener_count(&self, ty: EventType) -> usize {
        self.0
            .borrow()
            .document_listeners
            .iter()
            .filter(|l| l.ty == ty)
            .count()
    }

    /// Synchronous dispatch: bubble from the target to the root, then the
    /// document-level listeners. Listener sets are snapshotted up front, so
    /// handlers may install or remove listeners mid-dispatch.
    pub fn dispatch(&self, event: Event) {
        let ty = event.ty();

        let chain = {
            let d = self.0.borrow();
            let mut chain = Vec::new();
            let mut cur = Some(event.target);
            while let Some(n) = cur {
                chain.push(n);
                cur = d.nodes[n].parent;
            }
            chain
        };

        for node in chain {
            let cbs: Vec<Rc<dyn Fn(&Document, &Event)>> = {
                let d = self.0.borrow();
                d.node_listeners
                    .get(&node)
                    .map(|listeners| {
                        listeners
                            .iter()
                            .filter(|l| l.ty == ty)
                            .map(|l| l.cb.clone())
                            .collect()
                    })
                    .unwrap_or_default()
            };
            for cb in cbs {
                cb(self, &event);
            }
        }

        let cbs: Vec<Rc<dyn Fn(&Document, &Event)>> = {
            let d = self.0.borrow();
            d.document_listeners
                .iter()
                .filter(|l| l.ty == ty)
                .map(|l| l.cb.clone())
                .collect()
        };
        for cb in cbs {
            cb(self, &event);
        }
    }
}
