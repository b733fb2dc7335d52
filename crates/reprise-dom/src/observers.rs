use std::rc::Rc;

use crate::node::NodeId;
use crate::Document;

/// One attribute change, delivered to attribute observers.
#[derive(Clone, Debug)]
pub struct AttrMutation {
    pub name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

pub(crate) struct AttrObserver {
    pub(crate) node: NodeId,
    pub(crate) filter: Vec<String>,
    pub(crate) cb: Rc<dyn Fn(&Document, &[AttrMutation])>,
}

pub(crate) struct IntersectionObserver {
    pub(crate) node: NodeId,
    pub(crate) cb: Rc<dyn Fn(&Document, bool)>,
}

impl Document {
    /// Watches attribute mutations on `node`, restricted to the names in
    /// `filter`. Notification is synchronous with the mutation.
    pub fn observe_attrs(
        &self,
        node: NodeId,
        filter: Vec<String>,
        cb: impl Fn(&Document, &[AttrMutation]) + 'static,
    ) -> ObserverId {
        let mut d = self.0.borrow_mut();
        let id = d.next_observer;
        d.next_observer += 1;
        d.attr_observers.insert(
            id,
            AttrObserver {
                node,
                filter,
                cb: Rc::new(cb),
            },
        );
        ObserverId(id)
    }

    /// Watches viewport intersection of `node`. Reports arrive through
    /// [`Document::report_intersection`] or
    /// [`Document::report_viewport_intersections`].
    pub fn observe_intersection(
        &self,
        node: NodeId,
        cb: impl Fn(&Document, bool) + 'static,
    ) -> ObserverId {
        let mut d = self.0.borrow_mut();
        let id = d.next_observer;
        d.next_observer += 1;
        d.intersection_observers
            .insert(id, IntersectionObserver { node, cb: Rc::new(cb) });
        ObserverId(id)
    }

    /// Disconnects an attribute or intersection observer. Disconnecting an
    /// already-gone observer is a no-op.
    pub fn disconnect_observer(&self, id: ObserverId) {
        let mut d = self.0.borrow_mut();
        if d.attr_observers.remove(&id.0).is_none() {
            d.intersection_observers.remove(&id.0);
        }
    }

    pub(crate) fn notify_attr_change(&self, node: NodeId, mutation: AttrMutation) {
        let matching: Vec<Rc<dyn Fn(&Document, &[AttrMutation])>> = {
            let d = self.0.borrow();
            d.attr_observers
                .values()
                .filter(|o| o.node == node && o.filter.iter().any(|f| *f == mutation.name))
                .map(|o| o.cb.clone())
                .collect()
        };
        let batch = [mutation];
        for cb in matching {
            cb(self, &batch);
        }
    }

    /// Delivers one intersection report for `node` to its observers.
    pub fn report_intersection(&self, node: NodeId, intersecting: bool) {
        let matching: Vec<Rc<dyn Fn(&Document, bool)>> = {
            let d = self.0.borrow();
            d.intersection_observers
                .values()
                .filter(|o| o.node == node)
                .map(|o| o.cb.clone())
                .collect()
        };
        for cb in matching {
            cb(self, intersecting);
        }
    }

    /// Compares every observed node's bounds against the document viewport
    /// and delivers a report to each observer.
    pub fn report_viewport_intersections(&self) {
        let reports: Vec<(Rc<dyn Fn(&Document, bool)>, bool)> = {
            let d = self.0.borrow();
            d.intersection_observers
                .values()
                .map(|o| {
                    let intersecting = d.nodes[o.node].bounds.intersects(&d.viewport);
                    (o.cb.clone(), intersecting)
                })
                .collect()
        };
        for (cb, intersecting) in reports {
            cb(self, intersecting);
        }
    }
}
