use reprise_dom::{AttrMutation, Document, NodeId, ObserverId};

use crate::{Instance, LifecycleFlags, Runtime};

impl Runtime {
    /// Subscribes to mutations of the given attribute names on the instance.
    ///
    /// Subscriptions made this way are tracked on the instance and torn down
    /// en masse when a manual `render()` discards the pass's wiring, so
    /// re-renders don't leak subscriptions. Returns `None` when locked.
    pub fn watch_attr(
        &self,
        node: NodeId,
        names: Vec<String>,
        cb: impl Fn(&Document, &[AttrMutation]) + 'static,
    ) -> Option<ObserverId> {
        if self.flag(node, LifecycleFlags::LOCKED) {
            return None;
        }

        let id = self.0.doc.observe_attrs(node, names, cb);
        if let Some(state) = self.0.instances.borrow_mut().get_mut(node) {
            state.attr_watchers.push(id);
        }
        Some(id)
    }
}

impl Instance {
    /// Watches a single attribute.
    pub fn watch_attr(
        &self,
        name: &str,
        cb: impl Fn(&Document, &[AttrMutation]) + 'static,
    ) -> Option<ObserverId> {
        self.rt.watch_attr(self.el.id(), vec![name.to_owned()], cb)
    }

    /// Watches a set of attributes with one callback.
    pub fn watch_attrs(
        &self,
        names: &[&str],
        cb: impl Fn(&Document, &[AttrMutation]) + 'static,
    ) -> Option<ObserverId> {
        self.rt.watch_attr(
            self.el.id(),
            names.iter().map(|n| (*n).to_owned()).collect(),
            cb,
        )
    }
}
