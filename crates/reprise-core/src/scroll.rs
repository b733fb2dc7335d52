use reprise_dom::{Element, EventType, ListenerId, NodeId};

use crate::{Instance, Runtime};

/// How close (in layout units) the instance's bottom edge must be to the
/// container's bottom edge before the callback fires.
pub const DEFAULT_SCROLL_THRESHOLD: f32 = 600.0;

impl Runtime {
    /// Infinite-scroll support: fires `cb` on every scroll of `container`
    /// (the document root when `None`) that leaves the instance's bottom
    /// edge within `threshold` of the container's bottom edge.
    ///
    /// The listener is removed automatically when the instance leaves the
    /// tree.
    pub fn support_infinite_scroll(
        &self,
        node: NodeId,
        container: Option<&Element>,
        threshold: Option<f32>,
        cb: impl Fn() + 'static,
    ) -> ListenerId {
        let container = container.cloned().unwrap_or_else(|| self.0.doc.root());
        let container_id = container.id();
        let threshold = threshold.unwrap_or(DEFAULT_SCROLL_THRESHOLD);

        let id = container.on(EventType::Scroll, move |doc, _| {
            let bottom = doc.bounds(node).bottom();
            let container_bottom = doc.bounds(container_id).bottom();
            if bottom <= container_bottom + threshold {
                cb();
            }
        });

        if let Some(state) = self.0.instances.borrow_mut().get_mut(node) {
            state.scroll_listener = Some(id);
        }
        id
    }
}

impl Instance {
    pub fn support_infinite_scroll(
        &self,
        cb: impl Fn() + 'static,
        container: Option<&Element>,
        threshold: Option<f32>,
    ) -> ListenerId {
        self.rt
            .support_infinite_scroll(self.el.id(), container, threshold, cb)
    }
}
