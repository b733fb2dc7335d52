use reprise_dom::{NodeId, ObserverId};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::{Instance, Runtime};

/// Opt-in attribute for lazy rendering.
pub const ATTR_LAZY_RENDER: &str = "lazy-render";

/// Pre-insertion opt-in: a truthy binding under this key requests lazy mode
/// before the attribute could exist.
pub const BINDING_LAZY_RENDER: &str = "lazy-render";

/// The two subscriptions lazy mode owns. Installed together, torn down
/// together.
pub(crate) struct LazyWatch {
    pub(crate) attr_observer: ObserverId,
    pub(crate) visibility_observer: ObserverId,
}

impl Runtime {
    pub fn is_using_lazy_render_mode(&self, node: NodeId) -> bool {
        self.0.doc.has_attr(node, ATTR_LAZY_RENDER)
            || matches!(
                self.0.doc.data(node, BINDING_LAZY_RENDER),
                Some(Value::Bool(true))
            )
    }

    pub(crate) fn lazy_watch_active(&self, node: NodeId) -> bool {
        self.0
            .instances
            .borrow()
            .get(node)
            .is_some_and(|s| s.lazy_watch.is_some())
    }

    /// Puts the instance in lazy-render mode: build and load wait until the
    /// first report that the instance intersects the viewport. Enabling
    /// while already watching is a misuse fault.
    pub fn enable_lazy_render(&self, node: NodeId) -> Result<()> {
        if self.lazy_watch_active(node) {
            return Err(Error::AlreadyWatchingVisibility);
        }

        // Removing the opt-in attribute disables lazy mode out-of-band.
        let rt = self.clone();
        let attr_observer =
            self.0
                .doc
                .observe_attrs(node, vec![ATTR_LAZY_RENDER.to_owned()], move |_, muts| {
                    if muts.iter().any(|m| m.new_value.is_none()) {
                        let _ = rt.disable_lazy_render(node);
                    }
                });

        // The instance has rendered nothing yet, so its box is empty; the
        // intersection report, not visibility, is what says it's time.
        let rt = self.clone();
        let visibility_observer = self.0.doc.observe_intersection(node, move |_, intersecting| {
            if !intersecting {
                return;
            }

            // Single-shot: disable before doing further work, so later
            // reports cannot trigger a second render.
            let _ = rt.disable_lazy_render(node);

            if rt.is_using_render_queue(node) {
                rt.add_to_render_queue(node);
            } else {
                rt.finish_render(node, None);
            }
        });

        if let Some(state) = self.0.instances.borrow_mut().get_mut(node) {
            state.lazy_watch = Some(LazyWatch {
                attr_observer,
                visibility_observer,
            });
        }
        log::debug!("<{}> waiting for visibility", self.0.doc.tag(node));
        Ok(())
    }

    /// Ends lazy-render mode: both subscriptions go away and the opt-in
    /// markers are cleared. Disabling while not watching is a misuse fault.
    pub fn disable_lazy_render(&self, node: NodeId) -> Result<()> {
        let watch = self
            .0
            .instances
            .borrow_mut()
            .get_mut(node)
            .and_then(|s| s.lazy_watch.take())
            .ok_or(Error::NotWatchingVisibility)?;

        self.0.doc.disconnect_observer(watch.attr_observer);
        self.0.doc.disconnect_observer(watch.visibility_observer);

        if self.0.doc.has_attr(node, ATTR_LAZY_RENDER) {
            self.0.doc.remove_attr(node, ATTR_LAZY_RENDER);
        }
        if matches!(
            self.0.doc.data(node, BINDING_LAZY_RENDER),
            Some(Value::Bool(true))
        ) {
            self.0.doc.set_data(node, BINDING_LAZY_RENDER, Value::Bool(false));
        }
        Ok(())
    }
}

impl Instance {
    pub fn is_using_lazy_render_mode(&self) -> bool {
        self.rt.is_using_lazy_render_mode(self.el.id())
    }

    pub fn enable_lazy_render(&self) -> Result<()> {
        self.rt.enable_lazy_render(self.el.id())
    }

    pub fn disable_lazy_render(&self) -> Result<()> {
        self.rt.disable_lazy_render(self.el.id())
    }
}
