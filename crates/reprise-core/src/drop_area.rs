use std::path::PathBuf;
use std::rc::Rc;

use reprise_dom::{Element, Event, EventKind, EventType, NodeId};

use crate::{Instance, Runtime};

/// Marker class carried while something is dragged over the drop area.
pub const CLASS_DROP_HOVERING: &str = "drop-hovering";

impl Runtime {
    /// Turns the instance (or a chosen child) into a drop target. The
    /// hovering class toggles with drag-enter/leave, and `on_drop` receives
    /// the dropped file paths.
    pub fn enable_drop_area(
        &self,
        node: NodeId,
        inner: Option<&Element>,
        on_drop: impl Fn(&Event, &[PathBuf]) + 'static,
    ) {
        let el = inner.cloned().unwrap_or_else(|| self.0.doc.element(node));
        let on_drop = Rc::new(on_drop);

        // The platform requires a drag-over listener for the area to accept
        // drops at all.
        el.on(EventType::DragOver, |_, _| {});

        let enter_el = el.clone();
        el.on(EventType::DragEnter, move |_, _| {
            enter_el.add_class(CLASS_DROP_HOVERING);
        });

        let leave_el = el.clone();
        el.on(EventType::DragLeave, move |_, _| {
            leave_el.remove_class(CLASS_DROP_HOVERING);
        });

        let drop_el = el.clone();
        el.on(EventType::Drop, move |_, ev| {
            drop_el.remove_class(CLASS_DROP_HOVERING);
            if let EventKind::Drop(payload) = &ev.kind {
                on_drop(ev, &payload.files);
            }
        });
    }
}

impl Instance {
    pub fn enable_drop_area(
        &self,
        inner: Option<&Element>,
        on_drop: impl Fn(&Event, &[PathBuf]) + 'static,
    ) {
        self.rt.enable_drop_area(self.el.id(), inner, on_drop)
    }
}
