use reprise_dom::{Element, Event, EventKind, EventType, NodeId, PointerButton};

use crate::{Instance, Runtime};

/// Marker class carried while the user is interacting with an instance.
pub const CLASS_INTERACTING: &str = "interacting";

/// Tag of the auxiliary floating menu. Activity inside one keeps the
/// interacting state alive even though the menu floats outside the instance.
pub const AUX_MENU_TAG: &str = "context-menu";

/// Tag of the descendant elements that open the auxiliary menu.
pub const MENU_TRIGGER_TAG: &str = "menu-trigger";

/// Class of menu entries the user may click without ending the interaction.
pub const SAFE_MENU_ITEM_CLASS: &str = "menu-item";

/// Trigger configuration for [`Runtime::support_interacting_state`]. `None`
/// fields fall back to the defaults: the whole instance for secondary
/// clicks, its menu-trigger descendants for primary clicks.
#[derive(Default)]
pub struct InteractOptions {
    pub secondary_triggers: Option<Vec<Element>>,
    pub primary_triggers: Option<Vec<Element>>,
}

impl Runtime {
    /// Wires the entry triggers for the interacting state: secondary
    /// pointer-down on the configured elements, primary pointer-down on the
    /// configured child elements, and keyboard focus entering any focusable
    /// descendant.
    pub fn support_interacting_state(&self, node: NodeId, options: InteractOptions) {
        let el = self.0.doc.element(node);

        let secondary = options
            .secondary_triggers
            .unwrap_or_else(|| vec![el.clone()]);
        for trigger in secondary {
            let rt = self.clone();
            trigger.on(EventType::PointerDown, move |_, ev| {
                if matches!(ev.kind, EventKind::PointerDown(PointerButton::Secondary)) {
                    rt.enter_interacting_state(node);
                }
            });
        }

        let primary = options
            .primary_triggers
            .unwrap_or_else(|| el.query_tag(MENU_TRIGGER_TAG));
        for trigger in primary {
            let rt = self.clone();
            trigger.on(EventType::PointerDown, move |_, ev| {
                if matches!(ev.kind, EventKind::PointerDown(PointerButton::Primary)) {
                    rt.enter_interacting_state(node);
                }
            });
        }

        // Focus entering any focusable descendant (typically by tabbing in).
        let focusable: Vec<Element> = el
            .query_tag("button")
            .into_iter()
            .chain(el.query_tag("link"))
            .chain(el.query_attr_value("tabindex", "0"))
            .collect();
        for child in focusable {
            let rt = self.clone();
            child.on(EventType::FocusIn, move |_, _| {
                rt.enter_interacting_state(node);
            });
        }
    }

    /// Enters the interacting state. Entering while already interacting is
    /// expected (the user interacting again with something they are already
    /// interacting with) and is a no-op.
    ///
    /// On first entry a document-scoped pointer-up/key-up listener pair is
    /// installed; that pair is the only thing that ever ends the state.
    pub fn enter_interacting_state(&self, node: NodeId) {
        let el = self.0.doc.element(node);
        if el.has_class(CLASS_INTERACTING) {
            return;
        }
        el.add_class(CLASS_INTERACTING);

        let rt = self.clone();
        let up = self
            .0
            .doc
            .add_document_listener(EventType::PointerUp, move |_, ev| {
                rt.check_done_interacting(node, ev);
            });
        let rt = self.clone();
        let key = self
            .0
            .doc
            .add_document_listener(EventType::KeyUp, move |_, ev| {
                rt.check_done_interacting(node, ev);
            });

        if let Some(state) = self.0.instances.borrow_mut().get_mut(node) {
            state.interacting = Some((up, key));
        }
        log::debug!("<{}> entered interacting state", el.tag());
    }

    /// Evaluates one document-level pointer-up or key-up against the exit
    /// conditions. Anything that doesn't match a "stay" rule ends the
    /// interaction: marker class removed, both listeners gone.
    fn check_done_interacting(&self, node: NodeId, ev: &Event) {
        let el = self.0.doc.element(node);
        let target = self.0.doc.element(ev.target);

        match &ev.kind {
            EventKind::KeyUp(key) => {
                // Releasing a bare modifier never ends anything.
                if key.is_modifier() {
                    return;
                }
                if target.closest(AUX_MENU_TAG).is_some() {
                    return;
                }
                // Typing while focused inside the instance stays.
                if el.contains(&target) {
                    return;
                }
            }
            EventKind::PointerUp(PointerButton::Secondary) => {
                if el.contains(&target) || target.closest(AUX_MENU_TAG).is_some() {
                    return;
                }
            }
            EventKind::PointerUp(PointerButton::Primary) => {
                if el
                    .query_tag(MENU_TRIGGER_TAG)
                    .iter()
                    .any(|m| m.contains(&target))
                {
                    return;
                }
            }
            _ => {}
        }

        // Safe menu entries may be clicked without leaving the state; other
        // menu entries close the menu and end the interaction below.
        if target.closest(AUX_MENU_TAG).is_some()
            && (target.has_class(SAFE_MENU_ITEM_CLASS)
                || target
                    .parent()
                    .is_some_and(|p| p.has_class(SAFE_MENU_ITEM_CLASS)))
        {
            return;
        }

        let listeners = self
            .0
            .instances
            .borrow_mut()
            .get_mut(node)
            .and_then(|s| s.interacting.take());
        if let Some((up, key)) = listeners {
            self.0.doc.remove_listener(up);
            self.0.doc.remove_listener(key);
        }
        el.remove_class(CLASS_INTERACTING);
        log::debug!("<{}> left interacting state", el.tag());
    }
}

impl Instance {
    pub fn support_interacting_state(&self, options: InteractOptions) {
        self.rt.support_interacting_state(self.el.id(), options)
    }

    pub fn enter_interacting_state(&self) {
        self.rt.enter_interacting_state(self.el.id())
    }

    pub fn is_interacting(&self) -> bool {
        self.el.has_class(CLASS_INTERACTING)
    }
}
