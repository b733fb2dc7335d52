use reprise_dom::NodeId;

use crate::factory::BINDING_PROPS;
use crate::interact::CLASS_INTERACTING;
use crate::relay::{projection_text, PropsStore, PROP_MARKER_ATTR};
use crate::runtime::InstanceState;
use crate::{Instance, LifecycleFlags, RenderOpts, Runtime};

/// Boolean attribute that disables the whole protocol for an instance.
pub const ATTR_LOCKED: &str = "locked";

impl Runtime {
    /// Insertion protocol. Fires on every platform insertion, warm or cold.
    pub(crate) fn connected(&self, node: NodeId) {
        let el = self.0.doc.element(node);
        let ctor = self.0.registry.borrow().lookup(&el.tag());
        let Some(ctor) = ctor else {
            return;
        };

        log::debug!("insertion pass for <{}>", el.tag());

        let locked = el.has_attr(ATTR_LOCKED);
        if locked {
            let mut instances = self.0.instances.borrow_mut();
            match instances.get_mut(node) {
                Some(state) => state.flags.insert(LifecycleFlags::LOCKED),
                None => {
                    let mut state = InstanceState::new(ctor());
                    state.flags.insert(LifecycleFlags::LOCKED);
                    instances.insert(node, state);
                }
            }
            return;
        }

        // Capture what the previous pass (or the element factory) left in
        // props, then replace the store for this pass.
        let preserved = {
            let instances = self.0.instances.borrow();
            match instances.get(node) {
                Some(state) if !state.props.is_empty() => Some(state.props.snapshot()),
                Some(_) => None,
                None => el
                    .data(BINDING_PROPS)
                    .and_then(|v| v.as_object().cloned()),
            }
        };

        let props = PropsStore::new();
        {
            let doc = self.0.doc.clone();
            props.subscribe(move |key, value| {
                for target in doc.element(node).query_attr_value(PROP_MARKER_ATTR, key) {
                    target.set_text(projection_text(value));
                }
            });
        }

        // Wiring from an earlier pass must not survive the reset.
        let stale = {
            let mut instances = self.0.instances.borrow_mut();
            match instances.get_mut(node) {
                Some(state) => {
                    state.flags = LifecycleFlags::empty();
                    state.props = props;
                    state.preserved = preserved;
                    let mut stale: Vec<_> = state.attr_watchers.drain(..).collect();
                    if let Some(watch) = state.lazy_watch.take() {
                        stale.push(watch.attr_observer);
                        stale.push(watch.visibility_observer);
                    }
                    stale
                }
                None => {
                    let mut state = InstanceState::new(ctor());
                    state.props = props;
                    state.preserved = preserved;
                    instances.insert(node, state);
                    Vec::new()
                }
            }
        };
        for id in stale {
            self.0.doc.disconnect_observer(id);
        }

        // A cached serialization may carry the interaction marker.
        el.remove_class(CLASS_INTERACTING);

        // The `false` sentinel aborts only the spawn step; the insertion
        // pass itself continues.
        self.spawn(node, None);

        if self.is_using_lazy_render_mode(node) {
            // Cannot already be watching: the reset above cleared any
            // leftover watch.
            let _ = self.enable_lazy_render(node);
            return;
        }

        if self.is_using_render_queue(node) {
            self.add_to_render_queue(node);
            return;
        }

        self.finish_render(node, None);
    }

    /// Removal protocol. Synchronous from the platform's perspective; no
    /// ordering guarantee against an in-flight load tick.
    pub(crate) fn disconnected(&self, node: NodeId) {
        let scroll_listener = {
            let mut instances = self.0.instances.borrow_mut();
            let Some(state) = instances.get_mut(node) else {
                return;
            };
            if state.flags.contains(LifecycleFlags::LOCKED) {
                return;
            }
            state.scroll_listener.take()
        };

        if let Some(listener) = scroll_listener {
            self.0.doc.remove_listener(listener);
        }

        if let Some(behavior) = self.behavior(node) {
            let inst = self.instance_handle(node);
            behavior.borrow_mut().on_removed(&inst);
        }
    }

    /// The spawn step. Safe to call repeatedly; must stay cheap. Returns
    /// `false` when locked or when the hook signalled failure.
    pub fn spawn(&self, node: NodeId, opts: Option<&RenderOpts>) -> bool {
        if self.flag(node, LifecycleFlags::LOCKED) {
            return false;
        }
        let Some(behavior) = self.behavior(node) else {
            return false;
        };

        let inst = self.instance_handle(node);
        let ok = behavior.borrow_mut().on_spawn(&inst, opts);
        if !ok {
            self.set_flag(node, LifecycleFlags::SPAWNED, false);
            log::debug!("<{}> spawn hook signalled failure", inst.el.tag());
            return false;
        }

        self.set_flag(node, LifecycleFlags::SPAWNED, true);
        true
    }

    /// The build step. Does not consult `should_build` — callers decide;
    /// the insertion path checks, `render()` deliberately does not.
    pub fn build(&self, node: NodeId, opts: Option<&RenderOpts>) -> bool {
        if self.flag(node, LifecycleFlags::LOCKED) {
            return false;
        }
        let Some(behavior) = self.behavior(node) else {
            return false;
        };

        let inst = self.instance_handle(node);
        let ok = behavior.borrow_mut().on_build(&inst, opts);
        self.set_flag(node, LifecycleFlags::BUILT, ok);
        ok
    }

    /// The load step: the descendant-settle hook, then the flush of props
    /// captured before the store existed (re-triggering their projection).
    pub fn load(&self, node: NodeId, opts: Option<&RenderOpts>) {
        if let Some(behavior) = self.behavior(node) {
            let inst = self.instance_handle(node);
            behavior.borrow_mut().on_load(&inst, opts);
        }

        let preserved = self
            .0
            .instances
            .borrow()
            .get(node)
            .and_then(|s| s.preserved.clone());
        if let Some(map) = preserved {
            let props = self.props(node);
            for (key, value) in map {
                props.set(key, value);
            }
        }
    }

    /// The build-skip policy, possibly overridden by the component.
    pub fn should_build(&self, node: NodeId) -> bool {
        let Some(behavior) = self.behavior(node) else {
            return false;
        };
        let inst = self.instance_handle(node);
        let decision = behavior.borrow().should_build(&inst);
        decision
    }

    /// Couples build and load, with load one tick later so injected content
    /// has entered the tree (and descendant insertions have started) first.
    /// `done` runs after the load tick — the render queue drains through it.
    pub(crate) fn finish_render(&self, node: NodeId, done: Option<Box<dyn FnOnce()>>) {
        if self.should_build(node) {
            self.build(node, None);
        }

        let rt = self.clone();
        self.0.doc.defer(move || {
            rt.load(node, None);
            if let Some(done) = done {
                done();
            }
        });

        self.set_flag(node, LifecycleFlags::RENDERED, true);
    }

    /// Manual re-render of an already-inserted instance, preserving its
    /// identity and directly-attached handlers. Always builds.
    ///
    /// `rendered` flips true as soon as the load tick is scheduled — before
    /// the load logic actually runs. Observable, and deliberate.
    pub fn render(&self, node: NodeId, opts: Option<&RenderOpts>) -> bool {
        if self.flag(node, LifecycleFlags::LOCKED) {
            return false;
        }

        if self.lazy_watch_active(node) {
            let _ = self.disable_lazy_render(node);
        }

        // Attribute wiring from the pass being replaced goes away wholesale.
        let watchers = {
            let mut instances = self.0.instances.borrow_mut();
            instances
                .get_mut(node)
                .map(|s| std::mem::take(&mut s.attr_watchers))
                .unwrap_or_default()
        };
        for id in watchers {
            self.0.doc.disconnect_observer(id);
        }

        self.set_flag(node, LifecycleFlags::RENDERED, false);

        if let Some(behavior) = self.behavior(node) {
            let inst = self.instance_handle(node);
            behavior.borrow_mut().on_removed(&inst);
        }

        self.spawn(node, opts);
        self.build(node, opts);

        let rt = self.clone();
        let opts = opts.cloned();
        self.0.doc.defer(move || rt.load(node, opts.as_ref()));

        self.set_flag(node, LifecycleFlags::RENDERED, true);
        true
    }

    /// Clears the locked state and its attribute.
    pub fn unlock(&self, node: NodeId) {
        self.set_flag(node, LifecycleFlags::LOCKED, false);
        self.0.doc.remove_attr(node, ATTR_LOCKED);
    }
}

impl Instance {
    pub fn spawn(&self, opts: Option<&RenderOpts>) -> bool {
        self.rt.spawn(self.el.id(), opts)
    }

    pub fn build(&self, opts: Option<&RenderOpts>) -> bool {
        self.rt.build(self.el.id(), opts)
    }

    pub fn load(&self, opts: Option<&RenderOpts>) {
        self.rt.load(self.el.id(), opts)
    }

    pub fn render(&self, opts: Option<&RenderOpts>) -> bool {
        self.rt.render(self.el.id(), opts)
    }

    pub fn unlock(&self) {
        self.rt.unlock(self.el.id())
    }

    /// The standard build-skip policy: never build while locked, otherwise
    /// build only when there is no child content. Reinjected cached markup
    /// has children, so it skips the expensive step.
    pub fn default_should_build(&self) -> bool {
        if self.locked() {
            return false;
        }
        self.el.first_child().is_none()
    }
}
