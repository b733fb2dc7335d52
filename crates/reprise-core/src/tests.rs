#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use reprise_dom::{Event, EventKind, EventType, Key, PointerButton, Rect};
    use serde_json::json;

    use crate::{
        Component, ElementSpec, Error, Instance, InteractOptions, Runtime, ATTR_LAZY_RENDER,
        ATTR_LOCKED, ATTR_RENDER_QUEUE, CLASS_DROP_HOVERING, CLASS_IN_RENDER_QUEUE,
        CLASS_INTERACTING,
    };

    type Log = Rc<RefCell<Vec<String>>>;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Test component that records every hook invocation. Instances are told
    /// apart by their `id` attribute when one is set.
    struct Recorder {
        log: Log,
        child_tag: Option<String>,
        spawn_ok: bool,
        build_ok: bool,
    }

    impl Recorder {
        fn label(inst: &Instance) -> String {
            inst.element()
                .attr("id")
                .unwrap_or_else(|| inst.element().tag())
        }
    }

    impl Component for Recorder {
        fn on_spawn(&mut self, inst: &Instance, _opts: Option<&serde_json::Value>) -> bool {
            self.log
                .borrow_mut()
                .push(format!("{}:spawn", Self::label(inst)));
            self.spawn_ok
        }

        fn on_build(&mut self, inst: &Instance, _opts: Option<&serde_json::Value>) -> bool {
            self.log
                .borrow_mut()
                .push(format!("{}:build", Self::label(inst)));
            if self.build_ok {
                if let Some(tag) = &self.child_tag {
                    let doc = inst.element().document().clone();
                    let child = doc.create_element(tag.clone());
                    inst.element().replace_children(&[child]);
                }
            }
            self.build_ok
        }

        fn on_load(&mut self, inst: &Instance, _opts: Option<&serde_json::Value>) {
            self.log
                .borrow_mut()
                .push(format!("{}:load", Self::label(inst)));
        }

        fn on_removed(&mut self, inst: &Instance) {
            self.log
                .borrow_mut()
                .push(format!("{}:removed", Self::label(inst)));
        }
    }

    fn register_recorder(rt: &Runtime, tag: &str, log: &Log, child_tag: Option<&str>) {
        register_with(rt, tag, log, child_tag, true, true);
    }

    fn register_with(
        rt: &Runtime,
        tag: &str,
        log: &Log,
        child_tag: Option<&str>,
        spawn_ok: bool,
        build_ok: bool,
    ) {
        let log = log.clone();
        let child_tag = child_tag.map(str::to_owned);
        rt.register(tag, move || {
            Box::new(Recorder {
                log: log.clone(),
                child_tag: child_tag.clone(),
                spawn_ok,
                build_ok,
            })
        });
    }

    fn new_log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn entries(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    // ----- lifecycle protocol -----

    #[test]
    fn test_insertion_spawns_builds_then_loads_one_tick_later() {
        init_logs();
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("item"));

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);

        // Build happened synchronously; load waits for the next tick, but
        // the pass already counts as rendered once scheduling is done.
        assert_eq!(entries(&log), vec!["widget:spawn", "widget:build"]);
        let inst = rt.instance(el.id()).unwrap();
        assert!(inst.spawned());
        assert!(inst.built());
        assert!(inst.rendered());

        rt.document().settle();
        assert_eq!(
            entries(&log),
            vec!["widget:spawn", "widget:build", "widget:load"]
        );
    }

    #[test]
    fn test_warm_reinsertion_skips_build() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("item"));

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);
        rt.document().settle();
        el.remove();
        log.borrow_mut().clear();

        // The children built by the first pass are still attached, so the
        // warm pass spawns and loads without rebuilding.
        rt.document().root().append(&el);
        rt.document().settle();
        assert_eq!(entries(&log), vec!["widget:spawn", "widget:load"]);
        assert_eq!(el.children().len(), 1);
    }

    #[test]
    fn test_cold_insertion_always_builds() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, None);

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);
        rt.document().settle();

        assert!(entries(&log).contains(&"widget:build".to_owned()));
    }

    #[test]
    fn test_render_always_builds_and_preserves_identity() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("item"));

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);
        rt.document().settle();
        log.borrow_mut().clear();

        let inst = rt.instance(el.id()).unwrap();
        assert!(inst.render(None));
        rt.document().settle();

        // Build ran although content existed: render() bypasses the skip
        // policy. The node was never detached from its parent.
        assert_eq!(
            entries(&log),
            vec![
                "widget:removed",
                "widget:spawn",
                "widget:build",
                "widget:load"
            ]
        );
        assert_eq!(el.parent().map(|p| p.id()), Some(rt.document().root().id()));
    }

    #[test]
    fn test_rendered_is_observable_before_the_load_tick_runs() {
        // Deliberate, surprising ordering: render() reports rendered=true
        // synchronously, while the load logic only runs on the next tick.
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, None);

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);
        rt.document().settle();
        log.borrow_mut().clear();

        let inst = rt.instance(el.id()).unwrap();
        inst.render(None);

        assert!(inst.rendered());
        assert!(!entries(&log).contains(&"widget:load".to_owned()));

        rt.document().tick();
        assert!(entries(&log).contains(&"widget:load".to_owned()));
    }

    #[test]
    fn test_soft_spawn_failure_clears_flag_but_pass_continues() {
        let rt = Runtime::new();
        let log = new_log();
        register_with(&rt, "widget", &log, None, false, true);

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);
        rt.document().settle();

        let inst = rt.instance(el.id()).unwrap();
        // The sentinel only aborts the spawn step itself.
        assert!(!inst.spawned());
        assert!(entries(&log).contains(&"widget:build".to_owned()));
    }

    #[test]
    fn test_soft_build_failure_leaves_built_false() {
        let rt = Runtime::new();
        let log = new_log();
        register_with(&rt, "widget", &log, None, true, false);

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);
        rt.document().settle();

        let inst = rt.instance(el.id()).unwrap();
        assert!(inst.spawned());
        assert!(!inst.built());
    }

    #[test]
    fn test_locked_instance_runs_no_lifecycle_step() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, None);

        let el = rt.document().create_element("widget");
        el.set_attr(ATTR_LOCKED, "");
        rt.document().root().append(&el);
        rt.document().settle();
        assert!(entries(&log).is_empty());

        let inst = rt.instance(el.id()).unwrap();
        assert!(!inst.render(None));
        assert!(!inst.spawn(None));
        assert!(!inst.build(None));
        el.remove();
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_unlock_reenables_the_protocol() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, None);

        let el = rt.document().create_element("widget");
        el.set_attr(ATTR_LOCKED, "");
        rt.document().root().append(&el);

        let inst = rt.instance(el.id()).unwrap();
        inst.unlock();
        assert!(!el.has_attr(ATTR_LOCKED));
        assert!(inst.render(None));
        rt.document().settle();
        assert!(entries(&log).contains(&"widget:build".to_owned()));
    }

    #[test]
    fn test_parent_build_starts_children_before_parent_load() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "kid", &log, None);
        register_recorder(&rt, "parent", &log, Some("kid"));

        let el = rt.document().create_element("parent");
        rt.document().root().append(&el);
        rt.document().settle();

        // The child's whole pass, load included, settles before the parent's
        // deferred load runs.
        assert_eq!(
            entries(&log),
            vec![
                "parent:spawn",
                "parent:build",
                "kid:spawn",
                "kid:build",
                "kid:load",
                "parent:load"
            ]
        );
    }

    // ----- render queue -----

    #[test]
    fn test_render_queue_is_strict_fifo_with_no_overlap() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("item"));

        let mut els = Vec::new();
        for id in ["a", "b", "c"] {
            let el = rt.document().create_element("widget");
            el.set_attr("id", id);
            el.set_attr(ATTR_RENDER_QUEUE, "");
            rt.document().root().append(&el);
            els.push(el);
        }

        // Queued, marked, not built yet.
        assert_eq!(entries(&log), vec!["a:spawn", "b:spawn", "c:spawn"]);
        assert!(els.iter().all(|el| el.has_class(CLASS_IN_RENDER_QUEUE)));

        rt.document().settle();

        assert_eq!(
            entries(&log),
            vec![
                "a:spawn", "b:spawn", "c:spawn", "a:build", "a:load", "b:build", "b:load",
                "c:build", "c:load"
            ]
        );
        assert!(els.iter().all(|el| !el.has_class(CLASS_IN_RENDER_QUEUE)));
        assert_eq!(rt.queue_len("default"), 0);
    }

    #[test]
    fn test_differently_named_queues_drain_independently() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("item"));

        for (id, queue) in [("a1", "alpha"), ("b1", "beta"), ("a2", "alpha")] {
            let el = rt.document().create_element("widget");
            el.set_attr("id", id);
            el.set_attr(ATTR_RENDER_QUEUE, queue);
            rt.document().root().append(&el);
        }
        rt.document().settle();

        let built: Vec<String> = entries(&log)
            .into_iter()
            .filter(|e| e.ends_with(":build"))
            .collect();
        // Arrival order holds within each name; the names interleave freely.
        let alpha: Vec<&String> = built.iter().filter(|e| e.starts_with('a')).collect();
        assert_eq!(alpha, vec!["a1:build", "a2:build"]);
        assert!(built.contains(&"b1:build".to_owned()));
    }

    #[test]
    fn test_running_a_missing_queue_is_an_error() {
        let rt = Runtime::new();
        assert_eq!(
            rt.run_render_queue("nope"),
            Err(Error::UnknownQueue("nope".to_owned()))
        );
    }

    #[test]
    fn test_creating_a_queue_twice_is_an_error() {
        let rt = Runtime::new();
        rt.create_render_queue("thumbs").unwrap();
        assert_eq!(
            rt.create_render_queue("thumbs"),
            Err(Error::QueueExists("thumbs".to_owned()))
        );
    }

    // ----- lazy render -----

    #[test]
    fn test_lazy_instance_never_builds_before_intersection() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("item"));

        let el = rt.document().create_element("widget");
        el.set_attr(ATTR_LAZY_RENDER, "");
        rt.document().root().append(&el);
        rt.document().settle();

        assert_eq!(entries(&log), vec!["widget:spawn"]);

        rt.document().report_intersection(el.id(), false);
        rt.document().settle();
        assert_eq!(entries(&log), vec!["widget:spawn"]);

        rt.document().report_intersection(el.id(), true);
        rt.document().settle();
        assert_eq!(
            entries(&log),
            vec!["widget:spawn", "widget:build", "widget:load"]
        );
        // The opt-in attribute went away when lazy mode fired.
        assert!(!el.has_attr(ATTR_LAZY_RENDER));

        // The watch was single-shot: further reports change nothing.
        rt.document().report_intersection(el.id(), true);
        rt.document().settle();
        assert_eq!(entries(&log).len(), 3);
    }

    #[test]
    fn test_disabling_lazy_before_intersection_prevents_the_build() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("item"));

        let el = rt.document().create_element("widget");
        el.set_attr(ATTR_LAZY_RENDER, "");
        rt.document().root().append(&el);

        let inst = rt.instance(el.id()).unwrap();
        inst.disable_lazy_render().unwrap();

        rt.document().report_intersection(el.id(), true);
        rt.document().settle();
        assert_eq!(entries(&log), vec!["widget:spawn"]);
    }

    #[test]
    fn test_lazy_misuse_is_reported() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, None);

        let el = rt.document().create_element("widget");
        el.set_attr(ATTR_LAZY_RENDER, "");
        rt.document().root().append(&el);

        let inst = rt.instance(el.id()).unwrap();
        assert_eq!(
            inst.enable_lazy_render(),
            Err(Error::AlreadyWatchingVisibility)
        );
        inst.disable_lazy_render().unwrap();
        assert_eq!(
            inst.disable_lazy_render(),
            Err(Error::NotWatchingVisibility)
        );
    }

    #[test]
    fn test_removing_the_lazy_attribute_disables_out_of_band() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("item"));

        let el = rt.document().create_element("widget");
        el.set_attr(ATTR_LAZY_RENDER, "");
        rt.document().root().append(&el);

        el.remove_attr(ATTR_LAZY_RENDER);

        rt.document().report_intersection(el.id(), true);
        rt.document().settle();
        assert_eq!(entries(&log), vec!["widget:spawn"]);
    }

    #[test]
    fn test_lazy_hands_off_to_the_render_queue_when_both_are_set() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("item"));

        let el = rt.document().create_element("widget");
        el.set_attr(ATTR_LAZY_RENDER, "");
        el.set_attr(ATTR_RENDER_QUEUE, "thumbs");
        rt.document().root().append(&el);
        rt.document().settle();
        assert_eq!(entries(&log), vec!["widget:spawn"]);

        rt.document().report_intersection(el.id(), true);
        assert!(el.has_class(CLASS_IN_RENDER_QUEUE));
        rt.document().settle();
        assert_eq!(
            entries(&log),
            vec!["widget:spawn", "widget:build", "widget:load"]
        );
    }

    // ----- props relay -----

    #[test]
    fn test_props_write_projects_into_marked_descendants_only() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, None);

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);

        let doc = rt.document();
        let title_a = doc.create_element("heading");
        title_a.set_attr("data-prop", "title");
        let title_b = doc.create_element("caption");
        title_b.set_attr("data-prop", "title");
        let artist = doc.create_element("caption");
        artist.set_attr("data-prop", "artist");
        for child in [&title_a, &title_b, &artist] {
            el.append(child);
        }

        let inst = rt.instance(el.id()).unwrap();
        inst.props().set("title", json!("Opening Track"));

        assert_eq!(title_a.text(), "Opening Track");
        assert_eq!(title_b.text(), "Opening Track");
        assert_eq!(artist.text(), "");

        // Non-string values project as their JSON rendering.
        inst.props().set("artist", json!(7));
        assert_eq!(artist.text(), "7");
    }

    #[test]
    fn test_factory_bindings_survive_until_first_load() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("slot"));

        let el = rt.create_element(
            ElementSpec::new("widget")
                .attr("track-count", 42)
                .props(json!({ "title": "Bound Before Insertion" })),
        );

        // Detached: bindings and serialized attributes are readable as-is.
        assert_eq!(el.attr("track-count").as_deref(), Some("42"));
        assert_eq!(
            el.data("props"),
            Some(json!({ "title": "Bound Before Insertion" }))
        );

        rt.document().root().append(&el);
        let slot = el.first_child().unwrap();
        slot.set_attr("data-prop", "title");

        // Not yet flushed: the flush happens during load, one tick later.
        assert_eq!(slot.text(), "");
        rt.document().settle();
        assert_eq!(slot.text(), "Bound Before Insertion");

        let inst = rt.instance(el.id()).unwrap();
        assert_eq!(inst.props().get("title"), Some(json!("Bound Before Insertion")));
    }

    #[test]
    fn test_props_survive_warm_reinsertion() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, Some("slot"));

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);
        rt.document().settle();

        let inst = rt.instance(el.id()).unwrap();
        inst.props().set("title", json!("Kept Warm"));

        el.remove();
        rt.document().root().append(&el);
        rt.document().settle();

        // The insertion captured the old store and the load re-applied it.
        let inst = rt.instance(el.id()).unwrap();
        assert_eq!(inst.props().get("title"), Some(json!("Kept Warm")));
    }

    // ----- interacting state -----

    fn interacting_fixture(rt: &Runtime, log: &Log) -> (crate::Instance, reprise_dom::Element) {
        register_recorder(rt, "widget", log, Some("menu-trigger"));
        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);
        rt.document().settle();

        let inst = rt.instance(el.id()).unwrap();
        inst.support_interacting_state(InteractOptions::default());
        (inst, el)
    }

    #[test]
    fn test_entering_interacting_state_twice_is_idempotent() {
        let rt = Runtime::new();
        let log = new_log();
        let (_inst, el) = interacting_fixture(&rt, &log);

        for _ in 0..2 {
            rt.document().dispatch(Event::new(
                EventKind::PointerDown(PointerButton::Secondary),
                el.id(),
            ));
        }

        assert!(el.has_class(CLASS_INTERACTING));
        // Exactly one document-level pair no matter how many entries.
        assert_eq!(rt.document().document_listener_count(EventType::PointerUp), 1);
        assert_eq!(rt.document().document_listener_count(EventType::KeyUp), 1);
    }

    #[test]
    fn test_releases_inside_instance_or_menu_do_not_exit() {
        let rt = Runtime::new();
        let log = new_log();
        let (_inst, el) = interacting_fixture(&rt, &log);

        let menu = rt.document().create_element("context-menu");
        let safe = rt.document().create_element("entry");
        safe.add_class("menu-item");
        menu.append(&safe);
        rt.document().root().append(&menu);

        rt.document().dispatch(Event::new(
            EventKind::PointerDown(PointerButton::Secondary),
            el.id(),
        ));
        assert!(el.has_class(CLASS_INTERACTING));

        // Secondary release inside the instance: stays.
        rt.document().dispatch(Event::new(
            EventKind::PointerUp(PointerButton::Secondary),
            el.id(),
        ));
        assert!(el.has_class(CLASS_INTERACTING));

        // Secondary release inside the floating menu: stays.
        rt.document().dispatch(Event::new(
            EventKind::PointerUp(PointerButton::Secondary),
            menu.id(),
        ));
        assert!(el.has_class(CLASS_INTERACTING));

        // Primary release on a safe menu entry: stays.
        rt.document().dispatch(Event::new(
            EventKind::PointerUp(PointerButton::Primary),
            safe.id(),
        ));
        assert!(el.has_class(CLASS_INTERACTING));

        // Primary release on a menu-trigger descendant: stays.
        let trigger = el.query_tag("menu-trigger")[0].clone();
        rt.document().dispatch(Event::new(
            EventKind::PointerUp(PointerButton::Primary),
            trigger.id(),
        ));
        assert!(el.has_class(CLASS_INTERACTING));

        // Modifier-only key release: stays.
        rt.document().dispatch(Event::new(
            EventKind::KeyUp(Key::Shift),
            rt.document().root().id(),
        ));
        assert!(el.has_class(CLASS_INTERACTING));
    }

    #[test]
    fn test_release_outside_exits_and_removes_both_listeners() {
        let rt = Runtime::new();
        let log = new_log();
        let (_inst, el) = interacting_fixture(&rt, &log);

        rt.document().dispatch(Event::new(
            EventKind::PointerDown(PointerButton::Secondary),
            el.id(),
        ));
        assert!(el.has_class(CLASS_INTERACTING));

        rt.document().dispatch(Event::new(
            EventKind::PointerUp(PointerButton::Primary),
            rt.document().root().id(),
        ));

        assert!(!el.has_class(CLASS_INTERACTING));
        assert_eq!(rt.document().document_listener_count(EventType::PointerUp), 0);
        assert_eq!(rt.document().document_listener_count(EventType::KeyUp), 0);
    }

    #[test]
    fn test_non_modifier_key_release_outside_exits() {
        let rt = Runtime::new();
        let log = new_log();
        let (_inst, el) = interacting_fixture(&rt, &log);

        rt.document().dispatch(Event::new(
            EventKind::PointerDown(PointerButton::Secondary),
            el.id(),
        ));
        rt.document().dispatch(Event::new(
            EventKind::KeyUp(Key::Escape),
            rt.document().root().id(),
        ));
        assert!(!el.has_class(CLASS_INTERACTING));
    }

    // ----- attribute watching -----

    #[test]
    fn test_watchers_are_torn_down_by_manual_render() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, None);

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);
        rt.document().settle();

        let hits = Rc::new(RefCell::new(0));
        let inst = rt.instance(el.id()).unwrap();
        let sink = hits.clone();
        inst.watch_attr("state", move |_, _| *sink.borrow_mut() += 1);

        el.set_attr("state", "busy");
        assert_eq!(*hits.borrow(), 1);

        inst.render(None);
        rt.document().settle();

        el.set_attr("state", "done");
        assert_eq!(*hits.borrow(), 1);
    }

    // ----- infinite scroll -----

    #[test]
    fn test_infinite_scroll_fires_near_the_bottom_and_dies_with_the_node() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, None);

        let root = rt.document().root();
        root.set_bounds(Rect::new(0.0, 0.0, 800.0, 600.0));

        let el = rt.document().create_element("widget");
        root.append(&el);
        el.set_bounds(Rect::new(0.0, 2000.0, 800.0, 100.0));

        let hits = Rc::new(RefCell::new(0));
        let inst = rt.instance(el.id()).unwrap();
        let sink = hits.clone();
        inst.support_infinite_scroll(move || *sink.borrow_mut() += 1, None, None);

        // Far away: no trigger.
        rt.document()
            .dispatch(Event::new(EventKind::Scroll, root.id()));
        assert_eq!(*hits.borrow(), 0);

        // Within the threshold of the container's bottom edge.
        el.set_bounds(Rect::new(0.0, 900.0, 800.0, 100.0));
        rt.document()
            .dispatch(Event::new(EventKind::Scroll, root.id()));
        assert_eq!(*hits.borrow(), 1);

        // Removal tears the listener down.
        el.remove();
        rt.document()
            .dispatch(Event::new(EventKind::Scroll, root.id()));
        assert_eq!(*hits.borrow(), 1);
    }

    // ----- drop area -----

    #[test]
    fn test_drop_area_toggles_class_and_delivers_files() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, None);

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);

        let dropped: Rc<RefCell<Vec<PathBuf>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = dropped.clone();
        let inst = rt.instance(el.id()).unwrap();
        inst.enable_drop_area(None, move |_, files| {
            sink.borrow_mut().extend(files.iter().cloned());
        });

        rt.document()
            .dispatch(Event::new(EventKind::DragEnter, el.id()));
        assert!(el.has_class(CLASS_DROP_HOVERING));
        rt.document()
            .dispatch(Event::new(EventKind::DragLeave, el.id()));
        assert!(!el.has_class(CLASS_DROP_HOVERING));

        rt.document().dispatch(Event::new(
            EventKind::Drop(reprise_dom::DropPayload {
                files: vec![PathBuf::from("/music/track.flac")],
            }),
            el.id(),
        ));
        assert!(!el.has_class(CLASS_DROP_HOVERING));
        assert_eq!(*dropped.borrow(), vec![PathBuf::from("/music/track.flac")]);
    }

    // ----- registration -----

    #[test]
    fn test_duplicate_registration_keeps_the_first_implementation() {
        let rt = Runtime::new();
        let log = new_log();
        register_recorder(&rt, "widget", &log, None);

        // Second registration under the same name is ignored with a warning.
        let other_log = new_log();
        register_with(&rt, "widget", &other_log, None, true, true);

        let el = rt.document().create_element("widget");
        rt.document().root().append(&el);
        rt.document().settle();

        assert!(!entries(&log).is_empty());
        assert!(entries(&other_log).is_empty());
    }

    #[test]
    fn test_unregistered_tags_are_ignored() {
        let rt = Runtime::new();
        let el = rt.document().create_element("plain");
        rt.document().root().append(&el);
        assert!(rt.instance(el.id()).is_none());
    }
}
