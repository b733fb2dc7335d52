//! Drives the lifecycle end to end: an album grid that builds its cards
//! through a render queue, one lazy card that waits for visibility, and
//! props projection into marked slots.
//!
//! Run with `RUST_LOG=debug cargo run -p showcase` to watch the passes.

use anyhow::Result;
use reprise_core::{Component, ElementSpec, Instance, Runtime};
use reprise_dom::{Element, Rect};
use serde_json::json;

struct AlbumGrid;

impl Component for AlbumGrid {
    fn on_build(&mut self, inst: &Instance, _opts: Option<&serde_json::Value>) -> bool {
        let rt = inst.runtime();
        let mut cards = Vec::new();
        for (idx, title) in ["Overture", "Interlude", "Reprise"].iter().enumerate() {
            let card = rt.create_element(
                ElementSpec::new("album-card")
                    .attr("render-queue", "cards")
                    .props(json!({ "title": *title, "position": idx + 1 })),
            );
            cards.push(card);
        }

        // The last card also waits for visibility before joining the queue.
        let lazy = rt.create_element(
            ElementSpec::new("album-card")
                .attr("render-queue", "cards")
                .attr("lazy-render", "")
                .props(json!({ "title": "Hidden Track", "position": 99 })),
        );
        lazy.set_bounds(Rect::new(0.0, 2400.0, 320.0, 96.0));
        cards.push(lazy);

        inst.element().replace_children(&cards);
        true
    }

    fn on_load(&mut self, inst: &Instance, _opts: Option<&serde_json::Value>) {
        log::info!("grid loaded with {} cards", inst.element().children().len());
    }
}

#[derive(Default)]
struct AlbumCard;

impl Component for AlbumCard {
    fn on_build(&mut self, inst: &Instance, _opts: Option<&serde_json::Value>) -> bool {
        let doc = inst.element().document().clone();
        let title = doc.create_element("heading");
        title.set_attr("data-prop", "title");
        let position = doc.create_element("caption");
        position.set_attr("data-prop", "position");
        inst.element().replace_children(&[title, position]);
        true
    }
}

fn dump(el: &Element, depth: usize) {
    let text = el.text();
    let text = if text.is_empty() {
        String::new()
    } else {
        format!(" — {text}")
    };
    println!("{}<{}>{}", "  ".repeat(depth), el.tag(), text);
    for child in el.children() {
        dump(&child, depth + 1);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let rt = Runtime::new();
    rt.register("album-grid", || Box::new(AlbumGrid));
    rt.register("album-card", || Box::<AlbumCard>::default());

    let doc = rt.document().clone();
    doc.set_viewport(Rect::new(0.0, 0.0, 1280.0, 800.0));

    let grid = doc.create_element("album-grid");
    doc.root().append(&grid);

    // Drain the queued card builds and their load ticks.
    doc.settle();
    println!("after the render queue drained:");
    dump(&grid, 0);

    // Scroll the hidden card into view; it joins the queue and renders.
    for card in grid.children() {
        card.set_bounds(Rect::new(0.0, 100.0, 320.0, 96.0));
    }
    doc.report_viewport_intersections();
    doc.settle();

    println!("\nafter the lazy card became visible:");
    dump(&grid, 0);

    // One-way projection: writes flow into the marked slots immediately.
    if let Some(card) = grid.first_child() {
        if let Some(inst) = rt.instance(card.id()) {
            inst.props().set("title", json!("Overture (Remastered)"));
        }
    }

    println!("\nafter a props write:");
    dump(&grid, 0);
    Ok(())
}
