//! # Component lifecycle runtime
//!
//! Reprise gives retained components a disciplined, cache-aware rendering
//! lifecycle on top of a host that only provides insertion and removal
//! dispatch. Rendering is broken into three steps:
//!
//! 1. **spawn** — always runs, on every insertion and every `render()`.
//!    Re-establishes transient state; cheap, repeatable, never injects
//!    content.
//! 2. **build** — constructs the content. Expensive work happens here, and
//!    its output is what a host application can serialize and reinject
//!    later. Whether it runs is decided by the build-skip policy
//!    ([`Component::should_build`]): by default an instance with existing
//!    child content is warm and skips the step entirely.
//! 3. **load** — runs one tick after build, once the injected content is in
//!    the tree and descendant instances have started their own passes.
//!
//! ## Usage
//!
//! ```rust
//! use reprise_core::{Component, Instance, Runtime};
//!
//! #[derive(Default)]
//! struct SongList;
//!
//! impl Component for SongList {
//!     fn on_build(&mut self, inst: &Instance, _opts: Option<&serde_json::Value>) -> bool {
//!         let doc = inst.element().document();
//!         let title = doc.create_element("heading");
//!         title.set_attr("data-prop", "title");
//!         inst.element().replace_children(&[title]);
//!         true
//!     }
//! }
//!
//! let rt = Runtime::new();
//! rt.register("song-list", || Box::<SongList>::default());
//!
//! let list = rt.document().create_element("song-list");
//! rt.document().root().append(&list);   // insertion starts the lifecycle
//! rt.document().settle();               // run the deferred load tick
//!
//! let inst = rt.instance(list.id()).unwrap();
//! inst.props().set("title", "Favorites".into());
//! assert_eq!(list.query_attr("data-prop")[0].text(), "Favorites");
//! ```
//!
//! ## Scheduling
//!
//! Many instances inserted at once can coordinate instead of stampeding:
//!
//! - a named **render queue** (`render-queue` attribute) serializes build
//!   work strictly FIFO, one instance in flight per queue name;
//! - **lazy render** (`lazy-render` attribute or pre-insertion binding)
//!   defers build/load until the instance first intersects the viewport.
//!
//! The two compose: a lazy instance that also names a queue joins the queue
//! when it becomes visible.
//!
//! Everything runs on one thread. The only "later" is the document's
//! deferred task queue; the load step is always scheduled there, never run
//! inline with build.

pub mod component;
pub mod drop_area;
pub mod error;
pub mod factory;
pub mod flags;
pub mod interact;
pub mod lazy;
pub mod lifecycle;
pub mod queue;
pub mod registry;
pub mod relay;
pub mod runtime;
pub mod scroll;
pub mod tests;
pub mod watcher;

pub use component::{Component, RenderOpts};
pub use drop_area::CLASS_DROP_HOVERING;
pub use error::{Error, Result};
pub use factory::{ElementSpec, BINDING_PROPS};
pub use flags::LifecycleFlags;
pub use interact::{
    InteractOptions, AUX_MENU_TAG, CLASS_INTERACTING, MENU_TRIGGER_TAG, SAFE_MENU_ITEM_CLASS,
};
pub use lazy::{ATTR_LAZY_RENDER, BINDING_LAZY_RENDER};
pub use lifecycle::ATTR_LOCKED;
pub use queue::{ATTR_RENDER_QUEUE, CLASS_IN_RENDER_QUEUE};
pub use relay::{PropsStore, PROP_MARKER_ATTR};
pub use runtime::{Instance, Runtime};
pub use scroll::DEFAULT_SCROLL_THRESHOLD;
