//! # Host document model
//!
//! A retained node tree standing in for the platform a component runtime
//! runs against. The platform surface is deliberately small:
//!
//! - a tree of [`Node`]s behind a cloneable [`Document`] handle, with
//!   insertion/removal dispatch callbacks (the only lifecycle entry points
//!   the platform provides),
//! - a deferred task queue ([`Document::defer`] / [`Document::tick`]) — the
//!   next-turn scheduling primitive everything "one tick later" builds on,
//! - attribute-mutation and viewport-intersection observers,
//! - a bubbling input event bus with document-level listeners.
//!
//! Everything is single-threaded. Callbacks are always invoked with no
//! internal borrow held, so they may mutate the tree re-entrantly — an
//! insertion callback that appends children triggers nested dispatch for
//! those children before it returns.
//!
//! ```rust
//! use reprise_dom::Document;
//!
//! let doc = Document::new();
//! let card = doc.create_element("card");
//! doc.root().append(&card);
//! assert!(card.is_connected());
//!
//! let ran = std::rc::Rc::new(std::cell::Cell::new(false));
//! let flag = ran.clone();
//! doc.defer(move || flag.set(true));
//! assert!(!ran.get());
//! doc.tick();
//! assert!(ran.get());
//! ```

pub mod document;
pub mod element;
pub mod events;
pub mod geometry;
pub mod input;
pub mod node;
pub mod observers;

pub use document::*;
pub use element::*;
pub use events::{Event, EventKind, EventType, ListenerId};
pub use geometry::*;
pub use input::*;
pub use node::{Node, NodeId};
pub use observers::{AttrMutation, ObserverId};
