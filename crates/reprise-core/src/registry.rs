use std::collections::HashMap;
use std::rc::Rc;

use crate::Component;

pub(crate) type Constructor = Rc<dyn Fn() -> Box<dyn Component>>;

/// Tag name → component constructor. One per runtime; there is no ambient
/// global registry.
#[derive(Default)]
pub(crate) struct ComponentRegistry {
    ctors: HashMap<String, Constructor>,
}

impl ComponentRegistry {
    /// Registers a component type. A duplicate name is warned about and
    /// ignored — the first registration wins.
    pub(crate) fn register(&mut self, name: &str, ctor: Constructor) {
        if self.ctors.contains_key(name) {
            log::warn!("component `{name}` is already registered");
            return;
        }
        self.ctors.insert(name.to_owned(), ctor);
    }

    pub(crate) fn lookup(&self, tag: &str) -> Option<Constructor> {
        self.ctors.get(tag).cloned()
    }

    pub(crate) fn is_registered(&self, tag: &str) -> bool {
        self.ctors.contains_key(tag)
    }
}
