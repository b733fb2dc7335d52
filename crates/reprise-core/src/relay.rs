use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value};

/// Attribute that marks a descendant as a projection target for a props key.
pub const PROP_MARKER_ATTR: &str = "data-prop";

type Subscriber = Rc<dyn Fn(&str, &Value)>;

struct PropsInner {
    values: Map<String, Value>,
    subs: Vec<Subscriber>,
}

/// Observable key/value store owned by one instance.
///
/// Every write notifies the subscribers synchronously; the lifecycle
/// controller installs a subscriber that projects the value as text into
/// every descendant marked `data-prop="<key>"`. Projection is one-way —
/// there is no reverse binding from the tree back into the store.
#[derive(Clone)]
pub struct PropsStore(Rc<RefCell<PropsInner>>);

impl Default for PropsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PropsStore {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(PropsInner {
            values: Map::new(),
            subs: Vec::new(),
        })))
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().values.get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let subs: Vec<Subscriber> = {
            let mut inner = self.0.borrow_mut();
            inner.values.insert(key.clone(), value.clone());
            inner.subs.clone()
        };
        for sub in subs {
            sub(&key, &value);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&str, &Value) + 'static) {
        self.0.borrow_mut().subs.push(Rc::new(f));
    }

    pub fn snapshot(&self) -> Map<String, Value> {
        self.0.borrow().values.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().values.len()
    }
}

/// How a props value reads when projected as text. Strings project verbatim;
/// anything else projects as its JSON rendering.
pub(crate) fn projection_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
