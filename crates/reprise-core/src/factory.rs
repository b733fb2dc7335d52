use reprise_dom::Element;
use serde_json::Value;

use crate::Runtime;

/// Data-bag key the lifecycle reads pre-bound props from. The factory writes
/// the `props` binding here; the first load re-projects it into the live
/// store.
pub const BINDING_PROPS: &str = "props";

/// Blueprint for a detached element with pre-bound data.
///
/// Attributes hold values small enough to serialize; bindings carry
/// structured data straight onto the instance so the very first spawn
/// already sees it.
pub struct ElementSpec {
    pub name: String,
    pub attrs: Vec<(String, Value)>,
    pub bindings: Vec<(String, Value)>,
}

impl ElementSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            bindings: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn binding(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bindings.push((key.into(), value.into()));
        self
    }

    /// Shorthand for the `props` binding.
    pub fn props(self, value: impl Into<Value>) -> Self {
        self.binding(BINDING_PROPS, value)
    }
}

impl Runtime {
    /// Builds a detached node with attributes and bindings applied. When the
    /// node is later appended under a connected ancestor it goes through the
    /// normal lifecycle, with the bound data already in place.
    ///
    /// Non-string attribute values are serialized to their JSON rendering.
    pub fn create_element(&self, spec: ElementSpec) -> Element {
        let el = self.document().create_element(spec.name);

        for (name, value) in spec.attrs {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            el.set_attr(&name, &text);
        }

        for (key, value) in spec.bindings {
            el.set_data(key, value);
        }

        el
    }
}
