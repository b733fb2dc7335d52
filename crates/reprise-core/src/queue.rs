use std::collections::{HashMap, VecDeque};

use reprise_dom::NodeId;

use crate::error::{Error, Result};
use crate::{Instance, Runtime};

/// Opt-in attribute; its value names the queue, empty means `default`.
pub const ATTR_RENDER_QUEUE: &str = "render-queue";

/// Marker class carried while an instance waits in a queue.
pub const CLASS_IN_RENDER_QUEUE: &str = "in-render-queue";

pub(crate) const DEFAULT_QUEUE: &str = "default";

#[derive(Default)]
pub(crate) struct QueueState {
    pending: VecDeque<NodeId>,
    running: bool,
}

/// The render-queue registry: queue name → pending instances + the drain
/// mutex. Owned by the runtime; queues are created lazily on first use and
/// live for the life of the document.
#[derive(Default)]
pub(crate) struct RenderQueues {
    queues: HashMap<String, QueueState>,
}

impl Runtime {
    pub fn is_using_render_queue(&self, node: NodeId) -> bool {
        self.0.doc.has_attr(node, ATTR_RENDER_QUEUE)
    }

    fn queue_name(&self, node: NodeId) -> String {
        match self.0.doc.attr(node, ATTR_RENDER_QUEUE) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_QUEUE.to_owned(),
        }
    }

    /// Creates an empty queue. Creating a name twice is a misuse fault.
    pub fn create_render_queue(&self, name: &str) -> Result<()> {
        let mut q = self.0.queues.borrow_mut();
        if q.queues.contains_key(name) {
            return Err(Error::QueueExists(name.to_owned()));
        }
        log::debug!("creating render queue `{name}`");
        q.queues.insert(name.to_owned(), QueueState::default());
        Ok(())
    }

    /// Appends the instance to its named queue (creating the queue on first
    /// use), marks it visually as queued, and requests a drain on the next
    /// tick.
    pub fn add_to_render_queue(&self, node: NodeId) {
        let name = self.queue_name(node);

        {
            let mut q = self.0.queues.borrow_mut();
            if !q.queues.contains_key(&name) {
                log::debug!("creating render queue `{name}`");
                q.queues.insert(name.clone(), QueueState::default());
            }
            // Appends are the only mutation outside the drain itself.
            if let Some(state) = q.queues.get_mut(&name) {
                state.pending.push_back(node);
            }
        }

        self.0.doc.element(node).add_class(CLASS_IN_RENDER_QUEUE);

        let rt = self.clone();
        self.0.doc.defer(move || {
            // The queue exists: created above, and queues are never dropped.
            let _ = rt.run_render_queue(&name);
        });
    }

    /// Starts draining a queue unless a drain is already active for that
    /// name. Safe to request repeatedly. Unknown names are a misuse fault.
    pub fn run_render_queue(&self, name: &str) -> Result<()> {
        {
            let mut q = self.0.queues.borrow_mut();
            let state = q
                .queues
                .get_mut(name)
                .ok_or_else(|| Error::UnknownQueue(name.to_owned()))?;
            if state.running {
                log::debug!("render queue `{name}` is already draining");
                return Ok(());
            }
            // The running flag is the mutex: only the drain that set it may
            // clear it.
            state.running = true;
        }

        self.queue_step(name.to_owned());
        Ok(())
    }

    /// One drain step: render the head to completion (through its load
    /// tick), pop it, continue. Strictly FIFO, one instance in flight.
    fn queue_step(&self, name: String) {
        let head = {
            let q = self.0.queues.borrow();
            q.queues
                .get(&name)
                .and_then(|state| state.pending.front().copied())
        };

        let Some(node) = head else {
            let mut q = self.0.queues.borrow_mut();
            if let Some(state) = q.queues.get_mut(&name) {
                state.running = false;
            }
            log::debug!("render queue `{name}` drained");
            return;
        };

        self.0
            .doc
            .element(node)
            .remove_class(CLASS_IN_RENDER_QUEUE);

        let rt = self.clone();
        self.finish_render(
            node,
            Some(Box::new(move || {
                {
                    let mut q = rt.0.queues.borrow_mut();
                    if let Some(state) = q.queues.get_mut(&name) {
                        state.pending.pop_front();
                    }
                }
                log::debug!("render queue `{name}` rendered an instance");
                rt.queue_step(name);
            })),
        );
    }

    pub fn queue_len(&self, name: &str) -> usize {
        self.0
            .queues
            .borrow()
            .queues
            .get(name)
            .map_or(0, |state| state.pending.len())
    }
}

impl Instance {
    pub fn add_to_render_queue(&self) {
        self.rt.add_to_render_queue(self.el.id())
    }

    pub fn is_using_render_queue(&self) -> bool {
        self.rt.is_using_render_queue(self.el.id())
    }
}
