//! Headless stand-in for the widget's shadow root.
//!
//! Content is replaced wholesale on every render. Each replacement starts
//! a new generation; listeners and node handles from older generations are
//! dead and never fire.

use std::collections::BTreeMap;

use crate::Action;

/// Handle to an element in one particular generation of the content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    generation: u64,
    id: String,
}

impl NodeRef {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct ShadowRoot {
    content: String,
    generation: u64,
    listeners: BTreeMap<String, Action>,
}

impl ShadowRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in new markup; all existing listeners are dropped
    pub fn replace_children(&mut self, markup: String) -> u64 {
        self.generation += 1;
        self.content = markup;
        self.listeners.clear();
        self.generation
    }

    /// Attach a click listener to element `id`, only if `generation` is
    /// still the live one and the element exists in it
    pub fn add_listener(&mut self, generation: u64, id: &str, action: Action) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Skipping listener for #{}: generation {} replaced by {}",
                id,
                generation,
                self.generation
            );
            return false;
        }
        if !self.contains_id(id) {
            tracing::warn!("No element #{} in rendered content", id);
            return false;
        }
        self.listeners.insert(id.to_string(), action);
        true
    }

    pub fn query(&self, id: &str) -> Option<NodeRef> {
        self.contains_id(id).then(|| NodeRef {
            generation: self.generation,
            id: id.to_string(),
        })
    }

    /// Listener bound to `node`, if the node is still attached
    pub fn listener(&self, node: &NodeRef) -> Option<Action> {
        if node.generation != self.generation {
            return None;
        }
        self.listeners.get(&node.id).copied()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn contains_id(&self, id: &str) -> bool {
        self.content.contains(&format!("id=\"{id}\""))
    }
}
