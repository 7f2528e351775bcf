// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node kinds: the open extension registry hosts populate, plus the
//! built-in kinds.

pub mod blend;
pub mod note;
pub mod source;

use crate::node::{NodeBehavior, NodeTemplate};
use indexmap::IndexMap;

/// Factory producing a fresh behavior instance for a kind.
pub type BehaviorFactory = fn() -> Box<dyn NodeBehavior>;

/// A registered node kind
pub struct NodeKind {
    /// Unique kind identifier
    pub id: String,
    /// Display name, used as the node title
    pub name: String,
    /// Number of in points
    pub inputs: usize,
    /// Number of out points
    pub outputs: usize,
    /// Fixed node width
    pub width: f32,
    /// Behavior factory
    pub build: BehaviorFactory,
}

/// Registry of available node kinds
#[derive(Default)]
pub struct NodeRegistry {
    kinds: IndexMap<String, NodeKind>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            kinds: IndexMap::new(),
        }
    }

    /// Register a kind
    pub fn register(&mut self, kind: NodeKind) {
        self.kinds.insert(kind.id.clone(), kind);
    }

    /// Get a kind by ID
    pub fn get(&self, id: &str) -> Option<&NodeKind> {
        self.kinds.get(id)
    }

    /// All registered kinds
    pub fn kinds(&self) -> impl Iterator<Item = &NodeKind> {
        self.kinds.values()
    }

    /// Build a node template for the kind with `id`.
    pub fn template(&self, id: &str) -> Option<NodeTemplate> {
        self.get(id).map(|kind| {
            NodeTemplate::new(kind.name.clone(), kind.inputs, kind.outputs, (kind.build)())
                .with_tag(kind.id.clone())
                .with_width(kind.width)
        })
    }
}

/// Registry preloaded with the built-in kinds.
pub fn builtin_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    registry.register(NodeKind {
        id: "source".to_string(),
        name: "Source".to_string(),
        inputs: 0,
        outputs: 1,
        width: 160.0,
        build: source::SourceBehavior::boxed,
    });

    registry.register(NodeKind {
        id: "blend".to_string(),
        name: "Blend".to_string(),
        inputs: 2,
        outputs: 1,
        width: 200.0,
        build: blend::BlendBehavior::boxed,
    });

    registry.register(NodeKind {
        id: "note".to_string(),
        name: "Note".to_string(),
        inputs: 1,
        outputs: 1,
        width: 220.0,
        build: note::NoteBehavior::boxed,
    });

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_contents() {
        let registry = builtin_registry();
        assert_eq!(registry.kinds().count(), 3);
        assert!(registry.get("source").is_some());
        assert!(registry.get("blend").is_some());
        assert!(registry.get("note").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_template_carries_kind_metadata() {
        let registry = builtin_registry();
        let template = registry.template("blend").unwrap();
        assert_eq!(template.title, "Blend");
        assert_eq!(template.tag, "blend");
        assert_eq!(template.inputs, 2);
        assert_eq!(template.outputs, 1);
        assert_eq!(template.width, 200.0);

        assert!(registry.template("missing").is_none());
    }
}
