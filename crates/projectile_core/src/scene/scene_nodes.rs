//! Arena-backed scene for headless runs

use super::{NodeId, SceneService};
use crate::foundation::math::{Quat, Transform, Vec3};
use log::trace;
use slotmap::SlotMap;

/// A node with its model and accumulated effect time
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// World transform
    pub transform: Transform,
    /// Attached model path
    pub model: Option<String>,
    /// Effect animation time accumulated so far
    pub effect_time: f32,
}

/// Simple in-memory scene
///
/// Keeps node state so headless runs and tests can inspect what a renderer
/// would have drawn.
#[derive(Debug, Default)]
pub struct SceneNodes {
    nodes: SlotMap<NodeId, SceneNode>,
    created: usize,
    destroyed: usize,
}

impl SceneNodes {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a live node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node is alive
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes created since construction
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Nodes destroyed since construction
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }
}

impl SceneService for SceneNodes {
    fn create_node(&mut self, transform: Transform) -> NodeId {
        self.created += 1;
        self.nodes.insert(SceneNode {
            transform,
            ..SceneNode::default()
        })
    }

    fn attach_model(&mut self, node: NodeId, model: &str) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.model = Some(model.to_string());
        }
    }

    fn set_position(&mut self, node: NodeId, position: Vec3) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.transform.position = position;
        }
    }

    fn set_rotation(&mut self, node: NodeId, rotation: Quat) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.transform.rotation = rotation;
        }
    }

    fn advance_effect_time(&mut self, node: NodeId, dt: f32) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.effect_time += dt;
        }
    }

    fn destroy_node(&mut self, node: NodeId) {
        if self.nodes.remove(node).is_some() {
            self.destroyed += 1;
        } else {
            trace!("destroy_node on stale node {node:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destroy_is_counted_once() {
        let mut scene = SceneNodes::new();
        let node = scene.create_node(Transform::default());
        scene.destroy_node(node);
        scene.destroy_node(node);

        assert!(scene.is_empty());
        assert_eq!(scene.created_count(), 1);
        assert_eq!(scene.destroyed_count(), 1);
    }
}
