//! Scene attachment of in-flight visuals
//!
//! Every projectile and bolt owns exactly one transform node with its model
//! attached. `VisualAttachment` ties the node's lifetime to its owner: the
//! node is destroyed when the attachment is dropped.

mod attachment;
mod scene_nodes;

pub use attachment::{SharedScene, VisualAttachment};
pub use scene_nodes::{SceneNode, SceneNodes};

use crate::foundation::math::{Quat, Transform, Vec3};

slotmap::new_key_type! {
    /// Handle to a transform node in the scene
    pub struct NodeId;
}

/// Scene graph operations used for in-flight visuals
pub trait SceneService {
    /// Create a positioned and oriented node under the root node
    fn create_node(&mut self, transform: Transform) -> NodeId;

    /// Attach a model's renderable representation to a node
    fn attach_model(&mut self, node: NodeId, model: &str);

    /// Move a node
    fn set_position(&mut self, node: NodeId, position: Vec3);

    /// Turn a node
    fn set_rotation(&mut self, node: NodeId, rotation: Quat);

    /// Advance time-driven effect animation on the node's model
    fn advance_effect_time(&mut self, node: NodeId, dt: f32);

    /// Destroy a node and everything attached to it
    fn destroy_node(&mut self, node: NodeId);
}
