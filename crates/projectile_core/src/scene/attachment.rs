//! Scoped ownership of a scene node

use super::{NodeId, SceneService};
use crate::foundation::math::{Quat, Transform, Vec3};
use log::warn;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Scene service shared between the tracker and its attachments
pub type SharedScene = Rc<RefCell<dyn SceneService>>;

/// Exclusively owned node with an attached model, destroyed on drop
pub struct VisualAttachment {
    node: NodeId,
    scene: SharedScene,
}

impl VisualAttachment {
    /// Create a node at `transform` and attach `model` to it
    pub fn spawn(scene: &SharedScene, transform: Transform, model: &str) -> Self {
        let node = {
            let mut service = scene.borrow_mut();
            let node = service.create_node(transform);
            service.attach_model(node, model);
            node
        };

        Self {
            node,
            scene: Rc::clone(scene),
        }
    }

    /// Node owned by this attachment
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Move the node
    pub fn set_position(&self, position: Vec3) {
        self.scene.borrow_mut().set_position(self.node, position);
    }

    /// Move and turn the node
    pub fn set_pose(&self, position: Vec3, rotation: Quat) {
        let mut scene = self.scene.borrow_mut();
        scene.set_rotation(self.node, rotation);
        scene.set_position(self.node, position);
    }

    /// Advance effect animation on the attached model
    pub fn advance_effects(&self, dt: f32) {
        self.scene.borrow_mut().advance_effect_time(self.node, dt);
    }
}

impl Drop for VisualAttachment {
    fn drop(&mut self) {
        match self.scene.try_borrow_mut() {
            Ok(mut scene) => scene.destroy_node(self.node),
            Err(_) => warn!("Scene busy while releasing node {:?}; node leaked", self.node),
        }
    }
}

impl fmt::Debug for VisualAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisualAttachment")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneNodes;

    #[test]
    fn test_drop_destroys_node() {
        let nodes = Rc::new(RefCell::new(SceneNodes::new()));
        let scene: SharedScene = nodes.clone();

        let attachment = VisualAttachment::spawn(&scene, Transform::default(), "w/w_arrow01.nif");
        let node = attachment.node();
        assert_eq!(
            nodes.borrow().node(node).and_then(|n| n.model.as_deref()),
            Some("w/w_arrow01.nif")
        );

        drop(attachment);
        assert!(nodes.borrow().node(node).is_none());
        assert_eq!(nodes.borrow().destroyed_count(), 1);
    }

    #[test]
    fn test_pose_updates_reach_the_node() {
        let nodes = Rc::new(RefCell::new(SceneNodes::new()));
        let scene: SharedScene = nodes.clone();

        let attachment = VisualAttachment::spawn(&scene, Transform::default(), "bolt.nif");
        attachment.set_position(Vec3::new(1.0, 2.0, 3.0));
        attachment.advance_effects(0.25);
        attachment.advance_effects(0.25);

        let nodes = nodes.borrow();
        let node = nodes.node(attachment.node()).unwrap();
        assert_eq!(node.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert!((node.effect_time - 0.5).abs() < f32::EPSILON);
    }
}
