//! World container

use super::{Node, SceneManager};
use crate::events::Event;
use log::{debug, info};

/// Owns the root node and the external scene manager
///
/// Single entry point for event broadcast. Dropping the world tears down the
/// whole node tree, children before parents, while the scene manager is still
/// alive.
pub struct World {
    // Declared first so the tree is dropped before the engine it points into
    root: Node,
    scene: Box<dyn SceneManager>,
}

impl World {
    /// Name of the root node
    pub const ROOT_NAME: &'static str = "root";

    /// Create a world with an empty root node under the engine's root
    pub fn new(mut scene: Box<dyn SceneManager>) -> Self {
        let root = Node::new(Self::ROOT_NAME, scene.create_root_child());
        info!("World created with root transform {}", root.transform().id());
        Self { root, scene }
    }

    /// Broadcast an event through the tree
    pub fn on_event(&mut self, event: &Event<'_>) {
        self.root.on_event(event);
    }

    /// Root node
    pub fn root_node(&self) -> &Node {
        &self.root
    }

    /// Mutable root node
    pub fn root_node_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// External scene manager
    pub fn scene(&self) -> &dyn SceneManager {
        self.scene.as_ref()
    }

    /// Mutable external scene manager
    pub fn scene_mut(&mut self) -> &mut dyn SceneManager {
        self.scene.as_mut()
    }

    /// Scene manager and root node together, for assembling the scene before
    /// the frame loop starts
    pub fn parts_mut(&mut self) -> (&mut dyn SceneManager, &mut Node) {
        (self.scene.as_mut(), &mut self.root)
    }
}

impl Drop for World {
    fn drop(&mut self) {
        debug!("Destroying world with {} nodes", self.root.descendant_count() + 1);
    }
}
