//! Scene tree nodes
//!
//! A [`Node`] exclusively owns its children and its object. Child names are
//! unique within a parent: inserting a taken name appends the lowest free
//! numeric suffix (`x`, `x0`, `x1`, ...) instead of replacing anything.

use super::{Object, SceneTransform};
use crate::events::Event;
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Node lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// No child with the requested name
    #[error("node '{parent}' has no child named '{name}'")]
    ChildNotFound {
        /// Name of the node that was searched
        parent: String,
        /// Requested child name
        name: String,
    },

    /// Malformed descendant path
    #[error("invalid node path: '{0}'")]
    InvalidPath(String),
}

/// Element of the scene tree
pub struct Node {
    name: String,
    object: Option<Box<dyn Object>>,
    transform: Box<dyn SceneTransform>,
    children: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Node {
    /// Wrap an engine transform in a node with no object and no children
    pub fn new(name: impl Into<String>, transform: Box<dyn SceneTransform>) -> Self {
        Self {
            name: name.into(),
            object: None,
            transform,
            children: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builder pattern: attach an object
    pub fn with_object(mut self, object: Box<dyn Object>) -> Self {
        self.object = Some(object);
        self
    }

    /// Name under which the parent holds this node
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Engine transform wrapped by this node
    pub fn transform(&self) -> &dyn SceneTransform {
        self.transform.as_ref()
    }

    /// Mutable engine transform wrapped by this node
    pub fn transform_mut(&mut self) -> &mut dyn SceneTransform {
        self.transform.as_mut()
    }

    /// Create a child transform through the engine and insert a node for it.
    ///
    /// A taken `name` is resolved to a unique one; read it back with
    /// [`Node::name`] on the returned child.
    pub fn create_child(&mut self, name: &str) -> &mut Self {
        let transform = self.transform.create_child();
        self.add_child(name, Self::new(name, transform))
    }

    /// Insert an already-built node under a unique name derived from `name`.
    ///
    /// Engine-side parenting of the node's transform is the caller's concern.
    pub fn add_child(&mut self, name: &str, mut node: Self) -> &mut Self {
        let resolved = self.resolve_child_name(name);
        if resolved != name {
            debug!("Node '{}': child name '{}' taken, using '{}'", self.name, name, resolved);
        }

        node.name.clone_from(&resolved);
        let slot = self.children.len();
        self.children.push(node);
        self.index.insert(resolved, slot);
        &mut self.children[slot]
    }

    fn resolve_child_name(&self, name: &str) -> String {
        if !self.index.contains_key(name) {
            return name.to_string();
        }

        let mut suffix = 0_usize;
        loop {
            let candidate = format!("{name}{suffix}");
            if !self.index.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Child by exact name
    pub fn child(&self, name: &str) -> Result<&Self, NodeError> {
        match self.index.get(name) {
            Some(&slot) => Ok(&self.children[slot]),
            None => Err(self.not_found(name)),
        }
    }

    /// Mutable child by exact name
    pub fn child_mut(&mut self, name: &str) -> Result<&mut Self, NodeError> {
        match self.index.get(name) {
            Some(&slot) => Ok(&mut self.children[slot]),
            None => Err(self.not_found(name)),
        }
    }

    fn not_found(&self, name: &str) -> NodeError {
        NodeError::ChildNotFound {
            parent: self.name.clone(),
            name: name.to_string(),
        }
    }

    /// Descendant by `/`-separated path, e.g. `"bus/body"`
    pub fn find(&self, path: &str) -> Result<&Self, NodeError> {
        let mut node = self;
        for segment in Self::path_segments(path)? {
            node = node.child(segment)?;
        }
        Ok(node)
    }

    /// Mutable descendant by `/`-separated path
    pub fn find_mut(&mut self, path: &str) -> Result<&mut Self, NodeError> {
        let mut node = self;
        for segment in Self::path_segments(path)? {
            node = node.child_mut(segment)?;
        }
        Ok(node)
    }

    fn path_segments(path: &str) -> Result<Vec<&str>, NodeError> {
        let segments: Vec<&str> = path.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(NodeError::InvalidPath(path.to_string()));
        }
        Ok(segments)
    }

    /// Children in insertion order
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }

    /// Child names in insertion order
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|child| child.name.as_str())
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Replace the node's object, returning the previous one
    pub fn set_object(&mut self, object: Box<dyn Object>) -> Option<Box<dyn Object>> {
        self.object.replace(object)
    }

    /// Detach and return the node's object
    pub fn take_object(&mut self) -> Option<Box<dyn Object>> {
        self.object.take()
    }

    /// The node's object, if any
    pub fn object(&self) -> Option<&dyn Object> {
        self.object.as_deref()
    }

    /// Whether an object is attached
    pub fn has_object(&self) -> bool {
        self.object.is_some()
    }

    /// Restricted view of this node, as an object sees it during dispatch
    pub fn access(&mut self) -> NodeAccess<'_> {
        NodeAccess {
            name: &self.name,
            transform: self.transform.as_mut(),
            children: &self.children,
        }
    }

    /// Dispatch `event` to this node's object, then to every child subtree in
    /// insertion order.
    pub fn on_event(&mut self, event: &Event<'_>) {
        trace!("Dispatching {:?} to node '{}'", event.kind(), self.name);

        if let Some(object) = self.object.as_mut() {
            let mut access = NodeAccess {
                name: &self.name,
                transform: self.transform.as_mut(),
                children: &self.children,
            };
            object.on_event(&mut access, event);
        }

        for child in &mut self.children {
            child.on_event(event);
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Children release their transforms before the parent does
        self.children.clear();
        trace!("Node '{}' released transform {}", self.name, self.transform.id());
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("transform", &self.transform.id())
            .field("has_object", &self.object.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// A node as seen by its object during dispatch
///
/// The transform is writable; the children are read-only, so the tree's
/// structure cannot change while an event is in flight:
///
/// ```compile_fail
/// use game3d::events::Event;
/// use game3d::scene::{NodeAccess, Object};
///
/// struct Spawner;
///
/// impl Object for Spawner {
///     fn on_event(&mut self, node: &mut NodeAccess<'_>, _event: &Event<'_>) {
///         if let Ok(wheel) = node.child("wheel") {
///             wheel.create_child("spare");
///         }
///     }
/// }
/// ```
pub struct NodeAccess<'a> {
    name: &'a str,
    transform: &'a mut dyn SceneTransform,
    children: &'a [Node],
}

impl NodeAccess<'_> {
    /// Node name
    pub fn name(&self) -> &str {
        self.name
    }

    /// Node transform
    pub fn transform(&self) -> &dyn SceneTransform {
        &*self.transform
    }

    /// Mutable node transform
    pub fn transform_mut(&mut self) -> &mut dyn SceneTransform {
        &mut *self.transform
    }

    /// Child by exact name
    pub fn child(&self, name: &str) -> Result<&Node, NodeError> {
        self.children
            .iter()
            .find(|child| child.name == name)
            .ok_or_else(|| NodeError::ChildNotFound {
                parent: self.name.to_string(),
                name: name.to_string(),
            })
    }

    /// Child names in insertion order
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|child| child.name.as_str())
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::headless::HeadlessScene;
    use crate::scene::SceneManager;

    fn root(scene: &mut HeadlessScene) -> Node {
        Node::new("root", scene.create_root_child())
    }

    #[test]
    fn test_duplicate_names_get_numeric_suffixes() {
        let mut scene = HeadlessScene::new();
        let mut node = root(&mut scene);

        let first = node.create_child("x").name().to_string();
        let second = node.create_child("x").name().to_string();
        let third = node.create_child("x").name().to_string();

        assert_eq!((first.as_str(), second.as_str(), third.as_str()), ("x", "x0", "x1"));
        assert_eq!(node.child_names().collect::<Vec<_>>(), vec!["x", "x0", "x1"]);
        for name in ["x", "x0", "x1"] {
            assert_eq!(node.child(name).unwrap().name(), name);
        }

        let ids: Vec<_> = node.children().map(|child| child.transform().id()).collect();
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }

    #[test]
    fn test_suffix_skips_names_already_taken() {
        let mut scene = HeadlessScene::new();
        let mut node = root(&mut scene);

        node.create_child("x0");
        node.create_child("x");
        let resolved = node.create_child("x").name().to_string();

        assert_eq!(resolved, "x1");
        assert_eq!(node.child_count(), 3);
    }

    #[test]
    fn test_missing_child_is_recoverable() {
        let mut scene = HeadlessScene::new();
        let mut node = root(&mut scene);
        node.create_child("a");

        let err = node.child("b").unwrap_err();
        assert_eq!(
            err,
            NodeError::ChildNotFound {
                parent: "root".to_string(),
                name: "b".to_string()
            }
        );

        // The failed lookup leaves the tree as it was
        assert_eq!(node.child_names().collect::<Vec<_>>(), vec!["a"]);
        assert!(node.child_mut("b").is_err());
        assert_eq!(node.create_child("b").name(), "b");
    }

    #[test]
    fn test_find_by_path() {
        let mut scene = HeadlessScene::new();
        let mut node = root(&mut scene);
        node.create_child("bus").create_child("body").create_child("wheel");

        assert_eq!(node.find("bus/body/wheel").unwrap().name(), "wheel");
        assert_eq!(node.descendant_count(), 3);
        assert!(matches!(node.find("bus//body"), Err(NodeError::InvalidPath(_))));
        assert!(matches!(node.find(""), Err(NodeError::InvalidPath(_))));
        assert!(matches!(node.find("bus/engine"), Err(NodeError::ChildNotFound { .. })));

        node.find_mut("bus/body").unwrap().create_child("door");
        assert_eq!(node.find("bus/body").unwrap().child_count(), 2);
    }

    #[test]
    fn test_add_child_renames_incoming_node() {
        let mut scene = HeadlessScene::new();
        let mut node = root(&mut scene);
        node.create_child("prop");

        let detached = Node::new("ignored", scene.create_root_child());
        let attached = node.add_child("prop", detached);
        assert_eq!(attached.name(), "prop0");
    }

    #[test]
    fn test_child_transforms_are_created_under_parent() {
        let mut scene = HeadlessScene::new();
        let stats = scene.stats();
        let mut node = root(&mut scene);
        let before = stats.live_transforms();

        node.create_child("a").create_child("b");
        assert_eq!(stats.live_transforms(), before + 2);
    }
}
