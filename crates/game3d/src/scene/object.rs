//! Node behavior capability

use super::NodeAccess;
use crate::events::Event;

/// Behavior attached to a [`Node`](super::Node)
///
/// A node carries at most one object. The object sees its node through a
/// [`NodeAccess`], which allows writes to the node's transform but not
/// changes to the tree's structure.
pub trait Object {
    /// React to an event while attached to `node`
    fn on_event(&mut self, node: &mut NodeAccess<'_>, event: &Event<'_>);
}
