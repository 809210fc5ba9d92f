use super::{Trace, Tracer};
use crate::camera::{Camera, CameraInfo};
use crate::player::{Player, PlayerConfig};
use crate::scene::headless::{HeadlessScene, SceneStats};
use crate::scene::{NodeError, World};
use std::rc::Rc;

fn populated_world() -> (World, Rc<SceneStats>) {
    let scene = HeadlessScene::new();
    let stats = scene.stats();
    let mut world = World::new(Box::new(scene));

    let (scene, root) = world.parts_mut();
    let bus = root.create_child("bus");
    bus.create_child("wheel");
    bus.create_child("wheel");
    root.create_child("ball");

    let player = root.create_child("player");
    let camera = Camera::new(&CameraInfo::default(), scene, player.transform_mut()).unwrap();
    player.set_object(Box::new(Player::new(camera, PlayerConfig::default()).unwrap()));

    (world, stats)
}

#[test]
fn test_teardown_releases_each_transform_once() {
    let (world, stats) = populated_world();
    // root, bus, 2 wheels, ball, player and four camera frames
    assert_eq!(stats.created(), 10);
    assert_eq!(stats.live_transforms(), 10);

    drop(world);

    assert_eq!(stats.destroyed(), stats.created());
    assert_eq!(stats.live_transforms(), 0);

    let order = stats.destruction_order();
    let mut unique = order.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), order.len());
}

#[test]
fn test_teardown_children_before_parents() {
    let (world, stats) = populated_world();
    drop(world);

    let order = stats.destruction_order();
    let position = |id| order.iter().position(|released| *released == id);
    for (index, id) in order.iter().enumerate() {
        if let Some(parent) = stats.parent_of(*id) {
            let parent_index = position(parent).unwrap();
            assert!(
                parent_index > index,
                "transform {id} released after its parent {parent}"
            );
        }
    }
}

#[test]
fn test_dropping_object_releases_only_its_frames() {
    let trace = Trace::default();
    let (mut world, stats) = populated_world();
    world.root_node_mut().set_object(Tracer::boxed(&trace));

    let old = world.root_node_mut().set_object(Tracer::boxed(&trace));
    assert!(old.is_some());
    assert_eq!(stats.live_transforms(), 10);

    let bus = world.root_node_mut().child_mut("bus").unwrap();
    let wheels: Vec<String> = bus.child_names().map(str::to_string).collect();
    assert_eq!(wheels, vec!["wheel", "wheel0"]);

    // Replacing the player's object releases its camera frames only
    let player = world.root_node_mut().child_mut("player").unwrap();
    drop(player.take_object());
    assert_eq!(stats.live_transforms(), 6);
    assert_eq!(world.root_node().descendant_count(), 5);
}

#[test]
fn test_lookup_miss_is_recoverable() {
    let (world, stats) = populated_world();

    let error = world.root_node().find("bus/tyre").unwrap_err();
    assert!(matches!(
        error,
        NodeError::ChildNotFound { ref parent, ref name } if parent == "bus" && name == "tyre"
    ));
    assert_eq!(world.root_node().find("bus/wheel0").unwrap().name(), "wheel0");
    assert_eq!(stats.live_transforms(), 10);
}
