//! Walkthrough demo application
//!
//! Assembles a small scene on the headless backend, drives the player with a
//! scripted input sequence and logs the camera pose once per second.
//!
//! Usage: `walkthrough [config.toml|config.ron]`

mod props;
mod script;

use game3d::config::{ApplicationConfig, Config, ConfigError};
use game3d::foundation::logging;
use game3d::foundation::math::{Axis, Vec3};
use game3d::foundation::time::FrameClock;
use game3d::foundation::Angle;
use game3d::scene::headless::{HeadlessScene, SceneStats};
use game3d::scene::Renderable;
use game3d::{Camera, FrameDriver, FrameOutcome, NodeError, Player, World};
use log::{info, warn};
use props::{Animator, Drifter, Roller, Shared};
use script::InputScript;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Frames to run before giving up on the script reaching a quit key
const MAX_FRAMES: u64 = 10_000;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene assembly referenced a missing node
    #[error("Scene error: {0}")]
    Scene(#[from] NodeError),
}

fn load_config() -> Result<ApplicationConfig, AppError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(&path)?,
        None => ApplicationConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Build the demo scene, returning the shared player handle
fn populate(world: &mut World, config: &ApplicationConfig) -> Result<Rc<RefCell<Player>>, AppError> {
    let (scene, root) = world.parts_mut();

    for (name, position) in [("ball", Vec3::new(200.0, 25.0, 200.0)), ("ball", Vec3::new(200.0, 25.0, 250.0))] {
        let ball = root.create_child(name);
        let transform = ball.transform_mut();
        transform.attach_renderable(Renderable::mesh("sphere").with_material("concrete_floor"));
        transform.set_position(position);
        transform.set_scale(Vec3::new(0.5, 0.5, 0.5));
        ball.set_object(Box::new(Roller::new(Axis::X, 90.0)));
    }

    let thing = root.create_child("thing");
    thing.transform_mut().attach_renderable(Renderable::mesh("Character.mesh"));
    thing.transform_mut().set_scale(Vec3::new(10.0, 10.0, 10.0));
    thing.transform_mut().set_position(Vec3::new(0.0, 50.0, -500.0));
    thing.set_object(Box::new(Animator::new(scene.create_animation("my_animation"))));

    let bus = root.create_child("bus");
    bus.transform_mut().set_scale(Vec3::new(40.0, 40.0, 40.0));
    bus.transform_mut().set_position(Vec3::new(0.0, 0.0, 500.0));
    bus.set_object(Box::new(Drifter::new(Vec3::new(25.0, 0.0, 0.0), 150.0)));
    let body = bus.create_child("body").transform_mut();
    body.attach_renderable(Renderable::mesh("bus.mesh").with_material("bus_paint"));
    body.rotate(Axis::Z, Angle::from_degrees(79.6));
    body.set_position(Vec3::new(0.0, 2.15, 0.0));

    let player_node = root.create_child("player");
    let camera = Camera::new(&config.camera, scene, player_node.transform_mut())?;
    let player = Rc::new(RefCell::new(Player::new(camera, config.player.clone())?));
    player_node.set_object(Box::new(Shared(Rc::clone(&player))));

    // Cross-reference check: the bus body must be reachable by path
    let body = root.find("bus/body")?;
    info!(
        "Scene assembled: {} nodes, bus body at transform {}",
        root.descendant_count() + 1,
        body.transform().id()
    );
    Ok(player)
}

fn run(config: &ApplicationConfig, world: &mut World, player: &RefCell<Player>) {
    let step = config
        .frame
        .fixed_timestep
        .unwrap_or(1.0 / config.frame.max_fps as f32);
    let mut clock = FrameClock::fixed(step);
    let mut driver = FrameDriver::new(&config.frame);
    let mut script = InputScript::walkthrough();
    let mut next_report = 0.0_f32;

    loop {
        let timing = clock.tick();
        script.apply_until(timing.total_seconds, driver.input_mut());

        if driver.run_frame(world, timing) == FrameOutcome::Quit {
            break;
        }

        if timing.total_seconds >= next_report {
            let player = player.borrow();
            info!(
                "t={:.1}s position {:?} rotation {} speed {:.2}",
                timing.total_seconds,
                player.camera().position(),
                player.camera().rotation(),
                player.current_speed()
            );
            next_report += 1.0;
        }

        if clock.frame_count() >= MAX_FRAMES {
            warn!("No quit key after {MAX_FRAMES} frames (script finished: {})", script.is_finished());
            break;
        }
    }

    info!(
        "Walkthrough finished after {} rendered frames ({:.1} simulated fps)",
        driver.frame_count(),
        clock.average_fps()
    );
}

fn main() -> Result<(), AppError> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);
    info!("Starting walkthrough demo");

    let scene = HeadlessScene::new().with_clip("my_animation", 2.0);
    let stats: Rc<SceneStats> = scene.stats();
    let mut world = World::new(Box::new(scene));

    let player = populate(&mut world, &config)?;
    run(&config, &mut world, &player);

    drop(player);
    drop(world);
    info!(
        "Released {} of {} transforms",
        stats.destroyed(),
        stats.created()
    );
    Ok(())
}
