//! # game3d
//!
//! Logic core of a real-time 3D walkthrough, sitting between a native scene
//! engine and native input devices.
//!
//! ## Features
//!
//! - **Scene Tree**: Named, owned nodes carrying optional behavior objects
//! - **Ordered Dispatch**: Per-frame events reach each object before its children
//! - **Camera Rig**: Yaw, pitch and roll frames with pitch limiting
//! - **Player Controller**: Keyboard/mouse movement with speed ramping
//! - **Headless Backend**: In-memory engine for tools and tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use game3d::prelude::*;
//! use game3d::scene::headless::HeadlessScene;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let mut world = World::new(Box::new(HeadlessScene::new()));
//!
//!     let (scene, root) = world.parts_mut();
//!     let node = root.create_child("player");
//!     let camera = Camera::new(&config.camera, scene, node.transform_mut())?;
//!     node.set_object(Box::new(Player::new(camera, config.player.clone())?));
//!
//!     let mut driver = FrameDriver::new(&config.frame);
//!     let mut clock = config.frame.clock();
//!     driver.input_mut().handle_key_input(KeyCode::W, true);
//!     while driver.run_frame(&mut world, clock.tick()) == FrameOutcome::Continue {
//!         if clock.total_time() > 5.0 {
//!             driver.input_mut().handle_key_input(KeyCode::Escape, true);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_possible_truncation)]

pub mod camera;
pub mod config;
pub mod events;
pub mod foundation;
pub mod frame;
pub mod input;
pub mod player;
pub mod scene;

pub use camera::{Camera, CameraInfo};
pub use frame::{FrameDriver, FrameOutcome};
pub use player::Player;
pub use scene::{Node, NodeError, Object, World};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        camera::{Camera, CameraInfo},
        config::{ApplicationConfig, Config, ConfigError},
        events::{Event, EventKind, FrameTiming},
        foundation::{
            math::{Quat, Vec3},
            time::FrameClock,
            Angle, AngleVector,
        },
        frame::{FrameConfig, FrameDriver, FrameOutcome},
        input::{InputManager, InputSnapshot, KeyCode, MouseButton},
        player::{Player, PlayerConfig},
        scene::{Node, NodeAccess, NodeError, Object, SceneManager, SceneTransform, World},
    };
}
