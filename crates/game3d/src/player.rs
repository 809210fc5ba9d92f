//! Player controller
//!
//! An [`Object`] that turns keyboard and mouse state into camera motion. Speed
//! ramps up while a movement key is held and coasts down on the last
//! direction once all keys are released. Pitch is limited so the view never
//! flips past vertical.

use crate::camera::Camera;
use crate::config::ConfigError;
use crate::events::{Event, EventKind};
use crate::foundation::math::Vec3;
use crate::foundation::{Angle, AngleVector, Float};
use crate::input::{InputSnapshot, KeyCode};
use crate::scene::{NodeAccess, Object};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Movement key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Move forward
    pub forward: KeyCode,
    /// Move backward
    pub back: KeyCode,
    /// Strafe left
    pub strafe_left: KeyCode,
    /// Strafe right
    pub strafe_right: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::W,
            back: KeyCode::S,
            strafe_left: KeyCode::A,
            strafe_right: KeyCode::D,
        }
    }
}

/// Player controller tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Forward speed at full ramp, in units per second
    pub move_speed: f32,
    /// Backward speed as a fraction of forward speed
    pub back_speed_factor: f32,
    /// Strafe speed as a fraction of forward speed
    pub strafe_speed_factor: f32,
    /// Degrees of rotation per unit of mouse motion
    pub mouse_sensitivity: f64,
    /// Speed fraction gained per second while a movement key is held
    pub acceleration: f64,
    /// Speed fraction lost per second while coasting
    pub deceleration: f64,
    /// Largest allowed pitch magnitude, in degrees
    pub max_pitch: f64,
    /// Movement keys
    pub keys: KeyBindings,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 200.0,
            back_speed_factor: 0.25,
            strafe_speed_factor: 0.5,
            mouse_sensitivity: 0.26,
            acceleration: 1.0,
            deceleration: 0.3,
            max_pitch: 60.0,
            keys: KeyBindings::default(),
        }
    }
}

impl PlayerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("move_speed", f64::from(self.move_speed)),
            ("back_speed_factor", f64::from(self.back_speed_factor)),
            ("strafe_speed_factor", f64::from(self.strafe_speed_factor)),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "player {field} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.mouse_sensitivity.is_finite() {
            return Err(ConfigError::Invalid("player mouse_sensitivity must be finite".to_string()));
        }
        if !(self.max_pitch > 0.0 && self.max_pitch <= 90.0) {
            return Err(ConfigError::Invalid(format!(
                "player max_pitch must be in (0, 90], got {}",
                self.max_pitch
            )));
        }
        Ok(())
    }
}

/// First-person controller driving a [`Camera`]
pub struct Player {
    config: PlayerConfig,
    camera: Camera,
    translate_intent: Vec3,
    speed: Float,
    pending_yaw: Angle,
    pending_pitch: Angle,
}

impl Player {
    /// Create a controller at rest
    pub fn new(camera: Camera, config: PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            camera,
            translate_intent: Vec3::zeros(),
            speed: Float::ZERO,
            pending_yaw: Angle::ZERO,
            pending_pitch: Angle::ZERO,
        })
    }

    /// Controlled camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable controlled camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Controller tuning
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Speed fraction in [0, 1]
    pub fn current_speed(&self) -> f64 {
        self.speed.value()
    }

    /// Motion applied by the last update, reused while coasting
    pub fn translate_intent(&self) -> Vec3 {
        self.translate_intent
    }

    /// Yaw and pitch increments applied by the last update
    pub fn pending_rotation(&self) -> (Angle, Angle) {
        (self.pending_yaw, self.pending_pitch)
    }

    /// Advance one rendered frame
    pub fn update(&mut self, input: &dyn InputSnapshot, elapsed_seconds: f32) {
        let elapsed = Float::new(f64::from(elapsed_seconds));
        let intent = self.read_keys(input, self.config.move_speed * elapsed_seconds);
        self.read_mouse(input);

        if intent == Vec3::zeros() {
            // Coast on the previous frame's motion, scaled down again
            self.speed -= elapsed * Float::new(self.config.deceleration);
        } else {
            self.speed += elapsed * Float::new(self.config.acceleration);
            self.translate_intent = intent;
        }
        self.speed = self.speed.clamp(Float::ZERO, Float::ONE);

        self.translate_intent *= self.speed.value() as f32;
        let motion = self.translate_intent;
        self.move_camera(motion);
        trace!(
            "Player speed {:.3}, motion {:?}, rotation {}",
            self.speed.value(),
            motion,
            self.camera.rotation()
        );
    }

    fn read_keys(&self, input: &dyn InputSnapshot, move_scale: f32) -> Vec3 {
        let keys = &self.config.keys;
        let mut intent = Vec3::zeros();

        if input.is_key_down(keys.forward) {
            intent.z = move_scale;
        }
        if input.is_key_down(keys.back) {
            intent.z = -(move_scale * self.config.back_speed_factor);
        }
        if input.is_key_down(keys.strafe_left) {
            intent.x = move_scale * self.config.strafe_speed_factor;
        }
        if input.is_key_down(keys.strafe_right) {
            intent.x = -(move_scale * self.config.strafe_speed_factor);
        }
        intent
    }

    fn read_mouse(&mut self, input: &dyn InputSnapshot) {
        let (dx, dy) = input.mouse_relative();
        let rot_x = -f64::from(dx) * self.config.mouse_sensitivity;
        let rot_y = -f64::from(dy) * self.config.mouse_sensitivity;

        self.pending_yaw = Angle::from_degrees(rot_x);
        self.pending_pitch = Angle::from_degrees(-rot_y);
    }

    fn move_camera(&mut self, motion: Vec3) {
        self.camera.rotate(&AngleVector::new(self.pending_pitch, self.pending_yaw, Angle::ZERO));

        let heading = self.camera.orientation().yaw;
        self.camera.translate(heading * motion);

        self.limit_pitch();
    }

    fn limit_pitch(&mut self) {
        let mut rotation = self.camera.rotation();
        let pitch = rotation.pitch.as_float();
        let max_pitch = Float::new(self.config.max_pitch);

        if pitch.abs() > max_pitch {
            let limited = max_pitch * Float::new(f64::from(pitch.sign()));
            debug!("Pitch {} limited to {}", rotation.pitch, limited);
            rotation.pitch = Angle::from_degrees(limited.value());
            self.camera.set_rotation(&rotation);
        }
    }
}

impl Object for Player {
    fn on_event(&mut self, _node: &mut NodeAccess<'_>, event: &Event<'_>) {
        if event.kind() == EventKind::FrameRendering {
            self.update(event.input(), event.elapsed_seconds());
        }
    }
}
