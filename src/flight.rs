//! Player flight model
//!
//! The camera rig is what moves; the bird's body trails slightly below and
//! ahead of it with a small bob. The player's bounding volume is centred
//! on the body, not the camera.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

use serde::{Deserialize, Serialize};

use crate::collision::PlayerVolume;
use crate::core::config::{GameConfig, PlayerConfig};
use crate::core::types::Vec3;
use crate::engine::wrap::wrap_position;

/// Body sits this far below the camera
const BODY_DROP: f32 = 0.4;
/// Body leads the camera by this much along the heading
const BODY_LEAD: f32 = 0.75;
const BOB_AMPLITUDE: f32 = 0.01;
const BOB_RATE: f32 = 4.0;

/// One held movement input for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightCommand {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    /// Gain altitude while drifting forward
    Climb,
    /// Lose altitude while drifting forward; ignored at minimum altitude
    Dive,
}

/// Camera rig position and heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub camera: Vec3,
    /// Yaw in radians
    pub heading: f32,
}

impl FlightState {
    pub fn new(camera: Vec3) -> Self {
        Self { camera, heading: 0.0 }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(config.start())
    }

    /// Apply this tick's commands, then wrap into the cyclic world
    pub fn apply(&mut self, commands: &[FlightCommand], config: &GameConfig) {
        let speed = config.player.speed;
        for command in commands {
            match command {
                FlightCommand::Forward => self.step(self.heading, -speed),
                FlightCommand::Backward => self.step(self.heading, speed),
                FlightCommand::StrafeLeft => self.step(self.heading + FRAC_PI_2, speed),
                FlightCommand::StrafeRight => self.step(self.heading - FRAC_PI_2, speed),
                FlightCommand::Climb => {
                    self.camera.y += speed;
                    self.camera.z += speed;
                }
                FlightCommand::Dive => {
                    if self.camera.y > config.player.min_altitude {
                        self.camera.y -= speed;
                    }
                    self.camera.z += speed;
                }
            }
        }
        self.camera = wrap_position(self.camera, config.wrap_bound);
    }

    /// Move along `angle`; negative distance is "forward"
    fn step(&mut self, angle: f32, distance: f32) {
        self.camera.x += angle.sin() * distance;
        self.camera.z -= angle.cos() * distance;
    }

    /// Point the heading so `Forward` moves toward `target` on the ground plane
    pub fn face_towards(&mut self, target: Vec3) {
        let dx = target.x - self.camera.x;
        let dz = target.z - self.camera.z;
        if dx != 0.0 || dz != 0.0 {
            self.heading = (-dx).atan2(dz);
        }
    }

    /// Bird body position at `time` seconds
    pub fn body_position(&self, time: f32) -> Vec3 {
        let bob = (time * BOB_RATE + self.camera.x + self.camera.z).sin() * BOB_AMPLITUDE;
        Vec3::new(
            self.camera.x,
            self.camera.y - BODY_DROP + bob,
            self.camera.z + (self.heading + FRAC_PI_6).cos() * BODY_LEAD,
        )
    }

    /// Collidable volume for the collision engine
    pub fn volume(&self, time: f32, config: &PlayerConfig) -> PlayerVolume {
        PlayerVolume::new(self.body_position(time), config.half_extents())
    }
}

/// Commands steering the body toward `target` for one tick
///
/// Turns to face the target horizontally, flies forward while it is more
/// than one step away, and climbs or dives to match its altitude.
pub fn autopilot(state: &mut FlightState, target: Vec3, time: f32, config: &GameConfig) -> Vec<FlightCommand> {
    let speed = config.player.speed;
    let body = state.body_position(time);
    let mut commands = Vec::new();

    // aim so the body, not the camera, converges on the target
    let aim = target - (body - state.camera);
    state.face_towards(aim);

    let horizontal = Vec3::new(target.x - body.x, 0.0, target.z - body.z).length();
    if horizontal > speed * 0.5 {
        commands.push(FlightCommand::Forward);
    }

    let climb = target.y - body.y;
    if climb > speed {
        commands.push(FlightCommand::Climb);
    } else if climb < -speed {
        commands.push(FlightCommand::Dive);
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_forward_at_zero_heading_moves_positive_z() {
        let config = GameConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, 2.0, 0.0));
        state.apply(&[FlightCommand::Forward], &config);
        assert!(approx(state.camera, Vec3::new(0.0, 2.0, 0.2)));
    }

    #[test]
    fn test_backward_undoes_forward() {
        let config = GameConfig::default();
        let mut state = FlightState::new(Vec3::new(3.0, 2.0, 4.0));
        state.heading = 0.7;
        state.apply(&[FlightCommand::Forward, FlightCommand::Backward], &config);
        assert!(approx(state.camera, Vec3::new(3.0, 2.0, 4.0)));
    }

    #[test]
    fn test_strafes_are_opposite() {
        let config = GameConfig::default();
        let mut left = FlightState::new(Vec3::ZERO);
        let mut right = FlightState::new(Vec3::ZERO);
        left.apply(&[FlightCommand::StrafeLeft], &config);
        right.apply(&[FlightCommand::StrafeRight], &config);
        assert!(approx(left.camera, -right.camera));
        assert!((left.camera.x - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_dive_stops_at_min_altitude() {
        let config = GameConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, 2.0, 0.0));
        state.apply(&[FlightCommand::Dive], &config);
        assert_eq!(state.camera.y, 2.0);
        assert!((state.camera.z - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_climb_drifts_forward() {
        let config = GameConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, 2.0, 0.0));
        state.apply(&[FlightCommand::Climb], &config);
        assert!(approx(state.camera, Vec3::new(0.0, 2.2, 0.2)));
    }

    #[test]
    fn test_apply_wraps_position() {
        let config = GameConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, 2.0, 499.9));
        state.apply(&[FlightCommand::Climb], &config);
        assert!(state.camera.z > 0.0 && state.camera.z < 1.0);
    }

    #[test]
    fn test_face_towards_then_forward_closes_distance() {
        let config = GameConfig::default();
        let target = Vec3::new(10.0, 2.0, -10.0);
        let mut state = FlightState::new(Vec3::new(0.0, 2.0, 0.0));
        state.face_towards(target);
        let before = (target - state.camera).length();
        state.apply(&[FlightCommand::Forward], &config);
        let after = (target - state.camera).length();
        assert!((before - after - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_body_trails_below_camera() {
        let state = FlightState::new(Vec3::new(0.0, 5.0, 0.0));
        let body = state.body_position(0.0);
        assert!((body.y - 4.6).abs() < 0.011);
        assert!((body.z - FRAC_PI_6.cos() * 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_autopilot_reaches_target() {
        let config = GameConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, 2.0, -5.0));
        let target = Vec3::new(4.0, 5.0, 6.0);
        let prey_bounds = crate::collision::Aabb::from_center(target, config.prey.half_extents());

        let mut reached = false;
        for tick in 0..500 {
            let time = tick as f32 / 60.0;
            let commands = autopilot(&mut state, target, time, &config);
            state.apply(&commands, &config);
            if state.volume(time, &config.player).bounds().intersects(&prey_bounds) {
                reached = true;
                break;
            }
        }
        assert!(reached, "autopilot never reached target, ended at {:?}", state.camera);
    }
}
