use cgmath::Deg;
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta},
};

use super::orbit_camera::OrbitCamera;

/// Pixels of precise-scroll motion treated as one wheel line.
const PIXELS_PER_LINE: f32 = 20.0;

/// Right-drag orbits, scroll zooms.
pub struct CameraController {
    /// Degrees of rotation per pixel of mouse motion
    pub rotate_speed: f32,
    /// Radius change per wheel line
    pub zoom_speed: f32,
    is_orbiting: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            is_orbiting: false,
        }
    }

    pub fn is_orbiting(&self) -> bool {
        self.is_orbiting
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Right {
            self.is_orbiting = state == ElementState::Pressed;
        }
    }

    pub fn process_device_event(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.process_motion(delta.0 as f32, delta.1 as f32, camera);
        }
    }

    /// Horizontal motion is inverted so dragging right swings the scene right.
    pub fn process_motion(&mut self, dx: f32, dy: f32, camera: &mut OrbitCamera) {
        if !self.is_orbiting {
            return;
        }
        camera.add_yaw(Deg(-dx * self.rotate_speed));
        camera.add_pitch(Deg(dy * self.rotate_speed));
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta, camera: &mut OrbitCamera) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / PIXELS_PER_LINE,
        };
        camera.add_radius(-lines * self.zoom_speed);
    }
}
