use cgmath::{Matrix4, SquareMatrix};
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Raw mouse motion; only rotates while the orbit button is held.
    pub fn process_event(&mut self, event: &DeviceEvent) {
        self.controller.process_device_event(event, &mut self.camera);
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.controller.process_mouse_button(button, state);
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        self.controller.process_scroll(delta, &mut self.camera);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize_projection(width, height);
    }

    pub fn uniform(&self) -> CameraUniform {
        self.camera.uniform()
    }
}

pub trait Camera: Sized {
    fn build_view_matrix(&self) -> Matrix4<f32>;
    fn build_projection_matrix(&self) -> Matrix4<f32>;

    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.build_projection_matrix() * self.build_view_matrix()
    }
}

/// Camera state the shading stage reads each frame.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Unit vector from the orbit center towards the eye; `w` is unused and
    /// only pads to 16 bytes.
    pub camera_dir: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view: convert_matrix4_to_array(Matrix4::identity()),
            projection: convert_matrix4_to_array(Matrix4::identity()),
            camera_dir: [0.0, 0.0, 1.0, 0.0],
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
