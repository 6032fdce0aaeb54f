//! Per-frame uniform bindings (group 0)
//!
//! Holds the camera matrices, the model transform and the camera direction.
//! Written once per frame before any draw is recorded.

use cgmath::Matrix4;

use crate::{
    gfx::camera::camera_utils::{convert_matrix4_to_array, CameraUniform},
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// MUST match `FrameUniform` in `procedural.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_dir: [f32; 4],
}
// 64 + 64 + 64 + 16 = 208 bytes

impl FrameUniform {
    pub fn new(camera: CameraUniform, model: Matrix4<f32>) -> Self {
        Self {
            view: camera.view,
            projection: camera.projection,
            model: convert_matrix4_to_array(model),
            camera_dir: camera.camera_dir,
        }
    }
}

pub type FrameUBO = UniformBuffer<FrameUniform>;

/// Bind group layout and bind group for [`FrameUniform`], slot 0.
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &FrameUBO) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[binding_types::rendering_entry(0, binding_types::uniform())],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        Self {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector3};

    #[test]
    fn test_frame_uniform_layout() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 208);
        assert_eq!(std::mem::offset_of!(FrameUniform, model), 128);
        assert_eq!(std::mem::offset_of!(FrameUniform, camera_dir), 192);
    }

    #[test]
    fn test_frame_uniform_carries_camera_and_model() {
        let camera = CameraUniform {
            camera_dir: [0.0, 0.6, 0.8, 0.0],
            ..Default::default()
        };
        let model = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let frame = FrameUniform::new(camera, model);

        assert_eq!(frame.camera_dir, [0.0, 0.6, 0.8, 0.0]);
        assert_eq!(frame.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(frame.view, convert_matrix4_to_array(Matrix4::identity()));
    }
}
