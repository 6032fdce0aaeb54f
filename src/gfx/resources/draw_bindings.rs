//! Per-draw uniform bindings (group 1, dynamic offset)
//!
//! Every mesh draw gets its own slot in a uniform ring holding the mesh's
//! classification ID, the elapsed time and the frame's selector snapshot.

use log::debug;

use crate::{
    gfx::material::{Classification, VariantSnapshot},
    wgpu_utils::{binding_types, uniform_buffer::DynamicUniformBuffer},
};

/// MUST match `DrawUniform` in `procedural.wgsl`.
///
/// `variants[0..5]` are the selectors in family order; the last three
/// entries pad the array out to two `vec4<i32>`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub material_id: i32,
    pub time: f32,
    _padding: [u32; 2],
    pub variants: [i32; 8],
}
// 4 + 4 + 8 + 32 = 48 bytes

impl DrawUniforms {
    pub fn new(classification: Classification, time: f32, variants: VariantSnapshot) -> Self {
        let mut packed = [0; 8];
        packed[..5].copy_from_slice(&variants.0);
        Self {
            material_id: classification.id(),
            time,
            _padding: [0; 2],
            variants: packed,
        }
    }

    pub fn snapshot(&self) -> VariantSnapshot {
        let mut values = [0; 5];
        values.copy_from_slice(&self.variants[..5]);
        VariantSnapshot(values)
    }
}

pub type DrawUBO = DynamicUniformBuffer<DrawUniforms>;

/// Uniform ring plus the bind group that exposes one slot at a time.
pub struct DrawBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    ring: DrawUBO,
    bind_group: wgpu::BindGroup,
}

impl DrawBindings {
    pub fn new(device: &wgpu::Device, capacity: u32) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Draw Bind Group Layout"),
            entries: &[binding_types::rendering_entry(
                0,
                binding_types::dynamic_uniform(DrawUBO::binding_size()),
            )],
        });
        let ring = DrawUBO::new(device, capacity);
        let bind_group = Self::create_bind_group(device, &bind_group_layout, &ring);

        Self {
            bind_group_layout,
            ring,
            bind_group,
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        ring: &DrawUBO,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ring.binding_resource(),
            }],
        })
    }

    /// Grows the ring so that `draws` slots fit. Must be called before the
    /// render pass that uses them is recorded.
    pub fn ensure_capacity(&mut self, device: &wgpu::Device, draws: u32) {
        if draws <= self.ring.capacity() {
            return;
        }
        let capacity = draws.next_power_of_two();
        debug!("Growing draw uniform ring to {capacity} slots");
        self.ring = DrawUBO::new(device, capacity);
        self.bind_group = Self::create_bind_group(device, &self.bind_group_layout, &self.ring);
    }

    pub fn capacity(&self) -> u32 {
        self.ring.capacity()
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn write(&self, queue: &wgpu::Queue, slot: u32, uniforms: &DrawUniforms) -> wgpu::DynamicOffset {
        self.ring.write(queue, slot, uniforms)
    }
}
