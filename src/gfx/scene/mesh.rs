//! Device-side buffers for one primitive group

use wgpu::util::DeviceExt;

use super::primitive::{MeshResource, PrimitiveGroup};
use crate::gfx::material::Classification;

/// A primitive group uploaded to the GPU.
///
/// The CPU copy of the geometry is dropped once the buffers exist. Buffers
/// are destroyed exactly once, either through [`GpuMesh::release`] or on
/// drop; a released mesh draws nothing.
pub struct GpuMesh {
    name: String,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
    vertex_count: u32,
    classification: Classification,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, group: PrimitiveGroup) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", group.name)),
            contents: bytemuck::cast_slice(&group.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", group.name)),
            contents: bytemuck::cast_slice(&group.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            index_count: group.index_count(),
            vertex_count: group.vertex_count(),
            classification: group.classification,
            name: group.name,
            vertex_buffer: Some(vertex_buffer),
            index_buffer: Some(index_buffer),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_released(&self) -> bool {
        self.vertex_buffer.is_none() && self.index_buffer.is_none()
    }

    /// Binds this mesh's buffers and issues one indexed draw. The pipeline
    /// and bind groups must already be set on `pass`.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.draw_mesh(self);
    }

    /// Destroys the device buffers. Calling it again is a no-op.
    pub fn release(&mut self) {
        if let Some(buffer) = self.vertex_buffer.take() {
            buffer.destroy();
        }
        if let Some(buffer) = self.index_buffer.take() {
            buffer.destroy();
        }
    }
}

impl MeshResource for GpuMesh {
    fn classification(&self) -> Classification {
        self.classification
    }

    fn index_count(&self) -> u32 {
        self.index_count
    }

    fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        self.release();
    }
}

pub trait DrawMesh {
    fn draw_mesh(&mut self, mesh: &GpuMesh);
}

impl DrawMesh for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &GpuMesh) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return;
        };
        // Empty buffer slices are rejected by wgpu.
        if mesh.index_count == 0 || mesh.vertex_count == 0 {
            return;
        }

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}
