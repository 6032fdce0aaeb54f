//! The procedural pipeline as seen by [`SceneModel::render`]

use crate::gfx::{
    resources::draw_bindings::{DrawBindings, DrawUniforms},
    scene::{mesh::GpuMesh, model::ShadingProgram},
};

/// An open render pass with the procedural pipeline and frame bindings set.
///
/// Each pushed set of uniforms goes into the next free slot of the draw
/// ring, and the slot's dynamic offset is bound to group 1 so only the
/// following draw sees it.
///
/// [`SceneModel::render`]: crate::gfx::scene::SceneModel::render
pub struct ScenePass<'a, 'p> {
    pass: &'a mut wgpu::RenderPass<'p>,
    queue: &'a wgpu::Queue,
    bindings: &'a DrawBindings,
    slot: u32,
}

impl<'a, 'p> ScenePass<'a, 'p> {
    pub fn new(
        pass: &'a mut wgpu::RenderPass<'p>,
        queue: &'a wgpu::Queue,
        bindings: &'a DrawBindings,
    ) -> Self {
        Self {
            pass,
            queue,
            bindings,
            slot: 0,
        }
    }

    /// Slots consumed so far this frame.
    pub fn draws(&self) -> u32 {
        self.slot
    }
}

impl ShadingProgram<GpuMesh> for ScenePass<'_, '_> {
    fn push_draw_uniforms(&mut self, uniforms: DrawUniforms) {
        // The ring was sized for the whole model before the pass opened
        debug_assert!(self.slot < self.bindings.capacity());
        let offset = self.bindings.write(self.queue, self.slot, &uniforms);
        self.pass
            .set_bind_group(1, self.bindings.bind_group(), &[offset]);
        self.slot += 1;
    }

    fn draw(&mut self, mesh: &GpuMesh) {
        mesh.draw(self.pass);
    }
}
