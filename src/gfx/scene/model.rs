//! The imported scene as an ordered list of drawable meshes

use log::{debug, info};

use super::{
    mesh::GpuMesh,
    primitive::{MeshResource, PrimitiveGroup},
};
use crate::gfx::{
    material::{Classification, MaterialFamily, VariantSnapshot},
    resources::draw_bindings::DrawUniforms,
};

/// Inputs the render loop hands to [`SceneModel::render`] each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameState {
    /// Seconds since the viewer started
    pub elapsed: f32,
    pub variants: VariantSnapshot,
}

/// Handle to the bound shading program.
///
/// [`SceneModel::render`] pushes one set of per-draw uniforms before every
/// draw; implementations must make those values visible to that draw only.
pub trait ShadingProgram<M> {
    fn push_draw_uniforms(&mut self, uniforms: DrawUniforms);
    fn draw(&mut self, mesh: &M);
}

/// Mesh and triangle counts for the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStatistics {
    pub meshes: usize,
    pub triangles: u64,
    pub vertices: u64,
    pub unclassified: usize,
    per_family: [usize; 5],
}

impl SceneStatistics {
    pub fn family(&self, family: MaterialFamily) -> usize {
        self.per_family[family.index()]
    }
}

/// Meshes in depth-first pre-order of the source hierarchy.
///
/// Built once after import; the order never changes afterwards.
#[derive(Debug)]
pub struct SceneModel<M = GpuMesh> {
    meshes: Vec<M>,
}

impl<M> SceneModel<M> {
    pub fn new(meshes: Vec<M>) -> Self {
        Self { meshes }
    }

    /// A model with nothing to draw, used when import fails.
    pub fn empty() -> Self {
        Self { meshes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn meshes(&self) -> &[M] {
        &self.meshes
    }
}

impl<M: MeshResource> SceneModel<M> {
    /// Issues one draw per mesh, in import order, each preceded by its
    /// per-draw uniforms. The pipeline and frame uniforms must already be
    /// bound on `program`.
    pub fn render<P: ShadingProgram<M>>(&self, program: &mut P, frame: &FrameState) {
        for mesh in &self.meshes {
            program.push_draw_uniforms(DrawUniforms::new(
                mesh.classification(),
                frame.elapsed,
                frame.variants,
            ));
            program.draw(mesh);
        }
    }

    pub fn classifications(&self) -> impl Iterator<Item = Classification> + '_ {
        self.meshes.iter().map(MeshResource::classification)
    }

    pub fn statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics {
            meshes: self.meshes.len(),
            ..Default::default()
        };
        for mesh in &self.meshes {
            stats.triangles += mesh.triangle_count() as u64;
            stats.vertices += mesh.vertex_count() as u64;
            match mesh.classification() {
                Classification::Unclassified => stats.unclassified += 1,
                Classification::Family(family) => stats.per_family[family.index()] += 1,
            }
        }
        stats
    }
}

impl SceneModel<GpuMesh> {
    /// Uploads every group, keeping their order.
    pub fn upload(device: &wgpu::Device, groups: Vec<PrimitiveGroup>) -> Self {
        let meshes: Vec<GpuMesh> = groups
            .into_iter()
            .map(|group| {
                debug!(
                    "Uploading '{}': {} vertices, {} indices",
                    group.name,
                    group.vertices.len(),
                    group.indices.len()
                );
                GpuMesh::new(device, group)
            })
            .collect();
        info!("Uploaded {} meshes", meshes.len());
        Self { meshes }
    }

    /// Releases every mesh's device buffers. Safe to call more than once.
    pub fn release(&mut self) {
        self.meshes.iter_mut().for_each(GpuMesh::release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::vertex::Vertex3D;

    #[derive(Debug, PartialEq)]
    enum Call {
        Uniforms(DrawUniforms),
        Draw(String),
    }

    #[derive(Default)]
    struct RecordingProgram {
        calls: Vec<Call>,
    }

    impl ShadingProgram<PrimitiveGroup> for RecordingProgram {
        fn push_draw_uniforms(&mut self, uniforms: DrawUniforms) {
            self.calls.push(Call::Uniforms(uniforms));
        }

        fn draw(&mut self, mesh: &PrimitiveGroup) {
            self.calls.push(Call::Draw(mesh.name.clone()));
        }
    }

    fn triangle(name: &str, classification: Classification) -> PrimitiveGroup {
        PrimitiveGroup::new(name, vec![Vertex3D::default(); 3], vec![0, 1, 2], classification)
    }

    fn chess_model() -> SceneModel<PrimitiveGroup> {
        SceneModel::new(vec![
            triangle("pawn", MaterialFamily::WhitePieces.into()),
            triangle("board", MaterialFamily::BoardBase.into()),
            triangle("mystery", Classification::Unclassified),
        ])
    }

    #[test]
    fn test_uniforms_precede_each_draw_in_order() {
        let model = chess_model();
        let frame = FrameState {
            elapsed: 2.0,
            variants: VariantSnapshot([2, 1, 3, 1, 1]),
        };
        let mut program = RecordingProgram::default();
        model.render(&mut program, &frame);

        let expected = vec![
            Call::Uniforms(DrawUniforms::new(MaterialFamily::WhitePieces.into(), 2.0, frame.variants)),
            Call::Draw("pawn".to_string()),
            Call::Uniforms(DrawUniforms::new(MaterialFamily::BoardBase.into(), 2.0, frame.variants)),
            Call::Draw("board".to_string()),
            Call::Uniforms(DrawUniforms::new(Classification::Unclassified, 2.0, frame.variants)),
            Call::Draw("mystery".to_string()),
        ];
        assert_eq!(program.calls, expected);
    }

    #[test]
    fn test_every_draw_sees_the_same_snapshot() {
        let model = chess_model();
        let frame = FrameState {
            elapsed: 0.5,
            variants: VariantSnapshot([3, 3, 2, 2, 3]),
        };
        let mut program = RecordingProgram::default();
        model.render(&mut program, &frame);

        for call in &program.calls {
            if let Call::Uniforms(uniforms) = call {
                assert_eq!(uniforms.snapshot(), frame.variants);
            }
        }
    }

    #[test]
    fn test_empty_model_draws_nothing() {
        let model = SceneModel::<PrimitiveGroup>::empty();
        let mut program = RecordingProgram::default();
        model.render(&mut program, &FrameState::default());
        assert!(program.calls.is_empty());
        assert!(model.is_empty());
    }

    #[test]
    fn test_statistics_count_per_family() {
        let stats = chess_model().statistics();
        assert_eq!(stats.meshes, 3);
        assert_eq!(stats.triangles, 3);
        assert_eq!(stats.vertices, 9);
        assert_eq!(stats.unclassified, 1);
        assert_eq!(stats.family(MaterialFamily::WhitePieces), 1);
        assert_eq!(stats.family(MaterialFamily::BoardBase), 1);
        assert_eq!(stats.family(MaterialFamily::BlackSquares), 0);
    }

    #[test]
    fn test_classifications_follow_mesh_order() {
        let ids: Vec<i32> = chess_model().classifications().map(Classification::id).collect();
        assert_eq!(ids, vec![1, 3, 0]);
    }
}
