//! Wavefront OBJ loading through `tobj`

use std::path::Path;

use log::{debug, warn};

use super::{calculate_smooth_normals, scene_name, DEFAULT_MATERIAL_NAME};
use crate::{
    error::{SceneError, SceneResult},
    gfx::scene::graph::{SceneGraph, SceneNode, SourceMaterial, SourcePrimitive},
};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

pub fn load(path: &Path) -> SceneResult<SceneGraph> {
    let (models, materials) =
        tobj::load_obj(path, &load_options()).map_err(|e| SceneError::load(path, e))?;

    let materials = materials.unwrap_or_else(|e| {
        warn!("Failed to load materials for {}: {}", path.display(), e);
        Vec::new()
    });

    Ok(graph_from_models(&scene_name(path), models, materials))
}

/// Builds a two-level graph: a root named `name` with one child node per OBJ
/// object, each holding that object's mesh.
pub fn graph_from_models(
    name: &str,
    models: Vec<tobj::Model>,
    materials: Vec<tobj::Material>,
) -> SceneGraph {
    let mut source_materials: Vec<SourceMaterial> = materials
        .iter()
        .enumerate()
        .map(|(i, material)| {
            if material.name.is_empty() {
                SourceMaterial::new(format!("material_{}", i))
            } else {
                SourceMaterial::new(material.name.clone())
            }
        })
        .collect();

    let mut default_material = None;
    let mut root = SceneNode::new(name);

    for (i, model) in models.into_iter().enumerate() {
        let node_name = if model.name.is_empty() {
            format!("object_{}", i)
        } else {
            model.name
        };

        let material_index = match model.mesh.material_id {
            Some(id) if id < source_materials.len() => id,
            _ => *default_material.get_or_insert_with(|| {
                source_materials.push(SourceMaterial::new(DEFAULT_MATERIAL_NAME));
                source_materials.len() - 1
            }),
        };

        let primitive = convert_mesh(&node_name, &model.mesh, material_index);
        debug!(
            "OBJ object '{}': {} vertices, {} faces",
            node_name,
            primitive.positions.len(),
            primitive.faces.len()
        );
        root.children
            .push(SceneNode::new(node_name).with_primitive(primitive));
    }

    SceneGraph::new(root, source_materials)
}

fn convert_mesh(name: &str, mesh: &tobj::Mesh, material_index: usize) -> SourcePrimitive {
    let positions: Vec<[f32; 3]> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();

    let normals = if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len() {
        mesh.normals
            .chunks_exact(3)
            .map(|n| [n[0], n[1], n[2]])
            .collect()
    } else {
        calculate_smooth_normals(&positions, &mesh.indices)
    };

    // OBJ puts the V origin at the bottom of the image
    let tex_coords = (!mesh.texcoords.is_empty()).then(|| {
        mesh.texcoords
            .chunks_exact(2)
            .map(|t| [t[0], 1.0 - t[1]])
            .collect()
    });

    SourcePrimitive {
        name: name.to_string(),
        positions,
        normals: Some(normals),
        tex_coords,
        faces: mesh.indices.chunks(3).map(<[u32]>::to_vec).collect(),
        material_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        material::{Classification, MaterialFamily},
        scene::SceneImporter,
    };
    use std::io::Cursor;

    const CHESS_MTL: &str = "\
newmtl MarmoBianco
Kd 1 1 1
newmtl LegnoScuro
Kd 0.4 0.2 0.1
";

    const CHESS_OBJ: &str = "\
mtllib chess.mtl
o Pawn
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
usemtl MarmoBianco
f 1/1 2/2 3/3
o Square
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
usemtl LegnoScuro
f 4 5 6 7
";

    fn parse(obj: &str) -> SceneGraph {
        let (models, materials) = tobj::load_obj_buf(
            &mut Cursor::new(obj.as_bytes()),
            &load_options(),
            |_| tobj::load_mtl_buf(&mut Cursor::new(CHESS_MTL.as_bytes())),
        )
        .unwrap();
        graph_from_models("chess", models, materials.unwrap_or_default())
    }

    #[test]
    fn test_one_child_node_per_object() {
        let graph = parse(CHESS_OBJ);
        let root = graph.root.as_ref().unwrap();
        assert_eq!(root.name, "chess");
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Pawn", "Square"]);
        assert_eq!(graph.primitive_count(), 2);
    }

    #[test]
    fn test_quads_are_triangulated() {
        let graph = parse(CHESS_OBJ);
        let square = &graph.root.as_ref().unwrap().children[1].primitives[0];
        assert_eq!(square.faces.len(), 2);
        assert!(square.faces.iter().all(|f| f.len() == 3));
    }

    #[test]
    fn test_tex_coords_are_flipped_vertically() {
        let graph = parse(CHESS_OBJ);
        let pawn = &graph.root.as_ref().unwrap().children[0].primitives[0];
        let uvs = pawn.tex_coords.as_ref().unwrap();
        assert_eq!(uvs[0], [0.0, 1.0]);
        assert_eq!(uvs[2], [0.0, 0.0]);

        let square = &graph.root.as_ref().unwrap().children[1].primitives[0];
        assert!(square.tex_coords.is_none());
    }

    #[test]
    fn test_missing_normals_are_generated() {
        let graph = parse(CHESS_OBJ);
        let pawn = &graph.root.as_ref().unwrap().children[0].primitives[0];
        for normal in pawn.normals.as_ref().unwrap() {
            assert_eq!(*normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_object_without_material_gets_default() {
        let graph = parse("o Lonely\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(graph.materials.last().unwrap().name, DEFAULT_MATERIAL_NAME);
        let lonely = &graph.root.as_ref().unwrap().children[0].primitives[0];
        assert_eq!(lonely.material_index, graph.materials.len() - 1);
    }

    #[test]
    fn test_import_classifies_obj_materials() {
        let groups = SceneImporter::default().import(&parse(CHESS_OBJ)).unwrap();
        assert_eq!(
            groups[0].classification,
            Classification::Family(MaterialFamily::WhitePieces)
        );
        assert_eq!(
            groups[1].classification,
            Classification::Family(MaterialFamily::BoardBase)
        );
        assert_eq!(groups[1].indices.len(), 6);
    }
}
