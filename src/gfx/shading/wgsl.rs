//! WGSL source for the procedural shading pipeline
//!
//! The pattern library and entry points live in `procedural.wgsl`; the
//! family/variant dispatch (`material_base_color`) is generated here from a
//! [`MaterialTable`], so the shader and the CPU reference evaluator always
//! agree on which pattern a selector value picks.

use std::fmt::Write;

use super::{
    reference::{DIAGNOSTIC_COLOR, UNSHADED_COLOR},
    table::{MaterialTable, Pattern},
};
use crate::gfx::material::MaterialFamily;

/// Static part of the shader: uniforms, pattern library, lighting, entry
/// points.
pub const PATTERN_LIBRARY: &str = include_str!("procedural.wgsl");

/// Full shader source for `table`.
pub fn shader_source(table: &MaterialTable) -> String {
    let mut source = String::from(PATTERN_LIBRARY);
    source.push('\n');
    source.push_str(&dispatch_source(table));
    source
}

/// Generates `material_base_color(material_id, uv)`.
pub fn dispatch_source(table: &MaterialTable) -> String {
    let mut out = String::new();
    out.push_str("fn material_base_color(material_id: i32, uv: vec2<f32>) -> vec3<f32> {\n");
    let _ = writeln!(out, "    var color = {};", vec3(UNSHADED_COLOR));
    out.push_str("    let variant = family_variant(material_id);\n");
    out.push_str("    switch material_id {\n");

    for family in MaterialFamily::ALL {
        let _ = writeln!(out, "        // {family}");
        let _ = writeln!(out, "        case {}: {{", family.id());
        out.push_str("            switch variant {\n");
        for (slot, pattern) in table.patterns(family).iter().enumerate() {
            let _ = writeln!(
                out,
                "                case {}: {{ color = {}; }}",
                slot + 1,
                pattern_expression(pattern)
            );
        }
        out.push_str("                default: {}\n");
        out.push_str("            }\n");
        out.push_str("        }\n");
    }

    let _ = writeln!(
        out,
        "        default: {{ color = {}; }}",
        vec3(DIAGNOSTIC_COLOR)
    );
    out.push_str("    }\n");
    out.push_str("    return color;\n");
    out.push_str("}\n");
    out
}

fn pattern_expression(pattern: &Pattern) -> String {
    match pattern {
        Pattern::Solid { color } => vec3(*color),
        Pattern::Marble(params) => format!(
            "marble_pattern(uv, {}, {}, {})",
            float(params.uv_scale),
            vec3(params.base),
            vec3(params.vein)
        ),
        Pattern::Wood(params) => format!(
            "wood_pattern(uv, {}, {}, {}, {})",
            float(params.uv_scale),
            vec3(params.base),
            vec3(params.mid),
            vec3(params.highlight)
        ),
    }
}

// Debug formatting of f32 always keeps a decimal point or exponent, which is
// what WGSL needs to infer an f32 literal.
fn float(value: f32) -> String {
    format!("{value:?}")
}

fn vec3(v: [f32; 3]) -> String {
    format!("vec3<f32>({}, {}, {})", float(v[0]), float(v[1]), float(v[2]))
}
