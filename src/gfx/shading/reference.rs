//! CPU reference evaluation of the material shading stage
//!
//! [`shade_fragment`] computes, for one fragment, exactly what the generated
//! fragment shader computes: table dispatch on (classification, variant),
//! then the fixed single-light composite. It is a pure function with no
//! shared state, which is also the contract the GPU version relies on.

use cgmath::{Array, InnerSpace, Vector2, Vector3, Zero};

use super::{
    noise,
    table::{MarbleParams, MaterialTable, Pattern, WoodParams},
};
use crate::gfx::material::{MaterialFamily, VariantSnapshot};

/// Colour of fragments whose classification has no family.
pub const DIAGNOSTIC_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
/// Base colour when a family's selector points past its pattern list.
pub const UNSHADED_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

pub const AMBIENT: f32 = 0.5;
/// Light direction; deliberately not normalised.
pub const LIGHT_DIRECTION: [f32; 3] = [1.0, 1.0, 1.0];
pub const SPECULAR_EXPONENT: f32 = 256.0;
/// Weight of each of the ambient, diffuse and specular terms.
pub const TERM_WEIGHT: f32 = 0.5;
/// Per-channel exponent applied to wood colours (≈ 1 / 2.2).
pub const WOOD_GAMMA: f32 = 0.4545;

/// Interpolated inputs of one fragment plus the uniforms it reads.
#[derive(Debug, Clone, Copy)]
pub struct FragmentInput {
    pub normal: Vector3<f32>,
    pub tex_coords: Vector2<f32>,
    pub material_id: i32,
    pub variants: VariantSnapshot,
    pub camera_dir: Vector3<f32>,
    pub time: f32,
}

/// Shades one fragment.
pub fn shade_fragment(table: &MaterialTable, input: &FragmentInput) -> Vector3<f32> {
    let color = base_color(table, input.material_id, &input.variants, input.tex_coords);
    apply_lighting(color, input.normal, input.camera_dir)
}

/// Resolves the unlit base colour through the family/variant table.
pub fn base_color(
    table: &MaterialTable,
    material_id: i32,
    variants: &VariantSnapshot,
    uv: Vector2<f32>,
) -> Vector3<f32> {
    let Some(family) = MaterialFamily::from_id(material_id) else {
        return DIAGNOSTIC_COLOR.into();
    };

    table
        .pattern(family, variants.variant(family))
        .map_or(UNSHADED_COLOR.into(), |pattern| pattern_color(pattern, uv))
}

pub fn pattern_color(pattern: &Pattern, uv: Vector2<f32>) -> Vector3<f32> {
    match pattern {
        Pattern::Solid { color } => (*color).into(),
        Pattern::Marble(params) => marble_color(params, uv),
        Pattern::Wood(params) => wood_color(params, uv),
    }
}

fn marble_color(params: &MarbleParams, uv: Vector2<f32>) -> Vector3<f32> {
    let veins = noise::marble_veins(uv * params.uv_scale);
    noise::mix3(params.base.into(), params.vein.into(), veins)
}

fn wood_color(params: &WoodParams, uv: Vector2<f32>) -> Vector3<f32> {
    let uv = uv * params.uv_scale;
    let p = Vector3::new((uv.x - 0.5) * 2.0, (uv.y - 0.5) * 2.0, 0.0);
    let color = noise::wood(
        p,
        params.base.into(),
        params.mid.into(),
        params.highlight.into(),
    );
    wood_gamma(color)
}

/// Gamma lift for the wood pattern. The noise can undershoot zero, so
/// channels are clamped first.
fn wood_gamma(color: Vector3<f32>) -> Vector3<f32> {
    color.map(|channel| channel.max(0.0).powf(WOOD_GAMMA))
}

fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() > 0.0 {
        v.normalize()
    } else {
        Vector3::zero()
    }
}

fn reflect(incident: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * normal.dot(incident))
}

/// Fixed single-light composite.
///
/// The result is `color * lighting` where `lighting` already carries `color`
/// in its diffuse and specular terms; the double weighting is intentional.
pub fn apply_lighting(
    color: Vector3<f32>,
    normal: Vector3<f32>,
    camera_dir: Vector3<f32>,
) -> Vector3<f32> {
    let ambient = Vector3::from_value(AMBIENT);
    let normal = normalize_or_zero(normal);
    let light: Vector3<f32> = LIGHT_DIRECTION.into();

    let diffuse_strength = light.dot(normal).max(0.0);
    let diffuse = color * diffuse_strength;

    let view = normalize_or_zero(camera_dir);
    let reflected = normalize_or_zero(reflect(-light, normal));
    let specular_strength = view.dot(reflected).max(0.0).powf(SPECULAR_EXPONENT);
    let specular = color * specular_strength;

    let lighting = (ambient + diffuse + specular) * TERM_WEIGHT;
    Vector3::new(
        color.x * lighting.x,
        color.y * lighting.y,
        color.z * lighting.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::shading::table::{
        BLACK_PIECES_MARBLE, BOARD_BASE_BLUE_WOOD, WHITE_PIECES_MARBLE, WHITE_SQUARES_PALE_WOOD,
    };

    fn fragment(material_id: i32, variants: [i32; 5]) -> FragmentInput {
        FragmentInput {
            normal: Vector3::new(0.0, 0.0, 1.0),
            tex_coords: Vector2::new(0.3, 0.7),
            material_id,
            variants: VariantSnapshot(variants),
            camera_dir: Vector3::new(0.0, 0.0, 1.0),
            time: 0.0,
        }
    }

    fn assert_close(actual: Vector3<f32>, expected: Vector3<f32>) {
        let diff = actual - expected;
        assert!(
            diff.x.abs() < 1e-5 && diff.y.abs() < 1e-5 && diff.z.abs() < 1e-5,
            "{actual:?} != {expected:?}"
        );
    }

    /// Closed form of the composite for normal +Z lit by (1,1,1), viewed
    /// along +Z: diffuse strength 1, specular strength 0.
    fn lit_facing_z(color: Vector3<f32>) -> Vector3<f32> {
        let lighting = (Vector3::from_value(AMBIENT) + color) * TERM_WEIGHT;
        Vector3::new(
            color.x * lighting.x,
            color.y * lighting.y,
            color.z * lighting.z,
        )
    }

    #[test]
    fn test_unclassified_renders_diagnostic_green() {
        let table = MaterialTable::standard();
        let shaded = shade_fragment(table, &fragment(0, [1; 5]));
        assert_close(shaded, lit_facing_z(DIAGNOSTIC_COLOR.into()));
        assert_close(shaded, Vector3::new(0.0, 0.75, 0.0));

        let unknown = shade_fragment(table, &fragment(42, [1; 5]));
        assert_close(unknown, shaded);
    }

    #[test]
    fn test_solid_variants_match_closed_form() {
        let table = MaterialTable::standard();
        let white = shade_fragment(table, &fragment(1, [1; 5]));
        assert_close(white, lit_facing_z(Vector3::from_value(0.75)));

        let board = shade_fragment(table, &fragment(3, [1; 5]));
        assert_close(board, lit_facing_z(Vector3::new(0.40, 0.26, 0.13)));
    }

    #[test]
    fn test_out_of_range_variant_falls_back_to_white() {
        let table = MaterialTable::standard();
        let uv = Vector2::new(0.1, 0.2);
        let snapshot = VariantSnapshot([1, 1, 1, 3, 1]);
        assert_eq!(
            base_color(table, MaterialFamily::WhiteSquares.id(), &snapshot, uv),
            UNSHADED_COLOR.into()
        );
        let snapshot = VariantSnapshot([0, 1, 1, 1, 1]);
        assert_eq!(
            base_color(table, MaterialFamily::WhitePieces.id(), &snapshot, uv),
            UNSHADED_COLOR.into()
        );
    }

    #[test]
    fn test_selector_of_other_family_is_ignored() {
        let table = MaterialTable::standard();
        let a = shade_fragment(table, &fragment(2, [1, 1, 1, 1, 1]));
        let b = shade_fragment(table, &fragment(2, [3, 1, 2, 2, 3]));
        assert_close(a, b);
    }

    #[test]
    fn test_marble_stays_between_base_and_vein() {
        for pattern in [WHITE_PIECES_MARBLE, BLACK_PIECES_MARBLE] {
            let Pattern::Marble(params) = pattern else {
                unreachable!()
            };
            let lo = params.base[0].min(params.vein[0]) - 1e-5;
            let hi = params.base[0].max(params.vein[0]) + 1e-5;
            for i in 0..50 {
                let uv = Vector2::new(i as f32 * 0.021, 1.0 - i as f32 * 0.013);
                let c = pattern_color(&pattern, uv);
                assert!(c.x >= lo && c.x <= hi, "{c:?}");
                assert_eq!(c.x, c.y);
            }
        }
    }

    #[test]
    fn test_wood_is_finite_and_in_gamut() {
        for pattern in [BOARD_BASE_BLUE_WOOD, WHITE_SQUARES_PALE_WOOD] {
            for i in 0..20 {
                let uv = Vector2::new(i as f32 * 0.05, 0.5 + i as f32 * 0.02);
                let c = pattern_color(&pattern, uv);
                for channel in [c.x, c.y, c.z] {
                    assert!(channel.is_finite());
                    assert!((0.0..=1.0 + 1e-5).contains(&channel), "{c:?}");
                }
            }
        }
    }

    #[test]
    fn test_wood_gamma_clamps_negative_channels() {
        let lifted = wood_gamma(Vector3::new(-0.2, 0.0, 1.0));
        assert!(lifted.x.is_finite());
        assert_close(lifted, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_shading_is_pure() {
        let table = MaterialTable::standard();
        let input = fragment(1, [3, 1, 1, 1, 1]);
        assert_eq!(shade_fragment(table, &input), shade_fragment(table, &input));
    }

    #[test]
    fn test_specular_peaks_along_reflection() {
        let color = Vector3::from_value(1.0);
        let normal = Vector3::new(0.0, 0.0, 1.0);
        // reflect(-(1,1,1), +Z) = (-1,-1,1)
        let camera_dir = Vector3::new(-1.0, -1.0, 1.0);
        let lit = apply_lighting(color, normal, camera_dir);
        // (0.5 + 1 + 1) * 0.5
        assert_close(lit, Vector3::from_value(1.25));
    }

    #[test]
    fn test_zero_normal_does_not_produce_nan() {
        let lit = apply_lighting(Vector3::from_value(0.5), Vector3::zero(), Vector3::unit_z());
        assert!(lit.x.is_finite());
        assert_close(lit, Vector3::from_value(0.125));
    }
}
