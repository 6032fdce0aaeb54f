//! Lattice noise and fractal sums behind the marble and wood patterns
//!
//! These are the CPU twins of the functions in `procedural.wgsl`. They use
//! GLSL semantics (`fract`, `mix`, `smoothstep`) so a fragment evaluated here
//! matches what the GPU computes, up to floating point differences in `sin`.

use cgmath::{dot, Array, ElementWise, Vector2, Vector3, Vector4};

pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

pub fn mix3(a: Vector3<f32>, b: Vector3<f32>, t: f32) -> Vector3<f32> {
    a * (1.0 - t) + b * t
}

pub fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Maps `f` from `[in1, in2]` onto `[0, 1]`, clamped.
pub fn remap01(f: f32, in1: f32, in2: f32) -> f32 {
    saturate((f - in1) / (in2 - in1))
}

fn hermite(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

// Marble

pub fn hash2(p: Vector2<f32>) -> f32 {
    let h = dot(p, Vector2::new(127.1, 311.7));
    fract(h.sin() * 43758.5453123)
}

/// Smoothed 2D value noise in `[0, 1]`.
pub fn value_noise2(p: Vector2<f32>) -> f32 {
    let i = p.map(f32::floor);
    let f = p.map(fract);
    let u = f.map(hermite);

    mix(
        mix(hash2(i), hash2(i + Vector2::new(1.0, 0.0)), u.x),
        mix(
            hash2(i + Vector2::new(0.0, 1.0)),
            hash2(i + Vector2::new(1.0, 1.0)),
            u.x,
        ),
        u.y,
    )
}

pub const TURBULENCE_OCTAVES: usize = 7;
pub const TURBULENCE_START_SCALE: f32 = 2.0;
pub const TURBULENCE_SCALE_STEP: f32 = 2.5;

pub fn turbulence(p: Vector2<f32>) -> f32 {
    let mut t = 0.0;
    let mut scale = TURBULENCE_START_SCALE;
    for _ in 0..TURBULENCE_OCTAVES {
        t += (value_noise2(p * scale) - 0.5).abs() / scale;
        scale *= TURBULENCE_SCALE_STEP;
    }
    t
}

/// Sparse vein mask in `[0, 1]`.
pub fn marble_veins(p: Vector2<f32>) -> f32 {
    let veins = (p.x * 2.0 + turbulence(p) * 80.0).sin();
    smoothstep(0.9, 0.95, veins)
}

// Wood

pub fn hash31(p: Vector3<f32>) -> f32 {
    let mut p3 = (p * 0.1031).map(fract);
    let d = dot(p3, Vector3::new(p3.y, p3.z, p3.x).add_element_wise(333.3456));
    p3 = p3.add_element_wise(d);
    fract((p3.x + p3.y) * p3.z)
}

pub fn hash21(p: Vector2<f32>) -> f32 {
    hash31(Vector3::new(p.x, p.y, p.x))
}

/// Trilinear 3D value noise in `[0, 1]` with cubic Hermite weighting.
pub fn noise3(p: Vector3<f32>) -> f32 {
    const S: Vector3<f32> = Vector3::new(7.0, 157.0, 113.0);

    let ip = p.map(f32::floor);
    let f = p.map(fract).map(hermite);
    let corner = dot(ip, S);
    let h = Vector4::new(0.0, S.y, S.z, S.y + S.z).add_element_wise(corner);

    let lo = h.map(|v| fract(v.sin() * 43758.545));
    let hi = h.map(|v| fract((v + S.x).sin() * 43758.545));
    let h = lo * (1.0 - f.x) + hi * f.x;

    let x = mix(h.x, h.z, f.y);
    let y = mix(h.y, h.w, f.y);
    mix(x, y, f.z)
}

/// Unsigned fractal sum in `[0, 1]`. `roughness` is clamped to `[0, 1]`.
pub fn fbm(mut p: Vector3<f32>, octaves: u32, roughness: f32) -> f32 {
    let roughness = saturate(roughness);
    let mut sum = 0.0;
    let mut amp = 1.0;
    let mut tot = 0.0;
    for _ in 0..octaves {
        sum += amp * noise3(p);
        tot += amp;
        amp *= roughness;
        p *= 2.0;
    }
    sum / tot
}

fn random_pos(seed: f32) -> Vector3<f32> {
    Vector3::new(
        hash21(Vector2::new(seed, 0.0)),
        hash21(Vector2::new(seed, 1.0)),
        hash21(Vector2::new(seed, 2.0)),
    ) * 1e2
        + Vector3::from_value(1e2)
}

pub const DISTORTION_STRENGTH: f32 = 1.12;
pub const WOOD_FBM_OCTAVES: u32 = 8;
pub const WOOD_FBM_ROUGHNESS: f32 = 0.5;

/// Fractal noise sampled after pushing `p` along three noise-driven offsets.
pub fn fbm_distorted(p: Vector3<f32>) -> f32 {
    let warp = Vector3::new(
        noise3(p + random_pos(0.0)),
        noise3(p + random_pos(1.0)),
        noise3(p + random_pos(2.0)),
    );
    let p = p + (warp * 2.0).sub_element_wise(1.0) * DISTORTION_STRENGTH;
    fbm(p, WOOD_FBM_OCTAVES, WOOD_FBM_ROUGHNESS)
}

/// Signed ridged fractal: lacunarity drives frequency growth, dimension the
/// amplitude decay.
pub fn musgrave_fbm(mut p: Vector3<f32>, octaves: f32, dimension: f32, lacunarity: f32) -> f32 {
    let mut sum = 0.0;
    let mut amp = 1.0;
    let m = lacunarity.powf(-dimension);
    let mut i = 0.0;
    while i < octaves {
        let n = noise3(p) * 2.0 - 1.0;
        sum += n * amp;
        amp *= m;
        p *= lacunarity;
        i += 1.0;
    }
    sum
}

/// Wave noise along the X axis.
pub fn wave_fbm_x(p: Vector3<f32>) -> Vector3<f32> {
    let n = p.x * 20.0 + 0.4 * fbm(p * 3.0, 3, 3.0);
    Vector3::new(n.sin() * 0.5 + 0.5, p.y, p.z)
}

/// Wood material colour before gamma correction.
pub fn wood(
    p: Vector3<f32>,
    base: Vector3<f32>,
    mid: Vector3<f32>,
    highlight: Vector3<f32>,
) -> Vector3<f32> {
    let n1 = fbm_distorted(p.mul_element_wise(Vector3::new(7.8, 1.17, 1.17)));
    let n1 = mix(n1, 1.0, 0.2);
    let mut n2 = mix(
        musgrave_fbm(Vector3::from_value(n1 * 4.6), 8.0, 0.0, 2.5),
        n1,
        0.85,
    );
    let dirt = 1.0
        - musgrave_fbm(
            wave_fbm_x(p.mul_element_wise(Vector3::new(0.01, 0.15, 0.15))),
            15.0,
            0.26,
            2.4,
        ) * 0.4;
    let grain = 1.0
        - smoothstep(
            0.2,
            1.0,
            musgrave_fbm(p.mul_element_wise(Vector3::new(500.0, 6.0, 1.0)), 2.0, 2.0, 2.5),
        ) * 0.2;
    n2 *= dirt * grain;

    mix3(
        mix3(base, mid, remap01(n2, 0.19, 0.56)),
        highlight,
        remap01(n2, 0.56, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_unit_range(v: f32) -> bool {
        (-1e-5..=1.0 + 1e-5).contains(&v)
    }

    #[test]
    fn test_glsl_helpers() {
        assert_eq!(fract(1.25), 0.25);
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert_eq!(mix(2.0, 4.0, 0.5), 3.0);
        assert_eq!(smoothstep(0.9, 0.95, 0.5), 0.0);
        assert_eq!(smoothstep(0.9, 0.95, 1.0), 1.0);
        assert!((remap01(0.375, 0.19, 0.56) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_noise_stays_in_unit_range() {
        for i in 0..64 {
            let t = i as f32 * 0.37;
            let n2 = value_noise2(Vector2::new(t, -t * 1.3));
            let n3 = noise3(Vector3::new(t, t * 0.5, -t));
            assert!(in_unit_range(n2), "value_noise2 = {n2}");
            assert!(in_unit_range(n3), "noise3 = {n3}");
        }
    }

    #[test]
    fn test_noise_matches_hash_on_lattice_points() {
        let p = Vector2::new(3.0, -2.0);
        assert!((value_noise2(p) - hash2(p)).abs() < 1e-6);
    }

    #[test]
    fn test_fbm_is_normalised() {
        for i in 0..16 {
            let p = Vector3::new(i as f32 * 0.71, 0.3, -0.2 * i as f32);
            let v = fbm(p, 8, 0.5);
            assert!(in_unit_range(v), "fbm = {v}");
        }
    }

    #[test]
    fn test_musgrave_with_zero_octaves_is_zero() {
        assert_eq!(musgrave_fbm(Vector3::new(1.0, 2.0, 3.0), 0.0, 1.0, 2.0), 0.0);
    }

    #[test]
    fn test_veins_are_a_mask() {
        for i in 0..32 {
            let v = marble_veins(Vector2::new(i as f32 * 0.9, i as f32 * 0.4));
            assert!(in_unit_range(v));
        }
    }
}
