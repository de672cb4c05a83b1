//! Normal distribution functions (NDFs)
//!
//! An NDF `D(m)` describes the statistical distribution of microfacet normals `m` and is the `D`
//! term of a Cook-Torrance style microfacet BRDF. Every distribution in here is normalized such
//! that the projected microfacet area equals the macro surface area:
//!
//! `integral over the hemisphere of D(m) * m.z dm = 1`
//!
//! The anisotropic variants expect the half vector in the local shading frame and a [`Roughness`]
//! whose `x` component is aligned with the tangent.
use std::f64::consts;

use crate::{utils::FloatExt, NdfType, Roughness, Vec3d};

/// Maps a roughness in `(0, 1]` to a Blinn-Phong exponent
#[must_use]
pub fn convert_roughness_to_shininess(roughness: f64) -> f64 {
    2.0 / roughness.sq() - 2.0
}

/// Inverse of [`convert_roughness_to_shininess`]
#[must_use]
pub fn convert_shininess_to_roughness(shininess: f64) -> f64 {
    (2.0 / (shininess + 2.0)).sqrt().clamp(0.0, 1.0)
}

fn phong_ndf(n_dot_h: f64, roughness: f64) -> f64 {
    // a zero exponent at roughness 1.0 would give a constant lobe over the whole sphere
    if n_dot_h <= 0.0 {
        return 0.0;
    }
    let spec_power = convert_roughness_to_shininess(roughness);
    let normalization = (spec_power + 2.0) / (2.0 * consts::PI);
    n_dot_h.powf(spec_power) * normalization
}

/// Blinn-Phong normal distribution function. The half vector is computed from `v` and `l`.
///
/// Returns `0.0` if `v` and `l` point in opposite directions.
#[must_use]
pub fn eval_phong_distribution(n: Vec3d, v: Vec3d, l: Vec3d, roughness: f64) -> f64 {
    let Some(h) = (l + v).try_normalize() else {
        return 0.0;
    };
    phong_ndf(n.dot(h), roughness)
}

/// Isotropic Beckmann normal distribution function
#[must_use]
pub fn eval_beckmann_distribution(n: Vec3d, h: Vec3d, roughness: f64) -> f64 {
    let a2 = roughness.sq();
    let n_dot_h = n.dot(h);
    if n_dot_h <= 1e-10 {
        return 0.0;
    }
    let n_dot_h2 = n_dot_h.sq();
    let exponent = ((1.0 - n_dot_h2) / (a2 * n_dot_h2)).max(0.0);
    (-exponent).exp() / (consts::PI * a2 * n_dot_h2.sq())
}

/// Anisotropic Beckmann normal distribution function. `h` must be given in the local shading
/// frame.
#[must_use]
pub fn eval_beckmann_distribution_aniso(h: Vec3d, roughness: Roughness) -> f64 {
    if h.z <= 1e-10 {
        return 0.0;
    }
    let n_dot_h2 = h.z.sq();
    let exponent = ((h.x / roughness.x).sq() + (h.y / roughness.y).sq()) / n_dot_h2;
    (-exponent).exp() / (consts::PI * roughness.x * roughness.y * n_dot_h2.sq())
}

/// Standard deviation of the Beckmann distribution as a cone apex angle in the parallel plane
/// domain
#[must_use]
pub fn beckmann_std_dev_angle(roughness: f64) -> f64 {
    (consts::FRAC_1_SQRT_2 * roughness).atan()
}

/// Approximates the direction of the off specular peak of a Beckmann lobe.
///
/// # Arguments
/// * `n` - the surface normal
/// * `r` - the mirror direction
///
/// The result is not normalized. It is meant for fetching from a cube map.
#[must_use]
pub fn beckmann_dominant_direction(n: Vec3d, r: Vec3d, roughness: f64) -> Vec3d {
    let smoothness = (1.0 - roughness).clamp(0.0, 1.0);
    let lerp_factor = smoothness * (smoothness.sqrt() + roughness);
    n.lerp(r, lerp_factor)
}

/// Isotropic GGX normal distribution function.
///
/// **NOTE: this formulation has been reported as producing wrong results and should be treated
/// as suspect.** For unit half vectors in the upper hemisphere it agrees with
/// [`eval_ggx_distribution_aniso`] with equal roughness values. Half vectors below the surface
/// are clamped to the horizon instead of being rejected, so they receive a positive density.
/// Prefer [`eval_ggx_distribution_aniso`].
#[must_use]
pub fn eval_ggx_distribution(n: Vec3d, h: Vec3d, roughness: f64) -> f64 {
    let a2 = roughness.sq();
    let n_dot_h = n.dot(h).clamp(0.0, 1.0);
    let denom = (n_dot_h * a2 - n_dot_h).mul_add(n_dot_h, 1.0);
    a2 / (consts::PI * denom.sq())
}

/// Anisotropic GGX normal distribution function. `h` must be given in the local shading frame.
///
/// Stays finite if one of the roughness components is zero. If both are zero the distribution
/// degenerates to a mirror and `0.0` is returned for every direction.
#[must_use]
pub fn eval_ggx_distribution_aniso(h: Vec3d, roughness: Roughness) -> f64 {
    if h.z <= 1e-10 {
        return 0.0;
    }
    // divide by the larger roughness instead of the smaller one
    let aniso_u = if roughness.y < roughness.x {
        roughness.y / roughness.x
    } else {
        1.0
    };
    let aniso_v = if roughness.x < roughness.y {
        roughness.x / roughness.y
    } else {
        1.0
    };
    let r = roughness.x.min(roughness.y);
    let root = (h.x * aniso_u).sq() + (h.y * aniso_v).sq() + (h.z * r).sq();
    if root <= 0.0 {
        return 0.0;
    }
    r.sq() * aniso_u * aniso_v / (consts::PI * root.sq())
}

/// Evaluates the normal distribution function selected by `ndf_type`. `h` must be given in the
/// local shading frame.
///
/// [`NdfType::Phong`] is isotropic and only uses `roughness.x`.
#[must_use]
pub fn eval_ndf(ndf_type: NdfType, h: Vec3d, roughness: Roughness) -> f64 {
    match ndf_type {
        NdfType::Beckmann => eval_beckmann_distribution_aniso(h, roughness),
        NdfType::Ggx => eval_ggx_distribution_aniso(h, roughness),
        NdfType::Phong => phong_ndf(h.z, roughness.x),
    }
}
