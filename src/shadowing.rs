//! Smith shadowing and masking
//!
//! Shadowing and masking are modeled as two independent per direction terms, i.e. the
//! uncorrelated form `G2(v, l, h) = G1(v, h) * G1(l, h)`. It slightly overestimates the occlusion
//! compared to the height correlated form but only needs one term per direction.
use crate::{
    utils::{self, FloatExt},
    NdfType, Roughness, ShadingFrame, Vec3d,
};

/// Computes the effective roughness of an anisotropic distribution as seen from `dir`.
///
/// `dir` is given in the local shading frame. It must not be parallel to the normal, the
/// azimuth is undefined in that case.
#[must_use]
pub fn effective_visible_roughness(dir: Vec3d, roughness: Roughness) -> f64 {
    let (cos_phi_sq, sin_phi_sq) = utils::cos_sin_phi_sq(dir, 1.0 - dir.z.sq());
    roughness
        .x
        .sq()
        .mul_add(cos_phi_sq, roughness.y.sq() * sin_phi_sq)
        .sqrt()
}

/// Smith's shadowing or masking term `G1` for a single direction.
///
/// # Arguments
/// * `dir` - view or light direction in the local shading frame
/// * `h` - microfacet normal in the local shading frame
/// * `roughness` - anisotropic roughness of the distribution
/// * `ndf_type` - which distribution to assume. [`NdfType::Phong`] has no dedicated term and uses
///     the GGX one.
///
/// # Return
/// The fraction of visible microfacets in `[0, 1]`. `0.0` if the microfacet faces away from `dir`,
/// `1.0` if `dir` is parallel to the normal.
#[must_use]
pub fn g_smith(dir: Vec3d, h: Vec3d, roughness: Roughness, ndf_type: NdfType) -> f64 {
    if dir.dot(h) * dir.z <= 0.0 {
        return 0.0;
    }
    let sin_theta_sq = 1.0 - dir.z.sq();
    if sin_theta_sq <= 0.0 {
        return 1.0;
    }
    let tan_theta = sin_theta_sq.sqrt() / dir.z.abs();
    let alpha = effective_visible_roughness(dir, roughness);

    match ndf_type {
        NdfType::Beckmann => {
            // rational fit of the Beckmann shadowing integral [Walter07]
            let a = 1.0 / (alpha * tan_theta);
            if a > 1.6 {
                return 1.0;
            }
            let a_sq = a.sq();
            let g = 3.535f64.mul_add(a, 2.181 * a_sq)
                / 2.577f64.mul_add(a_sq, 2.276f64.mul_add(a, 1.0));
            // the fit overshoots by a tiny amount right below 1.6
            g.min(1.0)
        }
        NdfType::Ggx | NdfType::Phong => {
            let root = alpha * tan_theta;
            2.0 / (1.0 + root.mul_add(root, 1.0).sqrt())
        }
    }
}

/// Combined shadowing and masking term of a microfacet BRDF.
///
/// `v` and `l` are given in world space and are projected into `frame`, while `h` has to be given
/// in the local shading frame already. Unless `transmissive` is set, `v` and `l` must lie on the
/// same side of the surface, otherwise `0.0` is returned.
#[must_use]
pub fn eval_microfacet_terms(
    frame: &ShadingFrame,
    h: Vec3d,
    v: Vec3d,
    l: Vec3d,
    roughness: Roughness,
    ndf_type: NdfType,
    transmissive: bool,
) -> f64 {
    let l_local = frame.to_local(l);
    let v_local = frame.to_local(v);

    if !transmissive && l_local.z * v_local.z <= 0.0 {
        return 0.0;
    }

    g_smith(v_local, h, roughness, ndf_type) * g_smith(l_local, h, roughness, ndf_type)
}
