//! Importance sampling of the Beckmann and GGX distributions
//!
//! Both samplers draw a microfacet normal `m` proportional to `D(m) * m.z` and reflect the
//! outgoing direction about it. The returned [`MicrofacetSample::weight`] is
//!
//! `weight = D(m) * dot(omega_o, m) / (pdf_m * omega_o.z)`
//!
//! which is the Monte Carlo weight `bsdf * cos(theta_i) / pdf` of a Cook-Torrance BRDF without its
//! Fresnel and shadowing terms. Multiply it with both to get the full contribution. The returned
//! pdf is converted from the measure of the microfacet normal to the solid angle of `omega_i`
//! with the Jacobian `1 / (4 * dot(omega_i, m))` of the reflection.
//!
//! The polar angle is sampled from the isotropic distribution with `roughness.x`. For anisotropic
//! roughness values the weight compensates for the mismatch.
//!
//! **NOTE: both samplers assume `omega_o.z > 0`.** Always check
//! [`MicrofacetSample::is_valid`] before using a sample.
use std::f64::consts;

use crate::{
    distribution,
    utils::{self, FloatExt},
    MicrofacetSample, Roughness, Vec2d, Vec3d,
};

/// densities below this value are treated as zero
const PDF_EPSILON: f64 = 1e-20;

/// density of the sampled microfacet normal with respect to solid angle
fn beckmann_normal_pdf(cos_theta: f64, tan_theta_sq: f64, alpha: f64) -> f64 {
    let alpha_sq = alpha.sq();
    (-tan_theta_sq / alpha_sq).exp() / (consts::PI * alpha_sq * cos_theta.powi(3))
}

/// density of the sampled microfacet normal with respect to solid angle
fn ggx_normal_pdf(cos_theta: f64, tan_theta_sq: f64, alpha: f64) -> f64 {
    let alpha_sq = alpha.sq();
    let temp = 1.0 + tan_theta_sq / alpha_sq;
    consts::FRAC_1_PI / (alpha_sq * cos_theta.powi(3) * temp.sq())
}

fn flush_pdf(pdf: f64) -> f64 {
    if pdf.is_nan() || pdf < PDF_EPSILON {
        0.0
    } else {
        pdf
    }
}

fn sample_reflection(
    omega_o: Vec3d,
    roughness: Roughness,
    phi_sample: f64,
    tan_theta_sq: f64,
    normal_pdf: fn(f64, f64, f64) -> f64,
    ndf: fn(Vec3d, Roughness) -> f64,
) -> MicrofacetSample {
    debug_assert!(omega_o.is_normalized());

    let phi = 2.0 * consts::PI * phi_sample;
    let cos_theta = 1.0 / (1.0 + tan_theta_sq).sqrt();
    let pdf_m = flush_pdf(normal_pdf(cos_theta, tan_theta_sq, roughness.x));

    let sin_theta = (1.0 - cos_theta.sq()).max(0.0).sqrt();
    let m = utils::spherical_direction(sin_theta, cos_theta, phi);

    let omega_i = utils::reflect(m, omega_o);
    if omega_i.z <= 0.0 || pdf_m <= 0.0 {
        return MicrofacetSample::invalid(m, omega_i);
    }

    let weight = ndf(m, roughness) * omega_o.dot(m) / (pdf_m * omega_o.z);
    if !weight.is_finite() || weight <= 0.0 {
        return MicrofacetSample::invalid(m, omega_i);
    }

    MicrofacetSample {
        m,
        omega_i,
        // Cook-Torrance Jacobian
        pdf: pdf_m / (4.0 * omega_i.dot(m)),
        weight,
    }
}

fn reflection_pdf(
    omega_o: Vec3d,
    omega_i: Vec3d,
    roughness: Roughness,
    normal_pdf: fn(f64, f64, f64) -> f64,
    ndf: fn(Vec3d, Roughness) -> f64,
) -> f64 {
    if omega_o.z <= 0.0 || omega_i.z <= 0.0 {
        return 0.0;
    }
    let Some(m) = (omega_o + omega_i).try_normalize() else {
        return 0.0;
    };
    let cos_theta = m.z;
    let tan_theta_sq = (1.0 - cos_theta.sq()).max(0.0) / cos_theta.sq();
    let pdf_m = flush_pdf(normal_pdf(cos_theta, tan_theta_sq, roughness.x));
    if pdf_m <= 0.0 || ndf(m, roughness) <= 0.0 {
        return 0.0;
    }
    pdf_m / (4.0 * omega_i.dot(m))
}

/// Samples the microfacet BRDF using the Beckmann normal distribution function
///
/// # Arguments
/// * `omega_o` - The outgoing direction towards the camera, in the local shading frame
/// * `roughness` - Material roughness
/// * `rand` - Two uniformly distributed random numbers in `[0, 1)`
///
/// # Return
/// See [`MicrofacetSample`]
#[must_use]
pub fn sample_beckmann_distribution(
    omega_o: Vec3d,
    roughness: Roughness,
    rand: Vec2d,
) -> MicrofacetSample {
    let tan_theta_sq = -roughness.x.sq() * (1.0 - rand.x).ln();
    sample_reflection(
        omega_o,
        roughness,
        rand.y,
        tan_theta_sq,
        beckmann_normal_pdf,
        distribution::eval_beckmann_distribution_aniso,
    )
}

/// Samples the microfacet BRDF using the GGX normal distribution function
///
/// # Arguments
/// * `omega_o` - The outgoing direction towards the camera, in the local shading frame
/// * `roughness` - Material roughness
/// * `rand` - Two uniformly distributed random numbers in `[0, 1)`
///
/// # Return
/// See [`MicrofacetSample`]
#[must_use]
pub fn sample_ggx_distribution(
    omega_o: Vec3d,
    roughness: Roughness,
    rand: Vec2d,
) -> MicrofacetSample {
    let tan_theta_sq = roughness.x.sq() * rand.x / (1.0 - rand.x);
    sample_reflection(
        omega_o,
        roughness,
        rand.y,
        tan_theta_sq,
        ggx_normal_pdf,
        distribution::eval_ggx_distribution_aniso,
    )
}

/// Returns the probability density of [`sample_beckmann_distribution`] choosing `omega_i` given
/// `omega_o`
#[must_use]
pub fn beckmann_sample_pdf(omega_o: Vec3d, omega_i: Vec3d, roughness: Roughness) -> f64 {
    reflection_pdf(
        omega_o,
        omega_i,
        roughness,
        beckmann_normal_pdf,
        distribution::eval_beckmann_distribution_aniso,
    )
}

/// Returns the probability density of [`sample_ggx_distribution`] choosing `omega_i` given
/// `omega_o`
#[must_use]
pub fn ggx_sample_pdf(omega_o: Vec3d, omega_i: Vec3d, roughness: Roughness) -> f64 {
    reflection_pdf(
        omega_o,
        omega_i,
        roughness,
        ggx_normal_pdf,
        distribution::eval_ggx_distribution_aniso,
    )
}
