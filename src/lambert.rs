//! Lambertian diffuse reflection
//!
//! **NOTE: the `lambert` feature must be enabled to use this code**
use std::f64::consts;

use crate::{utils, Vec2d, Vec3d};

/// Contains the data that is returned by [`sample_cosine_hemisphere`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffuseSample {
    /// # Incoming Direction
    /// Always lies in the upper hemisphere of the local shading frame
    pub omega_i: Vec3d,

    /// `cos(theta_i) / pi`
    pub pdf: f64,
}

/// Lambertian diffuse BSDF with the clamped cosine already multiplied in: `max(0, n.l) / pi`
#[must_use]
pub fn eval_diffuse_bsdf(shade_normal: Vec3d, light_dir: Vec3d) -> f64 {
    shade_normal.dot(light_dir).max(0.0) * consts::FRAC_1_PI
}

/// Samples a direction of the upper hemisphere proportional to the cosine
///
/// The weight `eval_diffuse_bsdf(n, omega_i) / pdf` of a sample is always `1.0`.
#[must_use]
pub fn sample_cosine_hemisphere(rand: Vec2d) -> DiffuseSample {
    let eps_theta_sample = rand.x.clamp(1e-6, 1.0); // prevent division by zero (division by pdf)
    let cos_theta = eps_theta_sample.sqrt();
    let sin_theta = (1.0 - eps_theta_sample).sqrt();
    let phi = 2.0 * consts::PI * rand.y;
    DiffuseSample {
        omega_i: utils::spherical_direction(sin_theta, cos_theta, phi),
        pdf: cos_theta * consts::FRAC_1_PI,
    }
}
