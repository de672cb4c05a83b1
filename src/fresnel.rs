//! Fresnel terms: the fraction of light reflected at a smooth interface
//!
//! None of these functions account for polarization. They return the average of the
//! perpendicular and parallel reflectances.
use crate::utils::{self, FloatExt};

/// Schlick's approximation for the reflectance of a dielectric.
///
/// # Arguments
/// * `cos_theta` - cosine between the half vector and the view (or light) direction, in `[0, 1]`
/// * `ior` - relative index of refraction of the interface
#[must_use]
pub fn dielectric_fresnel_schlick(cos_theta: f64, ior: f64) -> f64 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).sq();
    #[allow(clippy::suboptimal_flops)]
    {
        r0 + (1.0 - r0) * utils::pow5(1.0 - cos_theta)
    }
}

/// Fresnel reflectance of a dielectric interface given both the incident and the refracted
/// cosine. Avoids the square root of [`dielectric_fresnel`] if the refracted cosine is already
/// known.
///
/// # Arguments
/// * `n_dot_v` - cosine of the incident direction
/// * `n_dot_l` - cosine of the refracted direction
/// * `ior` - relative index of refraction of the interface
#[must_use]
pub fn dielectric_fresnel_fast(n_dot_v: f64, n_dot_l: f64, ior: f64) -> f64 {
    let denom_s = ior.mul_add(n_dot_l, n_dot_v);
    let denom_p = ior.mul_add(n_dot_v, n_dot_l);
    if denom_s == 0.0 || denom_p == 0.0 {
        // grazing incidence, nothing is transmitted
        return 1.0;
    }
    // perpendicular component
    let rs = ior.mul_add(-n_dot_l, n_dot_v) / denom_s;
    // parallel component
    let rp = ior.mul_add(n_dot_v, -n_dot_l) / denom_p;
    (rs.sq() + rp.sq()) * 0.5
}

/// Exact Fresnel reflectance of a planar interface between two dielectrics.
///
/// A negative `n_dot_v` means the direction lies inside the denser medium. In that case the
/// relative index of refraction is inverted and total internal reflection may happen, which
/// yields exactly `1.0`.
///
/// # Arguments
/// * `n_dot_v` - cosine of the incident direction, in `[-1, 1]`
/// * `ior` - index of refraction of the medium below the surface relative to the one above
#[must_use]
pub fn dielectric_fresnel(n_dot_v: f64, ior: f64) -> f64 {
    let eta = if n_dot_v >= 0.0 { ior } else { 1.0 / ior };
    let c = n_dot_v.abs();

    // eta^2 * cos^2(theta_t)
    let g2 = eta.sq() - 1.0 + c.sq();
    if g2 <= 0.0 {
        // total internal reflection
        return 1.0;
    }
    let g = g2.sqrt();
    if g + c == 0.0 {
        return 1.0;
    }
    let rs = (c - g) / (c + g);
    let rp = eta.sq().mul_add(c, -g) / eta.sq().mul_add(c, g);
    (rs.sq() + rp.sq()) * 0.5
}

/// Fresnel reflectance of an interface between a dielectric (usually air) and a conductor with
/// the complex index of refraction `ior + i * kappa`.
///
/// The cosine is clamped to `[0, 1]` since conductors do not transmit light.
#[must_use]
pub fn conductor_fresnel(n_dot_v: f64, ior: f64, kappa: f64) -> f64 {
    let total_ior_sq = ior.mul_add(ior, kappa.sq());
    let c = n_dot_v.clamp(0.0, 1.0);
    let c2 = c.sq();
    let two_ior_c = 2.0 * ior * c;

    let reduced = total_ior_sq * c2;
    let rp2 = (reduced - two_ior_c + 1.0) / (reduced + two_ior_c + 1.0);

    let denom_s = total_ior_sq + two_ior_c + c2;
    if denom_s <= 0.0 {
        // vanishing index at grazing incidence
        return 1.0;
    }
    let rs2 = (total_ior_sq - two_ior_c + c2) / denom_s;
    (rp2 + rs2) * 0.5
}
