use crate::Vec3d;

pub trait FloatExt {
    fn sq(self) -> Self;
}

impl FloatExt for f64 {
    fn sq(self) -> Self {
        self * self
    }
}

#[cfg(feature = "sampling")]
/// reflects `vec` about `n`. Both vectors point away from the surface
pub fn reflect(n: Vec3d, vec: Vec3d) -> Vec3d {
    n * (n.dot(vec) * 2.0) - vec
}

pub fn pow5(v: f64) -> f64 {
    let v2 = v * v;
    v2 * v2 * v
}

/// `cos^2(phi)` and `sin^2(phi)` of the azimuth of `dir`. `sin_theta_sq` must not be zero
pub fn cos_sin_phi_sq(dir: Vec3d, sin_theta_sq: f64) -> (f64, f64) {
    let recip = 1.0 / sin_theta_sq;
    (dir.x.sq() * recip, dir.y.sq() * recip)
}

#[cfg(any(feature = "lambert", feature = "sampling"))]
/// maps polar coordinates to a unit vector of the local shading frame
pub fn spherical_direction(sin_theta: f64, cos_theta: f64, phi: f64) -> Vec3d {
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3d {
        x: sin_theta * cos_phi,
        y: sin_theta * sin_phi,
        z: cos_theta,
    }
}
