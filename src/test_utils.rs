pub trait ApproxEqual: Copy {
    fn equals_approx(self, other: Self, eps: Self, eps_rel: Self) -> bool;
    fn equals_approx_abs(self, other: Self, eps: Self) -> bool;
}

macro_rules! assert_eq_approx {
    ($lhs:expr, $rhs:expr, $eps_abs:expr, $eps_rel:expr) => {
        assert!(
            $crate::test_utils::ApproxEqual::equals_approx($lhs, $rhs, $eps_abs, $eps_rel),
            r#"assert_eq_approx failed:
    {}: {:?}
    {}: {:?}
    {} (maximum absolute error): {:?}
    {} (maximum relative error): {:?}"#,
            stringify!($lhs),
            $lhs,
            stringify!($rhs),
            $rhs,
            stringify!($eps_abs),
            $eps_abs,
            stringify!($eps_rel),
            $eps_rel,
        );
    };

    ($lhs:expr, $rhs:expr, $eps_abs: expr, $eps_rel:expr, $($arg:tt)+) => {
        assert!($crate::test_utils::ApproxEqual::equals_approx($lhs, $rhs, $eps_abs, $eps_rel), $($arg)*);
    }
}

macro_rules! assert_eq_approx_abs {
    ($lhs:expr, $rhs:expr, $eps_abs:expr) => {
        assert!(
            $crate::test_utils::ApproxEqual::equals_approx_abs($lhs, $rhs, $eps_abs),
            r#"assert_eq_abs failed:
    {}: {:?}
    {}: {:?}
    {} (maximum absolute error): {:?}"#,
            stringify!($lhs),
            $lhs,
            stringify!($rhs),
            $rhs,
            stringify!($eps_abs),
            $eps_abs,
        )
    };

    ($lhs:expr, $rhs:expr, $eps_abs:expr, $($arg:tt)+) => {
        assert!($crate::test_utils::ApproxEqual::equals_approx_abs($lhs, $rhs, $eps_abs),
        $($arg)*);
    };
}

macro_rules! assert_in_range {
    ($value:expr, $lower:expr, $upper:expr) => {
        assert!(
            $lower <= $value && $value <= $upper,
            r#"assert_in_range failed:
    {} (value): {:?}
    {} (lower bound): {:?}
    {} (upper bound): {:?}"#,
            stringify!($value),
            $value,
            stringify!($lower),
            $lower,
            stringify!($upper),
            $upper
        )
    };
}

impl ApproxEqual for f64 {
    fn equals_approx(self, other: Self, eps: Self, eps_rel: Self) -> bool {
        if self.equals_approx_abs(other, eps) {
            true
        } else {
            let diff = (self - other).abs();
            let max = self.abs().max(other.abs());
            diff <= max * eps_rel
        }
    }

    fn equals_approx_abs(self, other: Self, eps: Self) -> bool {
        #[allow(clippy::float_cmp)]
        if self == other {
            true
        } else {
            (self - other).abs() <= eps
        }
    }
}

impl ApproxEqual for Vec3d {
    fn equals_approx_abs(self, other: Self, eps: Self) -> bool {
        self.x.equals_approx_abs(other.x, eps.x)
            && self.y.equals_approx_abs(other.y, eps.y)
            && self.z.equals_approx_abs(other.z, eps.z)
    }

    fn equals_approx(self, other: Self, eps_abs: Self, eps_rel: Self) -> bool {
        self.x.equals_approx(other.x, eps_abs.x, eps_rel.x)
            && self.y.equals_approx(other.y, eps_abs.y, eps_rel.y)
            && self.z.equals_approx(other.z, eps_abs.z, eps_rel.z)
    }
}

use std::f64::consts;

pub(crate) use assert_eq_approx;
pub(crate) use assert_eq_approx_abs;
pub(crate) use assert_in_range;

use crate::{utils::FloatExt, Vec2d, Vec3d};

pub trait SamplerExt {
    fn vec2d(&mut self) -> Vec2d;
}

impl SamplerExt for fastrand::Rng {
    fn vec2d(&mut self) -> Vec2d {
        Vec2d::new(self.f64(), self.f64())
    }
}

/** sample a direction with density 1 / 4pi */
pub fn spherical_sample(rd: &mut fastrand::Rng) -> Vec3d {
    let u = rd.f64();
    let v = rd.f64();
    spherical_sample_uv(u, v)
}

/** sample a direction of the upper hemisphere with density 1 / 2pi */
pub fn hemispherical_sample(rd: &mut fastrand::Rng) -> Vec3d {
    let omega = spherical_sample(rd);
    Vec3d::new(omega.x, omega.y, omega.z.abs())
}

fn spherical_sample_uv(u: f64, v: f64) -> Vec3d {
    #[allow(clippy::suboptimal_flops)]
    let cos_theta = 2.0 * u - 1.0;
    let sin_theta = (1.0 - cos_theta.sq()).max(0.0).sqrt();
    let phi = v * 2.0 * consts::PI;
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3d::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

/// Integrates `f` over the upper hemisphere with the midpoint rule in polar coordinates.
/// `f` receives the unit direction.
#[allow(clippy::cast_precision_loss)]
pub fn integrate_hemisphere(
    theta_steps: usize,
    phi_steps: usize,
    f: impl Fn(Vec3d) -> f64,
) -> f64 {
    let d_theta = consts::FRAC_PI_2 / theta_steps as f64;
    let d_phi = 2.0 * consts::PI / phi_steps as f64;
    let mut sum = 0.0;
    for i in 0..theta_steps {
        let theta = (i as f64 + 0.5) * d_theta;
        let (sin_theta, cos_theta) = theta.sin_cos();
        let mut ring = 0.0;
        for j in 0..phi_steps {
            let phi = (j as f64 + 0.5) * d_phi;
            let (sin_phi, cos_phi) = phi.sin_cos();
            ring += f(Vec3d::new(
                sin_theta * cos_phi,
                sin_theta * sin_phi,
                cos_theta,
            ));
        }
        sum += ring * sin_theta;
    }
    sum * d_theta * d_phi
}

/// Mean and standard error of a Monte Carlo estimate
#[allow(clippy::cast_precision_loss)]
pub fn mean_and_std_error(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut n = 0_usize;
    let mut sum = 0.0;
    let mut sum_of_squared = 0.0;
    for v in values {
        n += 1;
        sum += v;
        sum_of_squared += v.sq();
    }
    let n_f = n as f64;
    let mean = sum / n_f;
    let variance = (sum_of_squared / n_f - mean.sq()) * n_f / (n_f - 1.0);
    (mean, (variance.max(0.0) / n_f).sqrt())
}
