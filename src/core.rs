/// used for direction vectors
pub type Vec3d = glam::f64::DVec3;
/// used for random pairs and anisotropic roughness
pub type Vec2d = glam::f64::DVec2;

/// Anisotropic roughness. `x` is the roughness along the tangent, `y` along the bitangent.
/// Both components should be in `(0, 1]`.
pub type Roughness = Vec2d;

/// The microfacet normal distribution a routine should assume
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NdfType {
    /// Gaussian distribution of microfacet slopes
    Beckmann,
    /// Trowbridge-Reitz distribution, heavier tails than [`NdfType::Beckmann`]
    Ggx,
    /// Blinn-Phong lobe. There is no dedicated shadowing term for it, see
    /// [`crate::shadowing::g_smith`]
    Phong,
}

/// Contains the data that is returned by the sampling routines in [`crate::sampling`]
///
/// A sample is only usable if [`MicrofacetSample::is_valid`] returns `true`. Invalid samples
/// have both `weight` and `pdf` set to exactly `0.0` and must not contribute to an estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MicrofacetSample {
    /// The sampled microfacet normal
    pub m: Vec3d,

    /// # Incoming Direction
    /// `omega_o` reflected about `m`
    pub omega_i: Vec3d,

    /// The probability density of choosing `omega_i` given `omega_o`, with respect to solid angle
    pub pdf: f64,

    /// The importance sampling weight `D(m) * dot(omega_o, m) / (pdf_m * omega_o.z)`. Multiply
    /// with the Fresnel and shadowing terms to get `bsdf * cos(theta_i) / pdf`.
    pub weight: f64,
}

impl MicrofacetSample {
    #[cfg_attr(not(feature = "sampling"), allow(dead_code))]
    pub(crate) const fn invalid(m: Vec3d, omega_i: Vec3d) -> Self {
        Self {
            m,
            omega_i,
            pdf: 0.0,
            weight: 0.0,
        }
    }

    /// Returns `false` if the sampled direction lies below the hemisphere or the density
    /// underflowed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.pdf > 0.0 && self.weight > 0.0
    }
}

/// Orthonormal basis of a shading point. Brings world space directions into the local frame
/// where the normal is the z-axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingFrame {
    pub tangent: Vec3d,
    pub bitangent: Vec3d,
    pub normal: Vec3d,
}

impl ShadingFrame {
    /// Builds an arbitrary frame around `normal`
    #[must_use]
    pub fn from_normal(normal: Vec3d) -> Self {
        let mut tan = Vec3d::Z;
        if normal.dot(tan).abs() > 0.9999 {
            tan = Vec3d::Y;
        }
        let bitangent = normal.cross(tan).normalize();
        let tangent = bitangent.cross(normal).normalize();
        Self {
            tangent,
            bitangent,
            normal,
        }
    }

    #[must_use]
    pub fn to_local(&self, v: Vec3d) -> Vec3d {
        Vec3d::new(v.dot(self.tangent), v.dot(self.bitangent), v.dot(self.normal))
    }

    #[must_use]
    pub fn to_world(&self, v: Vec3d) -> Vec3d {
        self.tangent * v.x + self.bitangent * v.y + self.normal * v.z
    }
}

impl Default for ShadingFrame {
    fn default() -> Self {
        Self {
            tangent: Vec3d::X,
            bitangent: Vec3d::Y,
            normal: Vec3d::Z,
        }
    }
}
