#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::suboptimal_flops)]
#![deny(clippy::return_self_not_must_use)]
#![allow(clippy::similar_names)]
#![deny(clippy::semicolon_if_nothing_returned)]
#![deny(clippy::must_use_candidate)]
#![deny(clippy::double_must_use)]
#![deny(clippy::use_self)]
#![deny(clippy::unreadable_literal)]
#![deny(clippy::explicit_iter_loop)]
// these are lints to enable later
#![allow(clippy::cast_lossless)]

//! Analytic shading math for microfacet BSDFs: Fresnel terms, normal distribution functions,
//! Smith shadowing/masking and importance sampling.
//!
//! # Design Decisions
//! Every routine is a pure function. There is no hidden state, no caching and no internal random
//! generator, so everything can be called from as many threads as you like.
//!
//! Calculations are done exclusively in [f64]s. Microfacet lobes can be extremely spiky and the
//! additional precision keeps the sampling weights well behaved for low roughness values.
//!
//! Directions are expressed in a local shading frame. The surface is assumed to be the xy-plane
//! and the z-vector is assumed to be the normal. Use [`ShadingFrame`] to bring world space
//! directions into that frame. Directions must be normalized by the caller, nothing in this crate
//! re-normalizes its input.
//!
//! Degenerate configurations never panic. They are reported through sentinel values instead:
//! * total internal reflection yields a reflectance of exactly `1.0`
//! * a sample below the hemisphere or with an underflowing density has weight `0.0` and pdf `0.0`
//!     (see [`MicrofacetSample::is_valid`])
//! * back facing microfacets are fully shadowed (`0.0`)
//! * directions parallel to the normal are never shadowed (`1.0`)
//!
//! `sample_...` functions are deterministic. You are responsible for generating [f64]s in the
//! range of `0.0..1.0` and passing them as a [Vec2d].
//!
//! This crate is built on [glam] for a simple but fast vector math library at the core.
//!
//! # References
//! * Robert L. Cook and Kenneth E. Torrance. A reflectance model for computer graphics. *ACM
//!     Transactions on Graphics, 1(1):7–24,* 1982.
//! * Bruce Walter, Stephen R. Marschner, Hongsong Li, and Kenneth E. Torrance. Microfacet models for refraction through rough surfaces. In *Proceedings of the Eurographics Symposium on Rendering,* 2007.
//! * Eric Heitz. Understanding the masking-shadowing function in microfacet-based brdfs.
//!     *Journal of Computer Graphics Techniques, 3(2):32–91,* 2014.
//! * Christophe Schlick. An inexpensive BRDF model for physically-based rendering. *Computer
//!     Graphics Forum, 13(3):233–246,* 1994.
//! * Bruce G. Smith. Geometrical shadowing of a random rough surface. *IEEE Transactions on
//!     Antennas and Propagation, 15(5):668–671,* 1967.

mod core;

pub use core::{MicrofacetSample, NdfType, Roughness, ShadingFrame, Vec2d, Vec3d};

#[cfg(test)]
pub(crate) mod test_utils;
pub(crate) mod utils;

pub mod distribution;
pub mod fresnel;
#[cfg(feature = "lambert")]
pub mod lambert;
#[cfg(feature = "sampling")]
pub mod sampling;
pub mod shadowing;
