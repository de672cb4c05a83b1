// A small forward pathtracer in the spirit of raytracing in a weekend.
// There is no light sampling, every path just bounces until it escapes to the sky.
// It shows how the sampling, fresnel and shadowing routines fit together.
use microfacet::{
    fresnel, lambert, sampling, shadowing, MicrofacetSample, NdfType, Roughness, ShadingFrame,
    Vec2d, Vec3d,
};
use rayon::prelude::*;

/// linear rgb radiance or reflectance
type Rgb = Vec3d;

#[derive(Copy, Clone)]
struct Sphere {
    center: Vec3d,
    radius: f64,
}

#[derive(Copy, Clone)]
struct Ray {
    origin: Vec3d,
    direction: Vec3d,
}

#[derive(Copy, Clone)]
struct HitRecord {
    t: f64, // hit distance
    pos: Vec3d,
    normal: Vec3d,
}

impl Sphere {
    fn hit(&self, ray: Ray, ray_tmin: f64, ray_tmax: f64) -> Option<HitRecord> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if root <= ray_tmin || ray_tmax <= root {
            root = (-half_b + sqrtd) / a;
            if root <= ray_tmin || ray_tmax <= root {
                return None;
            }
        }

        let pos = ray.origin + ray.direction * root;
        Some(HitRecord {
            t: root,
            pos,
            normal: (pos - self.center) / self.radius,
        })
    }
}

#[derive(Copy, Clone)]
enum Material {
    Diffuse {
        albedo: Rgb,
    },
    /// rough metal, `ior` and `kappa` are given per color channel
    Conductor {
        ndf_type: NdfType,
        roughness: Roughness,
        ior: Rgb,
        kappa: Rgb,
    },
    /// diffuse base under a rough dielectric coating
    Plastic {
        albedo: Rgb,
        roughness: Roughness,
        ior: f64,
    },
}

fn sample_microfacet(
    ndf_type: NdfType,
    omega_o: Vec3d,
    roughness: Roughness,
    rand: Vec2d,
) -> MicrofacetSample {
    match ndf_type {
        NdfType::Beckmann => sampling::sample_beckmann_distribution(omega_o, roughness, rand),
        NdfType::Ggx | NdfType::Phong => {
            sampling::sample_ggx_distribution(omega_o, roughness, rand)
        }
    }
}

impl Material {
    /// Samples the incoming direction in the local frame and returns it together with
    /// `bsdf * cos(theta_i) / pdf`
    fn sample(
        &self,
        frame: &ShadingFrame,
        omega_o: Vec3d,
        rd: &mut fastrand::Rng,
    ) -> Option<(Vec3d, Rgb)> {
        let local_o = frame.to_local(omega_o);
        if local_o.z <= 0.0 {
            return None;
        }
        let rand = Vec2d::new(rd.f64(), rd.f64());

        match *self {
            Self::Diffuse { albedo } => {
                let sample = lambert::sample_cosine_hemisphere(rand);
                Some((sample.omega_i, albedo))
            }
            Self::Conductor {
                ndf_type,
                roughness,
                ior,
                kappa,
            } => {
                let sample = sample_microfacet(ndf_type, local_o, roughness, rand);
                if !sample.is_valid() {
                    return None;
                }
                let cos_theta = local_o.dot(sample.m);
                let reflectance = Rgb::new(
                    fresnel::conductor_fresnel(cos_theta, ior.x, kappa.x),
                    fresnel::conductor_fresnel(cos_theta, ior.y, kappa.y),
                    fresnel::conductor_fresnel(cos_theta, ior.z, kappa.z),
                );
                let g = shadowing::eval_microfacet_terms(
                    frame,
                    sample.m,
                    omega_o,
                    frame.to_world(sample.omega_i),
                    roughness,
                    ndf_type,
                    false,
                );
                Some((sample.omega_i, reflectance * sample.weight * g))
            }
            Self::Plastic {
                albedo,
                roughness,
                ior,
            } => {
                // the coating is picked with the reflectance at the macro normal, the lobe
                // itself is weighted with the reflectance at the sampled microfacet
                let coat = fresnel::dielectric_fresnel(local_o.z, ior);
                if rd.f64() < coat {
                    let sample = sampling::sample_ggx_distribution(local_o, roughness, rand);
                    if !sample.is_valid() {
                        return None;
                    }
                    let reflectance = fresnel::dielectric_fresnel(local_o.dot(sample.m), ior);
                    let g = shadowing::g_smith(local_o, sample.m, roughness, NdfType::Ggx)
                        * shadowing::g_smith(sample.omega_i, sample.m, roughness, NdfType::Ggx);
                    Some((sample.omega_i, Rgb::splat(reflectance * sample.weight * g / coat)))
                } else {
                    // the diffuse base only receives what the coating transmits
                    let sample = lambert::sample_cosine_hemisphere(rand);
                    Some((sample.omega_i, albedo))
                }
            }
        }
    }
}

struct World {
    spheres: Vec<Sphere>,
    materials: Vec<Material>,
}

impl From<Vec<((f64, f64, f64, f64), Material)>> for World {
    fn from(value: Vec<((f64, f64, f64, f64), Material)>) -> Self {
        let mut spheres = Vec::with_capacity(value.len());
        let mut materials = Vec::with_capacity(value.len());
        for ((x, y, z, radius), material) in value {
            spheres.push(Sphere {
                center: Vec3d { x, y, z },
                radius,
            });
            materials.push(material);
        }
        Self { spheres, materials }
    }
}

enum WorldHit<'t> {
    Surface {
        material: &'t Material,
        pos: Vec3d,
        frame: ShadingFrame,
    },
    Background {
        color: Rgb,
    },
}

impl World {
    fn find_hit(&self, ray: Ray, ray_tmin: f64, ray_tmax: f64) -> WorldHit {
        let mut closest: Option<(usize, HitRecord)> = None;
        let mut closest_so_far = ray_tmax;

        for (id, sphere) in self.spheres.iter().enumerate() {
            if let Some(current_hit) = sphere.hit(ray, ray_tmin, closest_so_far) {
                closest_so_far = current_hit.t;
                closest = Some((id, current_hit));
            }
        }

        match closest {
            Some((id, hit)) => WorldHit::Surface {
                material: &self.materials[id],
                pos: hit.pos,
                frame: ShadingFrame::from_normal(hit.normal),
            },
            None => {
                let a = 0.5 * (ray.direction.normalize().z + 1.0);
                WorldHit::Background {
                    color: (1.0 - a) * Rgb::ONE + a * Rgb::new(0.5, 0.7, 1.0),
                }
            }
        }
    }
}

fn random_walk(world: &World, mut ray: Ray, rd: &mut fastrand::Rng) -> Rgb {
    let mut factor = Rgb::ONE;

    // russian roulette
    let rr_delta = 0.1;
    for depth in 0..50 {
        match world.find_hit(ray, 1e-5, f64::MAX) {
            WorldHit::Surface {
                material,
                pos,
                frame,
            } => {
                let Some((omega_i, contrib_factor)) = material.sample(&frame, -ray.direction, rd)
                else {
                    // absorbed
                    return Rgb::ZERO;
                };

                // always do 5 bounces, after that randomly terminate the path
                let rr_probab = if depth > 5 {
                    (contrib_factor.length() / rr_delta).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                if rr_probab <= rd.f64() {
                    return Rgb::ZERO;
                }
                factor *= contrib_factor / rr_probab;

                ray = Ray {
                    origin: pos,
                    direction: frame.to_world(omega_i).normalize(),
                };
            }
            WorldHit::Background { color } => return factor * color,
        }
    }
    Rgb::ZERO
}

fn save_image(
    path: &std::path::Path,
    buffer: &[u8],
    width: u32,
    height: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(&mut writer, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_source_gamma(png::ScaledFloat::new(1.0 / 2.2));
    encoder.set_source_chromaticities(png::SourceChromaticities::new(
        (0.31270, 0.32900),
        (0.64000, 0.33000),
        (0.30000, 0.60000),
        (0.15000, 0.06000),
    ));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(buffer)?;
    Ok(())
}

fn to_srgb_byte(linear: f64) -> u8 {
    (linear.max(0.0).powf(1.0 / 2.2) * 255.0)
        .clamp(0.0, 255.0)
        .floor() as u8
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gold = Material::Conductor {
        ndf_type: NdfType::Ggx,
        roughness: Roughness::splat(0.2),
        ior: Rgb::new(0.143, 0.374, 1.442),
        kappa: Rgb::new(3.983, 2.385, 1.603),
    };
    let brushed_copper = Material::Conductor {
        ndf_type: NdfType::Beckmann,
        roughness: Roughness::new(0.15, 0.45),
        ior: Rgb::new(0.200, 0.924, 1.102),
        kappa: Rgb::new(3.912, 2.452, 2.142),
    };
    let world: World = vec![
        (
            (0.0, 0.0, -1000.0, 1000.0),
            Material::Diffuse {
                albedo: Rgb::splat(0.4),
            },
        ),
        ((0.6, 0.0, 0.5, 0.5), gold),
        ((-1.3, 0.0, 0.3, 0.3), brushed_copper),
        (
            (0.2, -1.3, 0.2, 0.2),
            Material::Plastic {
                albedo: Rgb::new(0.8, 0.1, 0.1),
                roughness: Roughness::splat(0.1),
                ior: 1.5,
            },
        ),
    ]
    .into();

    let image_size = (960_usize, 540_usize);
    let num_samples = 64;

    let cam_center = Vec3d::new(0.0, -5.0, 1.0);
    let cam_target = Vec3d::new(0.0, 0.0, 0.5);
    let forward = (cam_target - cam_center).normalize();
    // keeps the image undistorted for non square sizes
    let right =
        forward.cross(Vec3d::Z).normalize() * 2.0 * image_size.0 as f64 / image_size.1 as f64;
    let up = -right.cross(forward).normalize() * 2.0;
    let focal_length = 8.0;
    let forward = forward * focal_length;

    let mut image: Vec<u8> = vec![0; 3 * image_size.0 * image_size.1];

    image
        .par_chunks_mut(3 * image_size.0)
        .enumerate()
        .for_each(|(y, row)| {
            let mut rd = fastrand::Rng::with_seed(y as u64);
            for (x, pixel) in row.chunks_exact_mut(3).enumerate() {
                let mut color = Rgb::ZERO;
                for _ in 0..num_samples {
                    let uv_x = (x as f64 + rd.f64()) / image_size.0 as f64;
                    let uv_y = (y as f64 + rd.f64()) / image_size.1 as f64;

                    let ray = Ray {
                        origin: cam_center,
                        direction: (forward
                            + right * (uv_x * 2.0 - 1.0)
                            + up * (uv_y * 2.0 - 1.0))
                            .normalize(),
                    };
                    color += random_walk(&world, ray, &mut rd);
                }
                color /= f64::from(num_samples);

                pixel[0] = to_srgb_byte(color.x);
                pixel[1] = to_srgb_byte(color.y);
                pixel[2] = to_srgb_byte(color.z);
            }
        });

    save_image(
        std::path::Path::new("image.png"),
        &image,
        image_size.0 as u32,
        image_size.1 as u32,
    )?;
    println!("Wrote image.png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Material, Rgb};
    use microfacet::{fresnel, sampling, shadowing, NdfType, Roughness, ShadingFrame, Vec2d, Vec3d};

    #[test]
    fn plastic_coating_matches_microfacet_reflectance() {
        // with a black base only the coating contributes
        let roughness = Roughness::splat(0.3);
        let ior = 1.5;
        let material = Material::Plastic {
            albedo: Rgb::ZERO,
            roughness,
            ior,
        };
        let frame = ShadingFrame::default();
        let omega_o = Vec3d::new(0.6, 0.0, 0.8);
        let count = 200_000;

        let mut rd = fastrand::Rng::with_seed(3);
        let mut sum = 0.0;
        for _ in 0..count {
            if let Some((omega_i, contrib)) = material.sample(&frame, omega_o, &mut rd) {
                assert!(omega_i.z > 0.0);
                assert!(contrib.x.is_finite() && contrib.x >= 0.0);
                sum += contrib.x;
            }
        }
        let estimate = sum / f64::from(count);

        let mut rd = fastrand::Rng::with_seed(4);
        let mut reference = 0.0;
        for _ in 0..count {
            let sample = sampling::sample_ggx_distribution(
                omega_o,
                roughness,
                Vec2d::new(rd.f64(), rd.f64()),
            );
            if !sample.is_valid() {
                continue;
            }
            reference += fresnel::dielectric_fresnel(omega_o.dot(sample.m), ior)
                * sample.weight
                * shadowing::g_smith(omega_o, sample.m, roughness, NdfType::Ggx)
                * shadowing::g_smith(sample.omega_i, sample.m, roughness, NdfType::Ggx);
        }
        let reference = reference / f64::from(count);

        assert!(
            (estimate - reference).abs() <= 0.05 * reference,
            "estimate: {estimate}, reference: {reference}"
        );
    }
}
