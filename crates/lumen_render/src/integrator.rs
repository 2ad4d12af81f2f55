//! Recursive path tracing with light-driven importance sampling.

use crate::{HittablePdf, MixturePdf, Pdf, ScatterRecord};
use crate::{Hittable, HittableList};
use lumen_math::{Color, Interval, Ray};
use rand::RngCore;

/// Radiance assigned to rays that escape the scene.
#[derive(Debug, Clone, Copy)]
pub enum Background {
    /// Flat color, e.g. black for enclosed interiors.
    Solid(Color),
    /// Vertical white-to-blue gradient for open outdoor scenes.
    Sky,
}

impl Background {
    fn radiance(&self, ray: &Ray) -> Color {
        match self {
            Self::Solid(color) => *color,
            Self::Sky => {
                let unit_direction = ray.direction().normalize();
                let t = 0.5 * (unit_direction.y + 1.0);
                (1.0 - t) * Color::ONE + t * Color::new(0.5, 0.7, 1.0)
            }
        }
    }
}

/// Estimate the radiance arriving along `ray`.
///
/// Diffuse bounces draw the continuation direction from an even mixture
/// of the material's own distribution and direct sampling of the lights,
/// then reweight by the material density. Specular bounces recurse along
/// the one exact continuation ray.
pub fn ray_color(
    ray: &Ray,
    background: Background,
    world: &dyn Hittable,
    lights: &HittableList,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // Bounce budget exhausted, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    // The 0.001 floor avoids re-hitting the surface the ray left
    let rec = match world.hit(ray, Interval::new(0.001, f64::INFINITY), rng) {
        Some(rec) => rec,
        None => return background.radiance(ray),
    };

    // Lights emit from their front face only
    let emitted = if rec.front_face {
        rec.material.emitted(rec.u, rec.v, rec.p)
    } else {
        Color::ZERO
    };

    let scatter = match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => scatter,
        None => return emitted,
    };

    match scatter {
        ScatterRecord::Specular { ray: specular_ray, attenuation } => {
            emitted
                + attenuation
                    * ray_color(&specular_ray, background, world, lights, depth - 1, rng)
        }
        ScatterRecord::Diffuse { attenuation, pdf } => {
            let light_pdf = HittablePdf::new(lights, rec.p);
            let mixture = MixturePdf::new(&light_pdf, pdf.as_ref());
            let sampling_pdf: &dyn Pdf = if lights.is_empty() {
                pdf.as_ref()
            } else {
                &mixture
            };

            let scattered = Ray::new(rec.p, sampling_pdf.generate(rng), ray.time());
            let pdf_value = sampling_pdf.value(scattered.direction());
            if pdf_value <= 0.0 {
                return emitted;
            }

            let scattering_pdf = rec.material.scattering_pdf(ray, &rec, &scattered);
            let incoming =
                ray_color(&scattered, background, world, lights, depth - 1, rng);

            emitted + attenuation * scattering_pdf * incoming / pdf_value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffuseLight, Lambertian, Quad, Sphere};
    use lumen_math::DVec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    #[test]
    fn test_escaped_ray_returns_background() {
        let world = HittableList::new();
        let lights = HittableList::new();
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new_simple(DVec3::ZERO, DVec3::Y);
        let color = ray_color(
            &ray,
            Background::Solid(Color::new(0.1, 0.2, 0.3)),
            &world,
            &lights,
            10,
            &mut rng,
        );
        assert_eq!(color, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_sky_gradient_depends_on_direction() {
        let world = HittableList::new();
        let lights = HittableList::new();
        let mut rng = StdRng::seed_from_u64(0);

        let up = ray_color(
            &Ray::new_simple(DVec3::ZERO, DVec3::Y),
            Background::Sky,
            &world,
            &lights,
            10,
            &mut rng,
        );
        let down = ray_color(
            &Ray::new_simple(DVec3::ZERO, -DVec3::Y),
            Background::Sky,
            &world,
            &lights,
            10,
            &mut rng,
        );
        assert_eq!(up, Color::new(0.5, 0.7, 1.0));
        assert_eq!(down, Color::ONE);
    }

    #[test]
    fn test_depth_zero_is_black() {
        let world = HittableList::new();
        let lights = HittableList::new();
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new_simple(DVec3::ZERO, DVec3::Y);
        let color = ray_color(&ray, Background::Sky, &world, &lights, 0, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_front_face_emission_reaches_camera() {
        let mut world = HittableList::new();
        world.add(Arc::new(Quad::new(
            DVec3::new(-1.0, -1.0, -2.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
            Arc::new(DiffuseLight::new(Color::splat(4.0))),
        )));
        let lights = HittableList::new();
        let mut rng = StdRng::seed_from_u64(0);

        // Looking at the emitting face
        let facing = Ray::new_simple(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let color = ray_color(
            &facing,
            Background::Solid(Color::ZERO),
            &world,
            &lights,
            5,
            &mut rng,
        );
        assert_eq!(color, Color::splat(4.0));

        // From behind the quad the back face is dark
        let behind = Ray::new_simple(DVec3::new(0.0, 0.0, -4.0), DVec3::Z);
        let color = ray_color(
            &behind,
            Background::Solid(Color::ZERO),
            &world,
            &lights,
            5,
            &mut rng,
        );
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_specular_surface_keeps_its_emission() {
        // A mirror that also glows: both terms must survive the bounce
        struct EmissiveMirror;

        impl crate::Material for EmissiveMirror {
            fn scatter(
                &self,
                ray_in: &Ray,
                rec: &crate::HitRecord,
                _rng: &mut dyn RngCore,
            ) -> Option<ScatterRecord> {
                let reflected =
                    crate::material::reflect(ray_in.direction().normalize(), rec.normal);
                Some(ScatterRecord::Specular {
                    ray: Ray::new(rec.p, reflected, ray_in.time()),
                    attenuation: Color::splat(0.5),
                })
            }

            fn emitted(&self, _u: f64, _v: f64, _p: lumen_math::Point3) -> Color {
                Color::splat(2.0)
            }
        }

        let mut world = HittableList::new();
        world.add(Arc::new(Quad::new(
            DVec3::new(-1.0, -1.0, -2.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
            Arc::new(EmissiveMirror),
        )));
        let lights = HittableList::new();
        let mut rng = StdRng::seed_from_u64(0);

        // The reflected ray escapes into a black background, so the only
        // radiance is the mirror's own glow.
        let ray = Ray::new_simple(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let color = ray_color(
            &ray,
            Background::Solid(Color::ZERO),
            &world,
            &lights,
            5,
            &mut rng,
        );
        assert_eq!(color, Color::splat(2.0));

        // Against a lit background the bounce contributes on top of it
        let color = ray_color(
            &ray,
            Background::Solid(Color::splat(1.0)),
            &world,
            &lights,
            5,
            &mut rng,
        );
        assert_eq!(color, Color::splat(2.5));
    }

    #[test]
    fn test_diffuse_surface_gathers_light() {
        // A lit diffuse sphere must come out strictly brighter than black
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(
            DVec3::new(0.0, 0.0, -2.0),
            0.5,
            Arc::new(Lambertian::new(Color::splat(0.7))),
        )));
        let light: Arc<dyn Hittable> = Arc::new(Quad::new(
            DVec3::new(-1.0, 2.0, -3.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 2.0),
            Arc::new(DiffuseLight::new(Color::splat(10.0))),
        ));
        world.add(light.clone());
        let mut lights = HittableList::new();
        lights.add(light);

        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new_simple(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        let mut total = Color::ZERO;
        for _ in 0..200 {
            total += ray_color(
                &ray,
                Background::Solid(Color::ZERO),
                &world,
                &lights,
                10,
                &mut rng,
            );
        }
        assert!(total.x > 0.0);
    }
}
