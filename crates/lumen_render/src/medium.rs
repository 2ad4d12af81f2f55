//! Homogeneous participating medium bounded by another object.

use crate::sampling::gen_f64;
use crate::texture::Texture;
use crate::{HitRecord, Hittable, Isotropic, Material};
use lumen_math::{Aabb, Color, DVec3, Interval, Ray};
use rand::RngCore;
use std::sync::Arc;

/// Constant-density volume. Rays scatter inside it at exponentially
/// sampled distances; the boundary object only delimits the medium.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f64,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f64, albedo: Color) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::new(albedo)),
        }
    }

    pub fn from_texture(boundary: Arc<dyn Hittable>, density: f64, texture: Arc<dyn Texture>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::from_texture(texture)),
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        // Entry and a strictly later exit establish the in-medium segment
        let mut rec1 = self
            .boundary
            .hit(ray, Interval::UNIVERSE, rng)?;
        let mut rec2 = self.boundary.hit(
            ray,
            Interval::new(rec1.t + 0.0001, f64::INFINITY),
            rng,
        )?;

        rec1.t = rec1.t.max(ray_t.min);
        rec2.t = rec2.t.min(ray_t.max);
        if rec1.t >= rec2.t {
            return None;
        }
        rec1.t = rec1.t.max(0.0);

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (rec2.t - rec1.t) * ray_length;

        // Exponential free-path sampling; clamp the variate away from zero
        // so the logarithm stays finite
        let random_value = gen_f64(rng).max(1e-12);
        let hit_distance = self.neg_inv_density * random_value.ln();

        if hit_distance > distance_inside_boundary {
            return None;
        }

        let t = rec1.t + hit_distance / ray_length;
        Some(HitRecord {
            p: ray.at(t),
            // Arbitrary: the phase function is isotropic
            normal: DVec3::X,
            t,
            u: 0.0,
            v: 0.0,
            front_face: true,
            material: self.phase_function.clone(),
        })
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        self.boundary.bounding_box(time0, time1)
    }
}
