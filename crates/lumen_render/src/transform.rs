//! Affine wrappers: translation and rotation about the y axis.

use crate::{HitRecord, Hittable};
use lumen_math::{Aabb, DVec3, Interval, Point3, Ray};
use rand::RngCore;
use std::sync::Arc;

/// Offsets an object by moving incoming rays into object space.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: DVec3,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: DVec3) -> Self {
        Self { object, offset }
    }
}

impl Hittable for Translate {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        let moved_ray = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        let mut rec = self.object.hit(&moved_ray, ray_t, rng)?;
        rec.p += self.offset;
        let outward = if rec.front_face { rec.normal } else { -rec.normal };
        rec.set_face_normal(&moved_ray, outward);
        Some(rec)
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        self.object
            .bounding_box(time0, time1)
            .map(|bbox| bbox.translate(self.offset))
    }
}

/// Rotates an object about the y axis by rotating rays the opposite way.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    sin_theta: f64,
    cos_theta: f64,
    bbox: Option<Aabb>,
}

impl RotateY {
    pub fn new(object: Arc<dyn Hittable>, angle_degrees: f64) -> Self {
        let radians = angle_degrees.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        // Rotate all 8 corners of the wrapped box and take the enclosing
        // box; an unbounded object stays unbounded.
        let bbox = object.bounding_box(0.0, 0.0).map(|bbox| {
            let mut min = DVec3::splat(f64::INFINITY);
            let mut max = DVec3::splat(f64::NEG_INFINITY);

            for i in 0..2 {
                for j in 0..2 {
                    for k in 0..2 {
                        let x = i as f64 * bbox.x.max + (1 - i) as f64 * bbox.x.min;
                        let y = j as f64 * bbox.y.max + (1 - j) as f64 * bbox.y.min;
                        let z = k as f64 * bbox.z.max + (1 - k) as f64 * bbox.z.min;

                        let rotated_x = cos_theta * x + sin_theta * z;
                        let rotated_z = -sin_theta * x + cos_theta * z;

                        let tester = DVec3::new(rotated_x, y, rotated_z);
                        min = min.min(tester);
                        max = max.max(tester);
                    }
                }
            }

            Aabb::from_points(min, max)
        });

        Self {
            object,
            sin_theta,
            cos_theta,
            bbox,
        }
    }

    /// World -> object space rotation (inverse of the configured angle).
    fn to_object(&self, v: DVec3) -> DVec3 {
        DVec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    /// Object -> world space rotation.
    fn to_world(&self, v: DVec3) -> DVec3 {
        DVec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        let rotated_ray = Ray::new(
            self.to_object(ray.origin()),
            self.to_object(ray.direction()),
            ray.time(),
        );

        let mut rec = self.object.hit(&rotated_ray, ray_t, rng)?;

        rec.p = self.to_world(rec.p);
        let outward = if rec.front_face { rec.normal } else { -rec.normal };
        let world_normal = self.to_world(outward);
        rec.set_face_normal(ray, world_normal);
        Some(rec)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cuboid, Lambertian, Quad, Sphere};
    use lumen_math::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn material() -> Arc<dyn crate::Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    #[test]
    fn test_translate_moves_intersection_point() {
        let quad: Arc<dyn Hittable> = Arc::new(Quad::new(
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            material(),
        ));
        let translated = Translate::new(quad, DVec3::new(0.0, 0.0, 1.0));

        let ray = Ray::new_simple(DVec3::new(0.5, 0.5, 3.0), DVec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(0);

        let rec = translated
            .hit(&ray, Interval::new(0.001, 10.0), &mut rng)
            .expect("translated quad must be hit");
        assert!((rec.p.z - 1.0).abs() < 1e-12);
        assert!((rec.t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_translate_bounding_box_is_offset() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(DVec3::ZERO, 1.0, material()));
        let translated = Translate::new(sphere, DVec3::new(10.0, 0.0, 0.0));

        let bbox = translated.bounding_box(0.0, 1.0).expect("bounded");
        assert_eq!(bbox.x.min, 9.0);
        assert_eq!(bbox.x.max, 11.0);
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        // A box along +x, rotated 90 degrees, lands along -z
        let cuboid: Arc<dyn Hittable> = Arc::new(Cuboid::new(
            DVec3::new(2.0, 0.0, -0.5),
            DVec3::new(3.0, 1.0, 0.5),
            material(),
        ));
        let rotated = RotateY::new(cuboid, 90.0);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new_simple(DVec3::new(0.0, 0.5, -10.0), DVec3::Z);
        let rec = rotated
            .hit(&ray, Interval::new(0.001, 100.0), &mut rng)
            .expect("rotated box must sit on the -z axis");
        assert!(rec.p.z < 0.0);
        assert!(rec.p.x.abs() < 1e-9);
    }

    #[test]
    fn test_rotate_y_bounding_box_encloses_rotation() {
        let cuboid: Arc<dyn Hittable> = Arc::new(Cuboid::new(
            DVec3::ZERO,
            DVec3::new(2.0, 1.0, 1.0),
            material(),
        ));
        let rotated = RotateY::new(cuboid, 45.0);

        let bbox = rotated.bounding_box(0.0, 1.0).expect("bounded");
        // The rotated long edge extends past the original footprint
        assert!(bbox.z.size() > 1.0 + 1e-9);
    }

    #[test]
    fn test_rotate_y_zero_angle_is_identity() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(DVec3::new(0.0, 0.0, -2.0), 0.5, material()));
        let rotated = RotateY::new(sphere, 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new_simple(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let rec = rotated
            .hit(&ray, Interval::new(0.001, 100.0), &mut rng)
            .expect("identity rotation must not change hits");
        assert!((rec.t - 1.5).abs() < 1e-12);
    }
}
