//! Hittable trait, hit records, and the flat object list.

use crate::Material;
use lumen_math::{Aabb, DVec3, Interval, Point3, Ray};
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Record of a ray-object intersection.
///
/// Transient: built per intersection test and overwritten by every nested
/// call; never stored beyond the query that produced it.
#[derive(Clone)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (unit length, always points against the ray)
    pub normal: DVec3,
    /// Ray parameter where the intersection occurs
    pub t: f64,
    /// UV texture coordinates
    pub u: f64,
    pub v: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: Arc<dyn Material>,
}

impl HitRecord {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: DVec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// `pdf_value` and `random` are only meaningful for objects used as light
/// sampling targets; the defaults make every other object a zero-density
/// light.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given parameter interval.
    ///
    /// The generator is threaded through for stochastic geometry
    /// (participating media); ordinary surfaces ignore it.
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord>;

    /// Axis-aligned bounding box over the shutter interval, or `None` for
    /// genuinely unbounded objects.
    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb>;

    /// Sampling density for the direction from `origin` toward this object.
    fn pdf_value(&self, _origin: Point3, _direction: DVec3) -> f64 {
        0.0
    }

    /// Draw a direction from `origin` toward this object.
    fn random(&self, _origin: Point3, _rng: &mut dyn RngCore) -> DVec3 {
        DVec3::X
    }
}

/// A flat list of hittable objects.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Borrow the underlying objects, e.g. to hand them to a BVH build.
    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    /// Consume the list, yielding the underlying objects.
    pub fn into_objects(self) -> Vec<Arc<dyn Hittable>> {
        self.objects
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        let mut closest_so_far = ray_t.max;
        let mut closest_hit = None;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if let Some(rec) = object.hit(ray, interval, rng) {
                closest_so_far = rec.t;
                closest_hit = Some(rec);
            }
        }

        closest_hit
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        if self.objects.is_empty() {
            return None;
        }

        let mut output: Option<Aabb> = None;
        for object in &self.objects {
            let object_box = object.bounding_box(time0, time1)?;
            output = Some(match output {
                Some(existing) => Aabb::surrounding(&existing, &object_box),
                None => object_box,
            });
        }

        output
    }

    fn pdf_value(&self, origin: Point3, direction: DVec3) -> f64 {
        if self.objects.is_empty() {
            return 0.0;
        }

        let sum: f64 = self
            .objects
            .iter()
            .map(|object| object.pdf_value(origin, direction))
            .sum();

        sum / self.objects.len() as f64
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> DVec3 {
        if self.objects.is_empty() {
            return DVec3::X;
        }

        let index = rng.gen_range(0..self.objects.len());
        self.objects[index].random(origin, rng)
    }
}
