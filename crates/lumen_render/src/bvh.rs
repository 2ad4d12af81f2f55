//! Bounding volume hierarchy over hittable objects.
//!
//! Binary tree of enclosing boxes; traversal prunes whole subtrees on a
//! box miss and shrinks the right probe to the best hit found on the left,
//! which keeps the nearest-hit search correct without testing every leaf.

use crate::{HitRecord, Hittable, SceneError};
use lumen_math::{Aabb, Interval, Ray};
use log::debug;
use rand::RngCore;
use std::cmp::Ordering;
use std::sync::Arc;

/// An internal node with exactly two children. Leaves are the original
/// primitives; a span of one aliases the same object into both slots.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
}

impl BvhNode {
    /// Build a BVH over the given objects, valid for rays with times in
    /// [time0, time1].
    ///
    /// Fails when the list is empty or any object cannot report a
    /// bounding box; neither scene can be accelerated.
    pub fn new(
        mut objects: Vec<Arc<dyn Hittable>>,
        time0: f64,
        time1: f64,
    ) -> Result<Self, SceneError> {
        if objects.is_empty() {
            return Err(SceneError::EmptyScene);
        }

        debug!("building BVH over {} objects", objects.len());
        Self::build(&mut objects, time0, time1)
    }

    fn build(
        objects: &mut [Arc<dyn Hittable>],
        time0: f64,
        time1: f64,
    ) -> Result<Self, SceneError> {
        // Verifies every object is bounded, so the sort key below is total
        let axis = Self::choose_split_axis(objects, time0, time1)?;

        let (left, right): (Arc<dyn Hittable>, Arc<dyn Hittable>) = match objects {
            [single] => (single.clone(), single.clone()),
            [a, b] => {
                if Self::box_min(a, axis, time0, time1) <= Self::box_min(b, axis, time0, time1) {
                    (a.clone(), b.clone())
                } else {
                    (b.clone(), a.clone())
                }
            }
            _ => {
                objects.sort_unstable_by(|a, b| {
                    Self::box_min(a, axis, time0, time1)
                        .partial_cmp(&Self::box_min(b, axis, time0, time1))
                        .unwrap_or(Ordering::Equal)
                });

                let mid = objects.len() / 2;
                let (left_half, right_half) = objects.split_at_mut(mid);
                (
                    Arc::new(Self::build(left_half, time0, time1)?),
                    Arc::new(Self::build(right_half, time0, time1)?),
                )
            }
        };

        let box_left = left
            .bounding_box(time0, time1)
            .ok_or(SceneError::UnboundedObject { time0, time1 })?;
        let box_right = right
            .bounding_box(time0, time1)
            .ok_or(SceneError::UnboundedObject { time0, time1 })?;

        Ok(Self {
            left,
            right,
            bbox: Aabb::surrounding(&box_left, &box_right),
        })
    }

    /// Minimum coordinate of an object's box on the given axis. Checked
    /// bounded beforehand; a missing box sorts first rather than panics.
    fn box_min(object: &Arc<dyn Hittable>, axis: usize, time0: f64, time1: f64) -> f64 {
        object
            .bounding_box(time0, time1)
            .map(|bbox| bbox.axis_interval(axis).min)
            .unwrap_or(f64::NEG_INFINITY)
    }

    /// Split along the largest extent of the aggregate box; ties resolve
    /// in axis order x, y, z.
    fn choose_split_axis(
        objects: &[Arc<dyn Hittable>],
        time0: f64,
        time1: f64,
    ) -> Result<usize, SceneError> {
        let mut aggregate: Option<Aabb> = None;
        for object in objects {
            let object_box = object
                .bounding_box(time0, time1)
                .ok_or(SceneError::UnboundedObject { time0, time1 })?;
            aggregate = Some(match aggregate {
                Some(existing) => Aabb::surrounding(&existing, &object_box),
                None => object_box,
            });
        }

        aggregate
            .map(|bbox| bbox.longest_axis())
            .ok_or(SceneError::EmptyScene)
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let left_hit = self.left.hit(ray, ray_t, rng);

        // Only probe the right subtree up to the best hit so far
        let right_max = left_hit.as_ref().map_or(ray_t.max, |rec| rec.t);
        let right_hit = self.right.hit(ray, Interval::new(ray_t.min, right_max), rng);

        right_hit.or(left_hit)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(self.bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Lambertian, Material, Sphere};
    use lumen_math::{Color, DVec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn material() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    #[test]
    fn test_bvh_rejects_empty_list() {
        let result = BvhNode::new(Vec::new(), 0.0, 1.0);
        assert!(matches!(result, Err(SceneError::EmptyScene)));
    }

    #[test]
    fn test_bvh_rejects_unbounded_object() {
        struct Unbounded;
        impl Hittable for Unbounded {
            fn hit(&self, _: &Ray, _: Interval, _: &mut dyn RngCore) -> Option<HitRecord> {
                None
            }
            fn bounding_box(&self, _: f64, _: f64) -> Option<Aabb> {
                None
            }
        }

        let objects: Vec<Arc<dyn Hittable>> = vec![Arc::new(Unbounded)];
        let result = BvhNode::new(objects, 0.0, 1.0);
        assert!(matches!(result, Err(SceneError::UnboundedObject { .. })));
    }

    #[test]
    fn test_bvh_single_object() {
        let objects: Vec<Arc<dyn Hittable>> = vec![Arc::new(Sphere::new(
            DVec3::new(0.0, 0.0, -1.0),
            0.5,
            material(),
        ))];
        let bvh = BvhNode::new(objects, 0.0, 1.0).expect("single sphere builds");

        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new_simple(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let rec = bvh
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .expect("must hit the aliased leaf once");
        assert!((rec.t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_bvh_finds_nearest_among_many() {
        let mut list = HittableList::new();
        for i in 0..10 {
            list.add(Arc::new(Sphere::new(
                DVec3::new(i as f64, 0.0, -5.0),
                0.5,
                material(),
            )));
        }
        let bvh = BvhNode::new(list.into_objects(), 0.0, 1.0).expect("bvh builds");

        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new_simple(DVec3::new(5.0, 0.0, 0.0), DVec3::new(0.0, 0.0, -1.0));
        let rec = bvh
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .expect("must hit the sphere at x=5");
        assert!((rec.p.z - (-4.5)).abs() < 1e-9);
    }

    #[test]
    fn test_bvh_box_contains_children() {
        let objects: Vec<Arc<dyn Hittable>> = vec![
            Arc::new(Sphere::new(DVec3::new(-4.0, 0.0, 0.0), 1.0, material())),
            Arc::new(Sphere::new(DVec3::new(4.0, 0.0, 0.0), 1.0, material())),
        ];
        let bvh = BvhNode::new(objects, 0.0, 1.0).expect("bvh builds");

        let bbox = bvh.bounding_box(0.0, 1.0).expect("bounded");
        assert!(bbox.x.min <= -5.0);
        assert!(bbox.x.max >= 5.0);
    }
}
