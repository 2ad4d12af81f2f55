//! Ray type for path tracing.
//!
//! A ray is defined by an origin point, a direction vector, and a time value
//! for motion blur support.

use glam::DVec3;

/// A ray with origin, direction, and time.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    origin: DVec3,
    /// Direction vector (not necessarily normalized)
    direction: DVec3,
    /// Time value within the camera shutter interval
    time: f64,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: DVec3, direction: DVec3, time: f64) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// Create a ray at time 0.
    #[inline]
    pub fn new_simple(origin: DVec3, direction: DVec3) -> Self {
        Self::new(origin, direction, 0.0)
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the ray's direction vector.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Get the ray's time value.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + t * self.direction
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: DVec3::ZERO,
            direction: DVec3::Z,
            time: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0), 0.0);

        assert_eq!(ray.at(0.0), DVec3::ZERO);
        assert_eq!(ray.at(1.0), DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(2.5), DVec3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn test_ray_accessors() {
        let origin = DVec3::new(1.0, 2.0, 3.0);
        let direction = DVec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction, 0.5);

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), direction);
        assert_eq!(ray.time(), 0.5);
    }
}
