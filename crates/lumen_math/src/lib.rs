//! Math types shared by the lumen renderer.
//!
//! Vector algebra comes straight from `glam` (f64 variants); this crate
//! adds the ray/interval/box/basis types the intersection code is built on.

// Re-export glam for convenience
pub use glam::DVec3;

mod aabb;
mod interval;
mod onb;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;

/// Point and color are plain vectors, named for readability at call sites.
pub type Point3 = DVec3;
pub type Color = DVec3;
