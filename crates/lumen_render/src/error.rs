use thiserror::Error;

/// Construction-time invariant violations.
///
/// These surface to the scene-building caller immediately; a scene without
/// finite geometry cannot be accelerated or rendered. Numerically
/// degenerate intersection queries are never errors, they are misses.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("cannot build a BVH from an empty object list")]
    EmptyScene,

    #[error("object has no bounding box over [{time0}, {time1}]")]
    UnboundedObject { time0: f64, time1: f64 },
}
