//! Monte Carlo path tracing: geometry, materials, sampling, and the
//! renderer that ties them together.

pub mod bvh;
pub mod camera;
pub mod error;
pub mod hittable;
pub mod integrator;
pub mod material;
pub mod medium;
pub mod pdf;
pub mod ppm;
pub mod quad;
pub mod renderer;
pub mod sampling;
pub mod scenes;
pub mod sphere;
pub mod texture;
pub mod transform;

pub use bvh::BvhNode;
pub use camera::{Camera, CameraConfig};
pub use error::SceneError;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::{ray_color, Background};
pub use material::{
    Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterRecord,
};
pub use medium::ConstantMedium;
pub use pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf, SpherePdf, UniformSpherePdf};
pub use ppm::write_ppm;
pub use quad::{Cuboid, Quad};
pub use renderer::{render, Framebuffer, RenderConfig};
pub use scenes::{Scene, SceneKind};
pub use sphere::{MovingSphere, Sphere};
pub use texture::{CheckerTexture, NoiseTexture, Perlin, SolidColor, Texture};
pub use transform::{RotateY, Translate};
