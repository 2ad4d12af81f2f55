//! Built-in scenes.

use crate::camera::{Camera, CameraConfig};
use crate::integrator::Background;
use crate::{
    BvhNode, CheckerTexture, ConstantMedium, Cuboid, Dielectric, DiffuseLight, Hittable,
    HittableList, Lambertian, Metal, Quad, RotateY, SceneError, Sphere, Translate,
};
use lumen_math::{Color, DVec3, Point3};
use std::sync::Arc;

/// Everything the renderer needs: geometry, light-sampling targets,
/// viewpoint, and escape radiance.
pub struct Scene {
    pub world: Arc<dyn Hittable>,
    /// Objects the integrator samples directly. May be empty, in which
    /// case only material sampling drives the paths.
    pub lights: HittableList,
    pub camera: Camera,
    pub background: Background,
}

/// The scenes the binary knows how to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Cornell box with two smoke volumes and a ceiling light.
    CornellSmoke,
    /// Three spheres on a ground sphere under a sky gradient.
    ThreeSpheres,
}

pub fn build(kind: SceneKind, aspect_ratio: f64) -> Result<Scene, SceneError> {
    match kind {
        SceneKind::CornellSmoke => cornell_smoke(aspect_ratio),
        SceneKind::ThreeSpheres => three_spheres(aspect_ratio),
    }
}

fn cornell_smoke(aspect_ratio: f64) -> Result<Scene, SceneError> {
    let red = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    let mut world = HittableList::new();

    // Walls of the 555-unit box
    world.add(Arc::new(Quad::new(
        Point3::new(555.0, 0.0, 0.0),
        DVec3::new(0.0, 555.0, 0.0),
        DVec3::new(0.0, 0.0, 555.0),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Point3::ZERO,
        DVec3::new(0.0, 555.0, 0.0),
        DVec3::new(0.0, 0.0, 555.0),
        red,
    )));
    world.add(Arc::new(Quad::new(
        Point3::ZERO,
        DVec3::new(555.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(555.0, 555.0, 555.0),
        DVec3::new(-555.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, -555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(0.0, 0.0, 555.0),
        DVec3::new(555.0, 0.0, 0.0),
        DVec3::new(0.0, 555.0, 0.0),
        white.clone(),
    )));

    // Ceiling light
    let light_quad = Arc::new(Quad::new(
        Point3::new(213.0, 554.0, 227.0),
        DVec3::new(130.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 105.0),
        light,
    ));
    world.add(light_quad.clone());

    // Two boxes filled with smoke instead of solid surfaces
    let short_box: Arc<dyn Hittable> = Arc::new(Cuboid::new(
        Point3::ZERO,
        Point3::new(165.0, 165.0, 165.0),
        white.clone(),
    ));
    let short_box: Arc<dyn Hittable> = Arc::new(Translate::new(
        Arc::new(RotateY::new(short_box, -18.0)),
        DVec3::new(130.0, 0.0, 65.0),
    ));
    world.add(Arc::new(ConstantMedium::new(
        short_box,
        0.01,
        Color::ZERO,
    )));

    let tall_box: Arc<dyn Hittable> = Arc::new(Cuboid::new(
        Point3::ZERO,
        Point3::new(165.0, 330.0, 165.0),
        white,
    ));
    let tall_box: Arc<dyn Hittable> = Arc::new(Translate::new(
        Arc::new(RotateY::new(tall_box, 15.0)),
        DVec3::new(265.0, 0.0, 295.0),
    ));
    world.add(Arc::new(ConstantMedium::new(tall_box, 0.01, Color::ONE)));

    let mut lights = HittableList::new();
    lights.add(light_quad);

    let lookfrom = Point3::new(278.0, 278.0, -800.0);
    let lookat = Point3::new(278.0, 278.0, 0.0);
    let camera = Camera::new(&CameraConfig {
        lookfrom,
        lookat,
        vup: DVec3::Y,
        vfov_degrees: 20.0,
        aspect_ratio,
        aperture: 0.2,
        focus_distance: (lookfrom - lookat).length(),
        time0: 0.0,
        time1: 1.0,
    });

    Ok(Scene {
        world: Arc::new(BvhNode::new(world.into_objects(), 0.0, 1.0)?),
        lights,
        camera,
        background: Background::Solid(Color::ZERO),
    })
}

fn three_spheres(aspect_ratio: f64) -> Result<Scene, SceneError> {
    let ground = Arc::new(Lambertian::from_texture(Arc::new(CheckerTexture::new(
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
        10.0,
    ))));
    let center = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let left = Arc::new(Dielectric::new(1.5));
    let right = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.0));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        ground,
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 0.0, -1.0),
        0.5,
        center,
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(-1.0, 0.0, -1.0),
        0.5,
        left,
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(1.0, 0.0, -1.0),
        0.5,
        right,
    )));

    let lookfrom = Point3::new(-2.0, 2.0, 1.0);
    let lookat = Point3::new(0.0, 0.0, -1.0);
    let camera = Camera::new(&CameraConfig {
        lookfrom,
        lookat,
        vup: DVec3::Y,
        vfov_degrees: 20.0,
        aspect_ratio,
        aperture: 0.0,
        focus_distance: (lookfrom - lookat).length(),
        time0: 0.0,
        time1: 0.0,
    });

    Ok(Scene {
        world: Arc::new(BvhNode::new(world.into_objects(), 0.0, 0.0)?),
        lights: HittableList::new(),
        camera,
        background: Background::Sky,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cornell_smoke_builds() {
        let scene = build(SceneKind::CornellSmoke, 1.0).expect("scene builds");
        assert_eq!(scene.lights.len(), 1);
        assert!(matches!(scene.background, Background::Solid(_)));
        assert!(scene.world.bounding_box(0.0, 1.0).is_some());
    }

    #[test]
    fn test_three_spheres_builds() {
        let scene = build(SceneKind::ThreeSpheres, 16.0 / 9.0).expect("scene builds");
        assert!(scene.lights.is_empty());
        assert!(matches!(scene.background, Background::Sky));
    }
}
