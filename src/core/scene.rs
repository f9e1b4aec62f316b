//! # Scene
//!
//! The shapes and lights to be rendered are all stored in the
//! **Scene** object. Shapes are held behind the [`Shape`] trait, so
//! analytic surfaces and voxel volumes can be mixed freely. The scene
//! is shared immutably by all render worker threads.

// rt
use crate::core::geometry::Ray;
use crate::core::interaction::Intersection;
use crate::core::light::Light;
use crate::core::rt::Float;
use crate::core::shape::Shape;

#[derive(Default)]
pub struct Scene {
    pub shapes: Vec<Box<dyn Shape>>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }
    pub fn add_shape<S: Shape + 'static>(&mut self, shape: S) -> &mut Self {
        self.shapes.push(Box::new(shape));
        self
    }
    pub fn add_light(&mut self, light: Light) -> &mut Self {
        self.lights.push(light);
        self
    }
    /// Nearest valid and visible intersection over all shapes. On
    /// equal *t* the shape added first wins.
    pub fn intersect(&self, ray: &Ray, min_dist: Float, max_dist: Float) -> Intersection<'_> {
        let mut nearest: Intersection = Intersection::NONE;
        for shape in &self.shapes {
            let isect = shape.intersect(ray, min_dist, max_dist);
            if !isect.is_well_formed() {
                log::debug!("Discarding malformed intersection {:?}", isect);
                continue;
            }
            if isect.is_hit() && (!nearest.valid || isect.t < nearest.t) {
                nearest = isect;
            }
        }
        nearest
    }
    /// Is there any valid and visible intersection along *ray*?
    pub fn intersect_p(&self, ray: &Ray, min_dist: Float, max_dist: Float) -> bool {
        self.shapes.iter().any(|shape| {
            let isect = shape.intersect(ray, min_dist, max_dist);
            if !isect.is_well_formed() {
                log::debug!("Discarding malformed shadow intersection {:?}", isect);
                return false;
            }
            isect.is_hit()
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::color::Color;
    use crate::core::geometry::Vector3f;
    use crate::core::material::Material;
    use crate::shapes::ellipsoid::Ellipsoid;

    /// Reports a hit at a fixed *t*, optionally flagged invisible or
    /// carrying a broken normal.
    struct FixedHit {
        t: Float,
        visible: bool,
        normal: Vector3f,
    }

    impl Shape for FixedHit {
        fn intersect(&self, ray: &Ray, min_dist: Float, max_dist: Float) -> Intersection<'_> {
            if self.t < min_dist || self.t > max_dist {
                return Intersection::NONE;
            }
            let isect = Intersection::new(
                self,
                ray,
                self.t,
                self.normal,
                Material::default(),
                Color::WHITE,
            );
            if self.visible {
                isect
            } else {
                isect.hidden()
            }
        }
    }

    fn sphere_at(z: Float, color: Color) -> Ellipsoid {
        Ellipsoid::with_color(
            Vector3f::new(0.0, 0.0, z),
            Vector3f::new(1.0, 1.0, 1.0),
            1.0,
            color,
        )
    }

    fn down_z() -> Ray {
        Ray::new(&Vector3f::new(0.0, 0.0, 10.0), &Vector3f::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn nearest_hit_wins() {
        let mut scene = Scene::new();
        scene
            .add_shape(sphere_at(-5.0, Color::BLACK))
            .add_shape(sphere_at(0.0, Color::WHITE));
        let isect = scene.intersect(&down_z(), 0.001, Float::INFINITY);
        assert!(isect.is_hit());
        assert_eq!(isect.color, Color::WHITE);
        assert!((isect.t - 9.0).abs() < 1e-12);
    }

    #[test]
    fn tie_goes_to_first_shape() {
        let mut scene = Scene::new();
        scene
            .add_shape(sphere_at(0.0, Color::gray(0.5)))
            .add_shape(sphere_at(0.0, Color::WHITE));
        let isect = scene.intersect(&down_z(), 0.001, Float::INFINITY);
        assert_eq!(isect.color, Color::gray(0.5));
    }

    #[test]
    fn invisible_and_malformed_hits_are_ignored() {
        let mut scene = Scene::new();
        scene
            .add_shape(FixedHit {
                t: 1.0,
                visible: false,
                normal: Vector3f::new(0.0, 0.0, 1.0),
            })
            .add_shape(FixedHit {
                t: 2.0,
                visible: true,
                normal: Vector3f::new(Float::NAN, 0.0, 1.0),
            })
            .add_shape(FixedHit {
                t: 3.0,
                visible: true,
                normal: Vector3f::new(0.0, 0.0, 1.0),
            });
        let isect = scene.intersect(&down_z(), 0.001, Float::INFINITY);
        assert!(isect.is_hit());
        assert_eq!(isect.t, 3.0);
        // only the well formed visible hit occludes
        assert!(scene.intersect_p(&down_z(), 0.001, 3.5));
        assert!(!scene.intersect_p(&down_z(), 0.001, 2.5));
    }

    #[test]
    fn empty_scene_misses() {
        let scene = Scene::new();
        assert!(!scene.intersect(&down_z(), 0.001, Float::INFINITY).valid);
        assert!(!scene.intersect_p(&down_z(), 0.001, Float::INFINITY));
    }
}
