// rt
use crate::core::color::Color;
use crate::core::geometry::{vec3_dot_vec3f, Ray, Vector3f};
use crate::core::interaction::Intersection;
use crate::core::material::Material;
use crate::core::rt::{quadratic, Float};
use crate::core::shape::Shape;

/// Axis-aligned ellipsoid: all points *p* with
/// `((p - center) / semi_axes)²  = radius²`.
#[derive(Debug, Clone)]
pub struct Ellipsoid {
    pub center: Vector3f,
    pub semi_axes: Vector3f,
    pub radius: Float,
    pub material: Material,
    pub color: Color,
}

impl Ellipsoid {
    pub fn new(
        center: Vector3f,
        semi_axes: Vector3f,
        radius: Float,
        material: Material,
        color: Color,
    ) -> Self {
        Ellipsoid {
            center,
            semi_axes,
            radius,
            material,
            color,
        }
    }
    pub fn with_color(center: Vector3f, semi_axes: Vector3f, radius: Float, color: Color) -> Self {
        Ellipsoid::new(center, semi_axes, radius, Material::default(), color)
    }
    /// Normalized gradient of the implicit function at *p*.
    pub fn normal(&self, p: &Vector3f) -> Vector3f {
        let local: Vector3f = p - self.center;
        let axes_squared: Vector3f = self.semi_axes.mul_element(&self.semi_axes);
        (local * 2.0).div_element(&axes_squared).normalize()
    }
}

impl Shape for Ellipsoid {
    fn intersect(&self, ray: &Ray, min_dist: Float, max_dist: Float) -> Intersection<'_> {
        // transform the ray into a frame where the ellipsoid is a sphere
        // around the origin
        let o: Vector3f = (ray.o - self.center).div_element(&self.semi_axes);
        let d: Vector3f = ray.d.div_element(&self.semi_axes);
        // compute quadratic coefficients
        let a: Float = vec3_dot_vec3f(&d, &d);
        let b: Float = 2.0 * vec3_dot_vec3f(&o, &d);
        let c: Float = vec3_dot_vec3f(&o, &o) - self.radius * self.radius;
        // solve quadratic equation for _t_ values
        let (t0, t1) = match quadratic(a, b, c) {
            Some(roots) => roots,
            None => return Intersection::NONE,
        };
        // prefer the nearer root
        let t: Float = if t0 >= min_dist && t0 <= max_dist {
            t0
        } else if t1 >= min_dist && t1 <= max_dist {
            t1
        } else {
            return Intersection::NONE;
        };
        let normal: Vector3f = self.normal(&ray.position(t));
        if normal.has_nans() {
            return Intersection::NONE;
        }
        Intersection::new(self, ray, t, normal, self.material, self.color)
    }
}
