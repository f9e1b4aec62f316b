// rt
use crate::core::color::Color;
use crate::core::geometry::{vec3_dot_vec3f, Ray, Vector3f};
use crate::core::interaction::Intersection;
use crate::core::light::Light;
use crate::core::rt::{Float, RAY_EPSILON};
use crate::core::scene::Scene;
use crate::integrators::Integrator;

/// Local Phong illumination with hard shadows from point lights.
/// There are no secondary bounces.
#[derive(Debug, Copy, Clone)]
pub struct PhongIntegrator {
    /// color of rays which hit nothing
    pub background: Color,
    /// offset keeping secondary rays off their own surface
    pub epsilon: Float,
}

impl Default for PhongIntegrator {
    fn default() -> Self {
        PhongIntegrator {
            background: Color::new(0.2, 0.2, 0.2, 1.0),
            epsilon: RAY_EPSILON,
        }
    }
}

impl PhongIntegrator {
    pub fn new(background: Color, epsilon: Float) -> Self {
        PhongIntegrator {
            background,
            epsilon,
        }
    }
    /// Does *light* reach *point* without being blocked by a visible
    /// surface?
    pub fn is_lit(&self, point: &Vector3f, light: &Light, scene: &Scene) -> bool {
        let to_light: Vector3f = light.position - point;
        let distance: Float = to_light.length();
        if distance <= self.epsilon {
            return true;
        }
        let ray = Ray::new(point, &to_light);
        !scene.intersect_p(&ray, self.epsilon, distance - self.epsilon)
    }
    /// Phong shading of a hit point, summed over all scene lights. The
    /// viewer for the specular term sits at the world origin, not at
    /// the camera.
    pub fn shade(&self, isect: &Intersection, scene: &Scene) -> Color {
        let n: Vector3f = isect.normal;
        let p: Vector3f = isect.position;
        let m = &isect.material;
        let v: Vector3f = (Vector3f::ZERO - p).normalize();
        let mut ambient: Color = Color::NONE;
        let mut diffuse: Color = Color::NONE;
        let mut specular: Color = Color::NONE;
        for light in &scene.lights {
            ambient += m.ambient * light.ambient;
            if !self.is_lit(&p, light, scene) {
                continue;
            }
            let l: Vector3f = (light.position - p).normalize();
            let n_dot_l: Float = vec3_dot_vec3f(&n, &l);
            diffuse += m.diffuse * light.diffuse * n_dot_l.max(0.0);
            let r: Vector3f = n * (2.0 * n_dot_l) - l;
            let v_dot_r: Float = vec3_dot_vec3f(&v, &r).max(0.0);
            specular += m.specular * light.specular * v_dot_r.powf(m.shininess);
        }
        let color: Color = (ambient + diffuse + specular) * isect.color;
        if color.has_nans() {
            log::warn!(
                "Not-a-number color at {:?} with normal {:?}. Setting to black.",
                p,
                n
            );
            return Color::BLACK;
        }
        color
    }
}

impl Integrator for PhongIntegrator {
    fn li(&self, ray: &Ray, scene: &Scene) -> Color {
        let isect = scene.intersect(ray, self.epsilon, Float::INFINITY);
        if !isect.is_hit() {
            return self.background;
        }
        self.shade(&isect, scene)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::material::Material;
    use crate::shapes::ellipsoid::Ellipsoid;
    use approx::assert_abs_diff_eq;

    fn white_light(position: Vector3f) -> Light {
        Light::new(position, Color::gray(1.0), Color::gray(1.0), Color::gray(1.0))
    }

    fn unit_sphere(center: Vector3f) -> Ellipsoid {
        Ellipsoid::with_color(center, Vector3f::new(1.0, 1.0, 1.0), 1.0, Color::WHITE)
    }

    #[test]
    fn unobstructed_light_is_visible() {
        let mut scene = Scene::new();
        let light = white_light(Vector3f::new(0.0, 10.0, 0.0));
        scene.add_light(light);
        let phong = PhongIntegrator::default();
        assert!(phong.is_lit(&Vector3f::ZERO, &light, &scene));
    }

    #[test]
    fn occluder_casts_shadow() {
        let mut scene = Scene::new();
        let light = white_light(Vector3f::new(0.0, 10.0, 0.0));
        scene
            .add_light(light)
            .add_shape(unit_sphere(Vector3f::new(0.0, 5.0, 0.0)));
        let phong = PhongIntegrator::default();
        assert!(!phong.is_lit(&Vector3f::ZERO, &light, &scene));
        // a point beside the occluder still sees the light
        assert!(phong.is_lit(&Vector3f::new(5.0, 0.0, 0.0), &light, &scene));
    }

    #[test]
    fn background_on_miss() {
        let scene = Scene::new();
        let phong = PhongIntegrator::default();
        let ray = Ray::new(&Vector3f::ZERO, &Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(phong.li(&ray, &scene), Color::new(0.2, 0.2, 0.2, 1.0));
    }

    #[test]
    fn origin_inside_sphere_sees_no_highlight() {
        // light straight above the hit point, world origin below it
        let mut scene = Scene::new();
        scene
            .add_light(white_light(Vector3f::new(0.0, 0.0, 5.0)))
            .add_shape(unit_sphere(Vector3f::ZERO));
        let phong = PhongIntegrator::default();
        let ray = Ray::new(&Vector3f::new(0.0, 0.0, 5.0), &Vector3f::new(0.0, 0.0, -1.0));
        let color = phong.li(&ray, &scene);
        // ambient 0.1 + diffuse 0.6 of the default material
        assert_abs_diff_eq!(color.r(), 0.7, epsilon = 1e-9);
        assert_abs_diff_eq!(color.g(), 0.7, epsilon = 1e-9);
        assert_abs_diff_eq!(color.b(), 0.7, epsilon = 1e-9);
    }

    #[test]
    fn highlight_faces_world_origin_not_camera() {
        let mut scene = Scene::new();
        scene
            .add_light(white_light(Vector3f::new(0.0, 0.0, 5.0)))
            .add_shape(unit_sphere(Vector3f::new(0.0, 0.0, -3.0)));
        let phong = PhongIntegrator::default();
        // camera off to the side, hitting the top of the sphere at
        // (0, 0, -2) where the reflected light points at the origin
        let ray = Ray::through(&Vector3f::new(4.0, 0.0, 2.0), &Vector3f::new(0.0, 0.0, -2.0));
        let isect = scene.intersect(&ray, phong.epsilon, Float::INFINITY);
        assert!(isect.is_hit());
        assert_abs_diff_eq!(isect.position.z, -2.0, epsilon = 1e-9);
        let color = phong.li(&ray, &scene);
        // 0.1 + 0.6 + 0.3 of the default material
        assert_abs_diff_eq!(color.r(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(color.g(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(color.b(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn shadowed_point_gets_ambient_only() {
        let mut scene = Scene::new();
        scene
            .add_light(white_light(Vector3f::new(0.0, 0.0, 10.0)))
            .add_shape(unit_sphere(Vector3f::ZERO))
            .add_shape(unit_sphere(Vector3f::new(0.0, 0.0, 5.0)));
        let phong = PhongIntegrator::default();
        // upper half of the lower sphere, seen from the side
        let ray = Ray::through(&Vector3f::new(3.0, 0.0, 1.0), &Vector3f::new(0.0, 0.0, 0.5));
        let isect = scene.intersect(&ray, phong.epsilon, Float::INFINITY);
        assert!(isect.is_hit());
        let color = phong.shade(&isect, &scene);
        assert_abs_diff_eq!(color.r(), 0.1, epsilon = 1e-9);
    }

    #[test]
    fn surface_color_modulates_result() {
        let mut scene = Scene::new();
        scene.add_light(Light::new(
            Vector3f::new(0.0, 0.0, 5.0),
            Color::gray(1.0),
            Color::NONE,
            Color::NONE,
        ));
        scene.add_shape(Ellipsoid::new(
            Vector3f::ZERO,
            Vector3f::new(1.0, 1.0, 1.0),
            1.0,
            Material::default(),
            Color::new(1.0, 0.5, 0.0, 1.0),
        ));
        let phong = PhongIntegrator::default();
        let ray = Ray::new(&Vector3f::new(0.0, 0.0, 5.0), &Vector3f::new(0.0, 0.0, -1.0));
        let color = phong.li(&ray, &scene);
        assert_abs_diff_eq!(color.r(), 0.1, epsilon = 1e-9);
        assert_abs_diff_eq!(color.g(), 0.05, epsilon = 1e-9);
        assert_abs_diff_eq!(color.b(), 0.0, epsilon = 1e-9);
    }
}
