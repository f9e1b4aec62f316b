//! The outcome of testing one ray against one shape is represented by
//! an **Intersection**. Having this abstraction lets the renderer work
//! with hit points without needing to consider the particular type of
//! shape they lie on.
//!
//! An intersection carries two flags. *valid* says whether anything was
//! computed at all; if it is false every other field is meaningless.
//! *visible* lets a shape report a hit it computed but wants ignored
//! (for example a volume that accumulated too little opacity). Only
//! intersections which are both valid and visible count as hits.

// std
use std::fmt;
// rt
use crate::core::color::Color;
use crate::core::geometry::{Ray, Vector3f};
use crate::core::material::Material;
use crate::core::rt::Float;
use crate::core::shape::Shape;

#[derive(Copy, Clone)]
pub struct Intersection<'a> {
    pub valid: bool,
    pub visible: bool,
    pub shape: Option<&'a dyn Shape>,
    pub ray: Ray,
    pub t: Float,
    pub position: Vector3f,
    /// unit length, pointing away from the surface
    pub normal: Vector3f,
    pub material: Material,
    pub color: Color,
}

impl<'a> Intersection<'a> {
    pub const NONE: Intersection<'a> = Intersection {
        valid: false,
        visible: false,
        shape: None,
        ray: Ray {
            o: Vector3f::ZERO,
            d: Vector3f::ZERO,
        },
        t: 0.0,
        position: Vector3f::ZERO,
        normal: Vector3f::ZERO,
        material: Material {
            ambient: Color::NONE,
            diffuse: Color::NONE,
            specular: Color::NONE,
            shininess: 0.0,
        },
        color: Color::NONE,
    };

    /// A valid, visible hit at parameter *t* along *ray*.
    pub fn new(
        shape: &'a dyn Shape,
        ray: &Ray,
        t: Float,
        normal: Vector3f,
        material: Material,
        color: Color,
    ) -> Self {
        Intersection {
            valid: true,
            visible: true,
            shape: Some(shape),
            ray: *ray,
            t,
            position: ray.position(t),
            normal,
            material,
            color,
        }
    }
    /// The same hit, flagged as not to be rendered.
    pub fn hidden(self) -> Self {
        Intersection {
            visible: false,
            ..self
        }
    }
    pub fn is_hit(&self) -> bool {
        self.valid && self.visible
    }
    /// A valid hit with non-finite numbers in it is the sign of a
    /// misbehaving shape.
    pub fn is_well_formed(&self) -> bool {
        !self.valid
            || (self.t.is_finite()
                && self.position.is_finite()
                && self.normal.is_finite()
                && self.color.is_finite())
    }
}

impl<'a> fmt::Debug for Intersection<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "Intersection::NONE");
        }
        f.debug_struct("Intersection")
            .field("visible", &self.visible)
            .field("t", &self.t)
            .field("position", &self.position)
            .field("normal", &self.normal)
            .field("material", &self.material)
            .field("color", &self.color)
            .finish()
    }
}
