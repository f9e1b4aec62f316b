//! Careful abstraction of geometric shapes in a ray tracer is a key
//! component of a clean system design. All geometric primitives
//! implement a common interface, and the rest of the renderer can use
//! this interface without needing any details about the underlying
//! shape. Each shape is free to find its hit points however it likes,
//! in closed form or by marching through a volume.

// rt
use crate::core::geometry::Ray;
use crate::core::interaction::Intersection;
use crate::core::rt::Float;

pub trait Shape: Send + Sync {
    /// Find the nearest surface point along *ray* with a parameter in
    /// the closed interval `[min_dist, max_dist]`, or
    /// [`Intersection::NONE`].
    fn intersect(&self, ray: &Ray, min_dist: Float, max_dist: Float) -> Intersection<'_>;
}
