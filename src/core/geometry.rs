//! Almost all nontrivial graphics programs are built on a foundation
//! of geometric classes. These classes represent mathematical
//! constructs like vectors, rays and bounding boxes.
//!
//! # Vectors
//!
//! A single **Vector3f** type is used for positions and for
//! directions. The renderer keeps track of which is which by
//! convention only.
//!
//! ```rust
//! use rs_rt::core::geometry::{vec3_cross_vec3, Vector3f};
//!
//!     let x = Vector3f::new(1.0, 0.0, 0.0);
//!     let y = Vector3f::new(0.0, 1.0, 0.0);
//!     let z = vec3_cross_vec3(&x, &y);
//!
//!     println!("{:?} x {:?} = {:?}", x, y, z);
//! ```
//!
//! # Rays
//!
//! A **ray** is a semi-infinite line specified by its origin and
//! direction. The direction is normalized on construction, so the ray
//! parameter *t* measures distance from the origin.
//!
//! ```rust
//! use rs_rt::core::geometry::{Ray, Vector3f};
//!
//!     let ray = Ray::through(
//!         &Vector3f::new(0.0, 0.0, 5.0),
//!         &Vector3f::new(0.0, 0.0, 0.0),
//!     );
//!     println!("{:?}", ray.position(5.0));
//! ```
//!
//! # Bounding Boxes
//!
//! **Bounds3f** represents an axis-aligned box. Its slab test is the
//! culling step in front of every volume intersection.

// std
use std::ops;
use std::ops::{Index, IndexMut};
// others
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
// rt
use crate::core::rt::{Float, PARALLEL_EPSILON};

#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum XYZEnum {
    X = 0,
    Y = 1,
    Z = 2,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Vector3f {
    pub const ZERO: Vector3f = Vector3f {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Vector3f { x, y, z }
    }
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }
    /// Compute a new vector pointing in the same direction but with unit
    /// length.
    pub fn normalize(&self) -> Vector3f {
        *self / self.length()
    }
    /// Component-wise product.
    pub fn mul_element(&self, v: &Vector3f) -> Vector3f {
        Vector3f {
            x: self.x * v.x,
            y: self.y * v.y,
            z: self.z * v.z,
        }
    }
    /// Component-wise quotient.
    pub fn div_element(&self, v: &Vector3f) -> Vector3f {
        Vector3f {
            x: self.x / v.x,
            y: self.y / v.y,
            z: self.z / v.z,
        }
    }
}

impl Index<XYZEnum> for Vector3f {
    type Output = Float;
    fn index(&self, index: XYZEnum) -> &Float {
        match index {
            XYZEnum::X => &self.x,
            XYZEnum::Y => &self.y,
            XYZEnum::Z => &self.z,
        }
    }
}

impl IndexMut<XYZEnum> for Vector3f {
    fn index_mut(&mut self, index: XYZEnum) -> &mut Float {
        match index {
            XYZEnum::X => &mut self.x,
            XYZEnum::Y => &mut self.y,
            XYZEnum::Z => &mut self.z,
        }
    }
}

impl_op!(-|a: Vector3f| -> Vector3f {
    Vector3f {
        x: -a.x,
        y: -a.y,
        z: -a.z,
    }
});

impl_op_ex!(+|a: &Vector3f, b: &Vector3f| -> Vector3f {
    Vector3f {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(-|a: &Vector3f, b: &Vector3f| -> Vector3f {
    Vector3f {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(*|a: &Vector3f, b: Float| -> Vector3f {
    Vector3f {
        x: a.x * b,
        y: a.y * b,
        z: a.z * b,
    }
});

impl_op_ex!(/|a: &Vector3f, b: Float| -> Vector3f {
    let inv: Float = 1.0 as Float / b;
    Vector3f {
        x: a.x * inv,
        y: a.y * inv,
        z: a.z * inv,
    }
});

impl_op!(+= |a: &mut Vector3f, b: Vector3f| {
    a.x += b.x;
    a.y += b.y;
    a.z += b.z;
});

/// Product of the Euclidean magnitudes of the two vectors and the
/// cosine of the angle between them. A return value of zero means
/// both vectors are orthogonal, a value if one means they are
/// codirectional.
pub fn vec3_dot_vec3f(v1: &Vector3f, v2: &Vector3f) -> Float {
    v1.x * v2.x + v1.y * v2.y + v1.z * v2.z
}

/// Given two vectors in 3D, the cross product is a vector that is
/// perpendicular to both of them.
pub fn vec3_cross_vec3(v1: &Vector3f, v2: &Vector3f) -> Vector3f {
    Vector3f {
        x: (v1.y * v2.z) - (v1.z * v2.y),
        y: (v1.z * v2.x) - (v1.x * v2.z),
        z: (v1.x * v2.y) - (v1.y * v2.x),
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Ray {
    /// origin
    pub o: Vector3f,
    /// direction (unit length)
    pub d: Vector3f,
}

impl Ray {
    pub fn new(o: &Vector3f, d: &Vector3f) -> Self {
        Ray {
            o: *o,
            d: d.normalize(),
        }
    }
    /// Ray starting at *from* pointing towards *to*.
    pub fn through(from: &Vector3f, to: &Vector3f) -> Self {
        Ray::new(from, &(to - from))
    }
    pub fn position(&self, t: Float) -> Vector3f {
        self.o + self.d * t
    }
    /// A zero, NaN or infinite direction can't be intersected with
    /// anything.
    pub fn is_degenerate(&self) -> bool {
        !self.d.is_finite() || self.d.length_squared() == 0.0
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Bounds3f {
    pub p_min: Vector3f,
    pub p_max: Vector3f,
}

impl Bounds3f {
    pub fn new(p1: Vector3f, p2: Vector3f) -> Self {
        let p_min = Vector3f {
            x: p1.x.min(p2.x),
            y: p1.y.min(p2.y),
            z: p1.z.min(p2.z),
        };
        let p_max = Vector3f {
            x: p1.x.max(p2.x),
            y: p1.y.max(p2.y),
            z: p1.z.max(p2.z),
        };
        Bounds3f { p_min, p_max }
    }
    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }
    /// Closed containment test.
    pub fn inside(&self, p: &Vector3f) -> bool {
        p.x >= self.p_min.x
            && p.x <= self.p_max.x
            && p.y >= self.p_min.y
            && p.y <= self.p_max.y
            && p.z >= self.p_min.z
            && p.z <= self.p_max.z
    }
    /// Slab test. Returns the parametric interval `(t0, t1)` over which
    /// the (unbounded) ray overlaps the box, or `None` if it misses.
    ///
    /// Axes where the direction is (nearly) zero don't constrain the
    /// interval; the origin just has to lie inside that slab.
    pub fn intersect_b(&self, ray: &Ray) -> Option<(Float, Float)> {
        let mut t0: Float = Float::NEG_INFINITY;
        let mut t1: Float = Float::INFINITY;
        for i in XYZEnum::iter() {
            if ray.d[i].abs() < PARALLEL_EPSILON {
                if ray.o[i] < self.p_min[i] || ray.o[i] > self.p_max[i] {
                    return None;
                }
                continue;
            }
            // update interval for _i_th bounding box slab
            let inv_ray_dir: Float = 1.0 as Float / ray.d[i];
            let mut t_near: Float = (self.p_min[i] - ray.o[i]) * inv_ray_dir;
            let mut t_far: Float = (self.p_max[i] - ray.o[i]) * inv_ray_dir;
            if t_near > t_far {
                std::mem::swap(&mut t_near, &mut t_far);
            }
            t0 = t0.max(t_near);
            t1 = t1.min(t_far);
            if t0 > t1 {
                return None;
            }
        }
        Some((t0, t1))
    }
}
