//! All geometric primitives implement the
//! [`Shape`](crate::core::shape::Shape) interface, and the rest of the
//! renderer can use this interface without needing any details about
//! the underlying shape.
//!
//! - CtScan
//! - Ellipsoid
//!
//! ## Ellipsoids
//!
//! Ellipsoids are quadrics. Scaling the ray by the inverse semi-axes
//! turns the ellipsoid into a sphere, so intersecting it comes down to
//! solving a quadratic equation. A sphere is an ellipsoid with all
//! semi-axes set to one.
//!
//! ## CT Scans
//!
//! A CT scan is a regular grid of density samples. A color map turns
//! densities into colors, and rays march through the grid in small
//! steps looking for colored voxels. Surface normals are estimated
//! from the density gradient.

pub mod ctscan;
pub mod ellipsoid;
