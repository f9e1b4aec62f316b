//! # rs_rt
//!
//! [Rust][rust] crate for a small ray tracer which mixes analytic
//! surfaces with voxel volumes such as CT scans. Rays are cast from a
//! pinhole camera, the nearest visible surface along each ray is shaded
//! with the Phong lighting model, and shadows are hard.
//!
//! The main render loop can be found [here].
//!
//! Geometry comes in two flavours:
//!
//! 1. [ellipsoids][ellipsoid], intersected in closed form
//! 2. [CT scans][ctscan], intersected by ray marching through the voxel
//!    grid
//!
//! [rust]: https://www.rust-lang.org
//! [here]: integrators/fn.render.html
//! [ellipsoid]: shapes/ellipsoid/struct.Ellipsoid.html
//! [ctscan]: shapes/ctscan/struct.CtScan.html

#[macro_use]
extern crate impl_ops;

pub mod blockqueue;
pub mod core;
pub mod integrators;
pub mod shapes;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
