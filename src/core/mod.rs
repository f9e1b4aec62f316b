//! The core of the ray tracer: value types, the scene description and
//! the interfaces the rest of the crate is built on.

pub mod camera;
pub mod color;
pub mod colormap;
pub mod error;
pub mod film;
pub mod geometry;
pub mod interaction;
pub mod light;
pub mod material;
pub mod rt;
pub mod scene;
pub mod shape;
pub mod volume;
