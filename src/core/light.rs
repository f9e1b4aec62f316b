//! In order for objects in a scene to be visible, there must be a
//! source of illumination so that some light is reflected from them
//! to the camera. All lights are point lights with separate ambient,
//! diffuse and specular intensities.

// rt
use crate::core::color::Color;
use crate::core::geometry::Vector3f;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub position: Vector3f,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl Light {
    pub fn new(position: Vector3f, ambient: Color, diffuse: Color, specular: Color) -> Self {
        Light {
            position,
            ambient,
            diffuse,
            specular,
        }
    }
}
