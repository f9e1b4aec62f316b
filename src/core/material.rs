//! Phong material coefficients.

// rt
use crate::core::color::Color;
use crate::core::rt::Float;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// Phong exponent
    pub shininess: Float,
}

impl Material {
    pub fn new(ambient: Color, diffuse: Color, specular: Color, shininess: Float) -> Self {
        Material {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }
    /// Material whose coefficients are fractions of a surface color,
    /// used for surfaces which only know their color (voxels).
    pub fn from_color(color: Color) -> Self {
        Material {
            ambient: color * 0.1,
            diffuse: color * 0.6,
            specular: color * 0.3,
            shininess: 10.0,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            ambient: Color::gray(0.1),
            diffuse: Color::gray(0.6),
            specular: Color::gray(0.3),
            shininess: 20.0,
        }
    }
}
