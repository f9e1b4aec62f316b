//! Transfer function from voxel densities to colors.

// rt
use crate::core::color::Color;

/// Ordered list of inclusive density ranges. The first range containing
/// a density decides its color; densities outside every range map to
/// [`Color::NONE`].
#[derive(Debug, Default, Clone)]
pub struct ColorMap {
    ranges: Vec<(u8, u8, Color)>,
}

impl ColorMap {
    pub fn new() -> Self {
        ColorMap { ranges: Vec::new() }
    }
    pub fn add(mut self, min: u8, max: u8, color: Color) -> Self {
        self.ranges.push((min.min(max), min.max(max), color));
        self
    }
    pub fn get_color(&self, density: u8) -> Color {
        self.ranges
            .iter()
            .find(|(min, max, _)| density >= *min && density <= *max)
            .map(|(_, _, color)| *color)
            .unwrap_or(Color::NONE)
    }
    pub fn len(&self) -> usize {
        self.ranges.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
