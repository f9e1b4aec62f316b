//! RGBA colors with linear arithmetic. The same type carries surface
//! colors, material coefficients and light intensities.

// std
use std::ops;
use std::ops::{Index, IndexMut};
// rt
use crate::core::rt::{clamp_t, Float};

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Color {
    pub c: [Float; 4],
}

impl Color {
    /// The "no color" sentinel: fully transparent black.
    pub const NONE: Color = Color {
        c: [0.0, 0.0, 0.0, 0.0],
    };
    pub const BLACK: Color = Color {
        c: [0.0, 0.0, 0.0, 1.0],
    };
    pub const WHITE: Color = Color {
        c: [1.0, 1.0, 1.0, 1.0],
    };

    pub fn new(r: Float, g: Float, b: Float, a: Float) -> Self {
        Color { c: [r, g, b, a] }
    }
    /// Opaque gray with all three color channels set to *v*.
    pub fn gray(v: Float) -> Self {
        Color { c: [v, v, v, 1.0] }
    }
    pub fn r(&self) -> Float {
        self.c[0]
    }
    pub fn g(&self) -> Float {
        self.c[1]
    }
    pub fn b(&self) -> Float {
        self.c[2]
    }
    pub fn alpha(&self) -> Float {
        self.c[3]
    }
    pub fn is_transparent(&self) -> bool {
        self.c[3] <= 0.0
    }
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }
    pub fn is_finite(&self) -> bool {
        self.c.iter().all(|v| v.is_finite())
    }
    pub fn clamp(&self, low: Float, high: Float) -> Color {
        let mut ret: Color = Color::default();
        for i in 0..4 {
            ret.c[i] = clamp_t(self.c[i], low, high);
        }
        ret
    }
    /// Color channels as 8-bit values, alpha dropped.
    pub fn to_rgb8<F>(&self, encode: F) -> [u8; 3]
    where
        F: Fn(Float) -> Float,
    {
        let mut rgb: [u8; 3] = [0_u8; 3];
        for (i, v) in rgb.iter_mut().enumerate() {
            let channel: Float = clamp_t(self.c[i], 0.0 as Float, 1.0 as Float);
            *v = clamp_t(255.0 as Float * encode(channel) + 0.5, 0.0, 255.0) as u8;
        }
        rgb
    }
}

impl Index<usize> for Color {
    type Output = Float;
    fn index(&self, index: usize) -> &Float {
        &self.c[index]
    }
}

impl IndexMut<usize> for Color {
    fn index_mut(&mut self, index: usize) -> &mut Float {
        &mut self.c[index]
    }
}

impl_op_ex!(+|a: &Color, b: &Color| -> Color {
    Color {
        c: [a.c[0] + b.c[0], a.c[1] + b.c[1], a.c[2] + b.c[2], a.c[3] + b.c[3]],
    }
});

impl_op_ex!(*|a: &Color, b: &Color| -> Color {
    Color {
        c: [a.c[0] * b.c[0], a.c[1] * b.c[1], a.c[2] * b.c[2], a.c[3] * b.c[3]],
    }
});

impl_op_ex!(*|a: &Color, b: Float| -> Color {
    Color {
        c: [a.c[0] * b, a.c[1] * b, a.c[2] * b, a.c[3] * b],
    }
});

impl_op_ex!(/|a: &Color, b: Float| -> Color {
    let inv: Float = 1.0 as Float / b;
    Color {
        c: [a.c[0] * inv, a.c[1] * inv, a.c[2] * inv, a.c[3] * inv],
    }
});

impl_op!(+= |a: &mut Color, b: Color| {
    for i in 0..4 {
        a.c[i] += b.c[i];
    }
});
