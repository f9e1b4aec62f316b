//! The **Film** holds the final color of every pixel. Worker threads
//! never write to it directly: each shades a [`FilmTile`] of its own
//! and the rendering thread merges finished tiles into the film. When
//! the main rendering loop exits, the film writes the image to file.

// std
use std::path::Path;
// rt
use crate::blockqueue::Tile;
use crate::core::color::Color;
use crate::core::error::RenderError;
use crate::core::rt::gamma_correct;

/// Shaded pixels of one image tile.
#[derive(Debug, Clone)]
pub struct FilmTile {
    pub bounds: Tile,
    pixels: Vec<Color>,
}

impl FilmTile {
    pub fn new(bounds: Tile) -> Self {
        FilmTile {
            bounds,
            pixels: vec![Color::BLACK; bounds.area()],
        }
    }
    fn get_pixel_index(&self, x: u32, y: u32) -> usize {
        ((y - self.bounds.y0) * self.bounds.width() + (x - self.bounds.x0)) as usize
    }
    /// Store the color of image pixel `(x, y)`, which must lie inside
    /// the tile.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let index: usize = self.get_pixel_index(x, y);
        self.pixels[index] = color;
    }
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[self.get_pixel_index(x, y)]
    }
}

#[derive(Debug, Clone)]
pub struct Film {
    pub width: u32,
    pub height: u32,
    /// encode with the sRGB curve when writing 8-bit output
    pub gamma: bool,
    pixels: Vec<Color>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Film {
            width,
            height,
            gamma: false,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        })
    }
    pub fn with_gamma(mut self, gamma: bool) -> Self {
        self.gamma = gamma;
        self
    }
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let index: usize = (y * self.width + x) as usize;
        self.pixels[index] = color;
    }
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
    pub fn merge_film_tile(&mut self, tile: &FilmTile) {
        for (x, y) in tile.bounds.pixels() {
            let color: Color = tile.get_pixel(x, y);
            self.set_pixel(x, y, color);
        }
    }
    /// Pixels as interleaved 8-bit RGB, row by row.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let encode = |v| if self.gamma { gamma_correct(v) } else { v };
        self.pixels
            .iter()
            .flat_map(|color| color.to_rgb8(encode).to_vec())
            .collect()
    }
    /// Write the film as 8-bit RGB image; the format follows the file
    /// extension.
    pub fn write_image<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let buffer: Vec<u8> = self.to_rgb8();
        log::info!(
            "Writing image {:?} with {}x{} pixels",
            path.as_ref(),
            self.width,
            self.height
        );
        image::save_buffer(
            path.as_ref(),
            &buffer,
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            Film::new(0, 10),
            Err(RenderError::InvalidDimensions {
                width: 0,
                height: 10
            })
        ));
        assert!(Film::new(3, 0).is_err());
    }

    #[test]
    fn merge_tile_writes_its_pixels_only() {
        let mut film = Film::new(4, 3).unwrap();
        let mut tile = FilmTile::new(Tile {
            x0: 2,
            y0: 1,
            x1: 4,
            y1: 3,
        });
        for (x, y) in tile.bounds.pixels() {
            tile.set_pixel(x, y, Color::WHITE);
        }
        film.merge_film_tile(&tile);
        assert_eq!(film.get_pixel(0, 0), Color::BLACK);
        assert_eq!(film.get_pixel(1, 2), Color::BLACK);
        assert_eq!(film.get_pixel(2, 1), Color::WHITE);
        assert_eq!(film.get_pixel(3, 2), Color::WHITE);
    }

    #[test]
    fn rgb8_clamps_and_optionally_gamma_encodes() {
        let mut film = Film::new(2, 1).unwrap();
        film.set_pixel(0, 0, Color::new(2.0, -1.0, 0.5, 1.0));
        film.set_pixel(1, 0, Color::gray(0.0));
        assert_eq!(film.to_rgb8(), vec![255, 0, 128, 0, 0, 0]);
        let film = film.with_gamma(true);
        let rgb = film.to_rgb8();
        assert_eq!(rgb[0], 255);
        // sRGB brightens mid tones
        assert!(rgb[2] > 128);
    }

    #[test]
    fn png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("film.png");
        let mut film = Film::new(3, 2).unwrap();
        film.set_pixel(0, 0, Color::new(1.0, 0.0, 0.0, 1.0));
        film.set_pixel(2, 1, Color::new(0.0, 0.0, 1.0, 1.0));
        film.write_image(&path).unwrap();
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(2, 1).0, [0, 0, 255]);
    }
}
