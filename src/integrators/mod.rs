//! An **Integrator** computes the color seen along a camera ray. The
//! [`render`] function drives an integrator over every pixel of a
//! [`Film`].
//!
//! - PhongIntegrator
//!
//! ## Phong
//!
//! The **PhongIntegrator** finds the nearest visible surface along a
//! ray and evaluates the Phong lighting model there: an ambient term
//! from every light, plus diffuse and specular terms from every light
//! which isn't blocked by another visible surface. Rays which hit
//! nothing get the background color.
//!
//! ## Rendering
//!
//! The image is split into square tiles, handed out in Morton order
//! by a [`BlockQueue`]. Worker threads shade whole tiles and send them
//! to the calling thread, which merges them into the film. Each pixel
//! depends on nothing but its own ray, so the result is the same for
//! any number of threads.

// std
use std::path::Path;
// others
use pbr::ProgressBar;
// rt
use crate::blockqueue::BlockQueue;
use crate::core::camera::Camera;
use crate::core::color::Color;
use crate::core::error::RenderError;
use crate::core::film::{Film, FilmTile};
use crate::core::geometry::{Ray, Vector3f};
use crate::core::rt::Float;
use crate::core::scene::Scene;

pub mod phong;

pub trait Integrator: Send + Sync {
    /// Color arriving at the ray origin along *ray*.
    fn li(&self, ray: &Ray, scene: &Scene) -> Color;
}

/// How [`render`] schedules work.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// number of worker threads, 0 means one per logical core
    pub num_threads: u8,
    /// edge length of an image tile in pixels
    pub tile_size: u32,
    /// show a progress bar on stdout
    pub progress: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            num_threads: 0,
            tile_size: 16,
            progress: false,
        }
    }
}

/// Map pixel index *n* of an image axis with *img_size* pixels to a
/// coordinate on a view plane axis of extent *plane_size*. Pixel 0
/// maps to the positive end, so image rows run top down.
pub fn image_to_view_plane(n: u32, img_size: u32, plane_size: Float) -> Float {
    -(n as Float) * plane_size / img_size as Float + plane_size / 2.0
}

/// Primary ray through pixel `(i, j)` of a `width` x `height` image.
pub fn generate_ray(camera: &Camera, i: u32, j: u32, width: u32, height: u32) -> Ray {
    let x: Float = image_to_view_plane(i, width, camera.view_plane_width);
    let y: Float = image_to_view_plane(j, height, camera.view_plane_height);
    let pixel: Vector3f = camera.position
        + camera.direction * camera.view_plane_distance
        + camera.right() * x
        + camera.up * y;
    Ray::through(&camera.position, &pixel)
}

/// **Main function** to **render** a scene into *film*, multi-threaded.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    integrator: &dyn Integrator,
    film: &mut Film,
    settings: &RenderSettings,
) -> Result<(), RenderError> {
    let (width, height) = (film.width, film.height);
    let num_cores: usize = if settings.num_threads == 0_u8 {
        num_cpus::get()
    } else {
        settings.num_threads as usize
    };
    let block_queue = BlockQueue::new(width, height, settings.tile_size);
    log::info!(
        "Rendering {}x{} pixels in {} tiles with {} thread(s) ...",
        width,
        height,
        block_queue.len(),
        num_cores
    );
    let bq = &block_queue;
    let n_tiles: usize = bq.len();
    crossbeam::scope(|scope| {
        let (pixel_tx, pixel_rx) = crossbeam_channel::bounded::<FilmTile>(num_cores);
        // spawn worker threads
        for _ in 0..num_cores {
            let pixel_tx = pixel_tx.clone();
            scope.spawn(move |_| {
                while let Some(tile) = bq.next() {
                    let mut film_tile = FilmTile::new(tile);
                    for (x, y) in tile.pixels() {
                        let ray: Ray = generate_ray(camera, x, y, width, height);
                        let color: Color = integrator.li(&ray, scene);
                        film_tile.set_pixel(x, y, color);
                    }
                    // send the tile through the channel to main thread
                    if pixel_tx.send(film_tile).is_err() {
                        break;
                    }
                }
            });
        }
        // only the workers hold senders from here on
        drop(pixel_tx);
        let mut progress: Option<ProgressBar<std::io::Stdout>> = if settings.progress {
            Some(ProgressBar::new(n_tiles as u64))
        } else {
            None
        };
        for film_tile in pixel_rx.iter() {
            // merge image tile into _Film_
            film.merge_film_tile(&film_tile);
            if let Some(pb) = progress.as_mut() {
                pb.inc();
            }
        }
        if let Some(pb) = progress.as_mut() {
            pb.finish();
        }
    })
    .map_err(|_| RenderError::WorkerPanic)
}

/// Render a `width` x `height` image and write it to *path*.
pub fn render_to_file<P: AsRef<Path>>(
    scene: &Scene,
    camera: &Camera,
    integrator: &dyn Integrator,
    film: Film,
    settings: &RenderSettings,
    path: P,
) -> Result<Film, RenderError> {
    let mut film = film;
    render(scene, camera, integrator, &mut film, settings)?;
    film.write_image(path)?;
    Ok(film)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::light::Light;
    use crate::integrators::phong::PhongIntegrator;
    use crate::shapes::ellipsoid::Ellipsoid;
    use approx::assert_abs_diff_eq;

    fn camera() -> Camera {
        Camera::new(
            Vector3f::new(0.0, 0.0, 10.0),
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(0.0, 1.0, 0.0),
            1.0,
            0.5,
            0.5,
        )
    }

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene
            .add_shape(Ellipsoid::with_color(
                Vector3f::ZERO,
                Vector3f::new(1.0, 1.5, 1.0),
                1.0,
                Color::new(0.9, 0.2, 0.2, 1.0),
            ))
            .add_shape(Ellipsoid::with_color(
                Vector3f::new(1.5, 1.0, 2.0),
                Vector3f::new(1.0, 1.0, 1.0),
                0.5,
                Color::new(0.2, 0.2, 0.9, 1.0),
            ))
            .add_light(Light::new(
                Vector3f::new(5.0, 5.0, 10.0),
                Color::gray(0.5),
                Color::gray(1.0),
                Color::gray(1.0),
            ));
        scene
    }

    #[test]
    fn image_to_view_plane_mapping() {
        assert_abs_diff_eq!(image_to_view_plane(0, 100, 2.0), 1.0);
        assert_abs_diff_eq!(image_to_view_plane(50, 100, 2.0), 0.0);
        assert_abs_diff_eq!(image_to_view_plane(100, 100, 2.0), -1.0);
    }

    #[test]
    fn center_ray_follows_viewing_direction() {
        let camera = camera();
        let ray = generate_ray(&camera, 50, 50, 100, 100);
        assert_eq!(ray.o, Vector3f::new(0.0, 0.0, 10.0));
        assert_abs_diff_eq!(ray.d.z, -1.0, epsilon = 1e-12);
        let ray = generate_ray(&camera, 0, 0, 100, 100);
        assert!(ray.d.y > 0.0);
        assert!(ray.d.x > 0.0);
        assert_abs_diff_eq!(ray.d.length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rendering_twice_is_identical() {
        let scene = scene();
        let phong = PhongIntegrator::default();
        let settings = RenderSettings::default();
        let mut first = Film::new(40, 30).unwrap();
        let mut second = Film::new(40, 30).unwrap();
        render(&scene, &camera(), &phong, &mut first, &settings).unwrap();
        render(&scene, &camera(), &phong, &mut second, &settings).unwrap();
        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn output_does_not_depend_on_thread_count() {
        let scene = scene();
        let phong = PhongIntegrator::default();
        let mut single = Film::new(37, 23).unwrap();
        let mut many = Film::new(37, 23).unwrap();
        let one = RenderSettings {
            num_threads: 1,
            tile_size: 16,
            progress: false,
        };
        let four = RenderSettings {
            num_threads: 4,
            tile_size: 7,
            progress: false,
        };
        render(&scene, &camera(), &phong, &mut single, &one).unwrap();
        render(&scene, &camera(), &phong, &mut many, &four).unwrap();
        assert_eq!(single.pixels(), many.pixels());
    }

    #[test]
    fn every_pixel_is_rendered() {
        let scene = Scene::new();
        let phong = PhongIntegrator::default();
        let mut film = Film::new(19, 5).unwrap();
        render(&scene, &camera(), &phong, &mut film, &RenderSettings::default()).unwrap();
        assert!(film.pixels().iter().all(|c| *c == phong.background));
    }
}
