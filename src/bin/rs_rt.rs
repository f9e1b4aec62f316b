// std
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
// others
use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};
use thiserror::Error;
// rt
use rs_rt::core::camera::Camera;
use rs_rt::core::color::Color;
use rs_rt::core::colormap::ColorMap;
use rs_rt::core::error::{RenderError, VolumeError};
use rs_rt::core::film::Film;
use rs_rt::core::geometry::Vector3f;
use rs_rt::core::light::Light;
use rs_rt::core::material::Material;
use rs_rt::core::rt::Float;
use rs_rt::core::scene::Scene;
use rs_rt::core::volume::VolumeInfo;
use rs_rt::integrators::phong::PhongIntegrator;
use rs_rt::integrators::{render_to_file, RenderSettings};
use rs_rt::shapes::ctscan::{CtScan, VolumeMode};
use rs_rt::shapes::ellipsoid::Ellipsoid;
use rs_rt::VERSION;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a demo scene of ellipsoids, optionally around a CT scan.
#[derive(Parser)]
#[command(name = "rs_rt", version = VERSION)]
struct Cli {
    /// Image width in pixels
    #[arg(long, default_value = "800")]
    width: u32,
    /// Image height in pixels
    #[arg(long, default_value = "600")]
    height: u32,
    /// Output file; the format follows the extension
    #[arg(short, long, default_value = "rs_rt.png")]
    output: PathBuf,
    /// use specified number of threads for rendering (0 = all cores)
    #[arg(short = 't', long, default_value = "0")]
    nthreads: u8,
    /// Edge length of a render tile in pixels
    #[arg(long, default_value = "16")]
    tile_size: u32,
    /// Number of frames on a camera orbit around the scene
    #[arg(long, default_value = "1")]
    frames: u32,
    /// Volume metadata file (needs --raw)
    #[arg(long, requires = "raw")]
    dat: Option<PathBuf>,
    /// Raw voxel file (needs --dat)
    #[arg(long, requires = "dat")]
    raw: Option<PathBuf>,
    /// World units per unit of slice thickness
    #[arg(long, default_value = "0.1")]
    scan_scale: Float,
    /// How rays interact with the CT scan: iso, masked or composite
    #[arg(long, default_value = "iso")]
    volume_mode: VolumeMode,
    /// Store sRGB encoded pixels
    #[arg(long)]
    gamma: bool,
    /// Don't show a progress bar
    #[arg(long)]
    no_progress: bool,
    /// Set the logging level
    #[arg(long, default_value = "info")]
    debug_level: LogLevel,
}

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Volume(#[from] VolumeError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Densities of soft tissue and bone in an 8-bit scan.
fn demo_color_map() -> ColorMap {
    ColorMap::new()
        .add(40, 90, Color::new(0.85, 0.55, 0.45, 0.05))
        .add(91, 160, Color::new(0.9, 0.8, 0.7, 0.3))
        .add(161, 255, Color::new(0.95, 0.95, 0.9, 1.0))
}

/// Load a CT scan centered on the origin.
fn load_scan(dat: &Path, raw: &Path, scale: Float, mode: VolumeMode) -> Result<CtScan, AppError> {
    let info = VolumeInfo::from_file(dat)?;
    let extent = Vector3f::new(
        info.resolution[0] as Float * info.thickness[0],
        info.resolution[1] as Float * info.thickness[1],
        info.resolution[2] as Float * info.thickness[2],
    ) * scale;
    let scan = CtScan::from_files(dat, raw, extent * -0.5, scale, demo_color_map())?;
    Ok(scan.with_mode(mode))
}

fn create_scene(args: &Cli) -> Result<Scene, AppError> {
    let mut scene = Scene::new();
    scene
        .add_shape(Ellipsoid::with_color(
            Vector3f::new(-12.0, 0.0, -4.0),
            Vector3f::new(1.0, 2.0, 1.0),
            3.0,
            Color::new(0.9, 0.3, 0.2, 1.0),
        ))
        .add_shape(Ellipsoid::new(
            Vector3f::new(12.0, -2.0, -3.0),
            Vector3f::new(1.0, 1.0, 1.0),
            4.0,
            Material::new(
                Color::gray(0.1),
                Color::gray(0.5),
                Color::gray(0.8),
                80.0,
            ),
            Color::new(0.2, 0.4, 0.9, 1.0),
        ))
        .add_shape(Ellipsoid::with_color(
            Vector3f::new(0.0, -1010.0, 0.0),
            Vector3f::new(1.0, 1.0, 1.0),
            1000.0,
            Color::new(0.6, 0.6, 0.55, 1.0),
        ))
        .add_light(Light::new(
            Vector3f::new(40.0, 60.0, 60.0),
            Color::gray(0.6),
            Color::gray(0.8),
            Color::gray(1.0),
        ))
        .add_light(Light::new(
            Vector3f::new(-50.0, 30.0, 20.0),
            Color::gray(0.3),
            Color::gray(0.4),
            Color::gray(0.5),
        ));
    if let (Some(dat), Some(raw)) = (&args.dat, &args.raw) {
        let scan = load_scan(dat, raw, args.scan_scale, args.volume_mode)?;
        info!("Added {:?}", scan);
        scene.add_shape(scan);
    }
    Ok(scene)
}

/// Camera on a circle around the scene, *angle* radians from the
/// front.
fn orbit_camera(angle: Float, width: u32, height: u32) -> Camera {
    let radius: Float = 60.0;
    let position = Vector3f::new(radius * angle.sin(), 15.0, radius * angle.cos());
    let aspect: Float = width as Float / height as Float;
    Camera::look_at(
        position,
        Vector3f::ZERO,
        Vector3f::new(0.0, 1.0, 0.0),
        1.0,
        0.5 * aspect,
        0.5,
    )
}

/// *output* with the frame number inserted before the extension.
fn frame_path(output: &Path, frame: u32, frames: u32) -> PathBuf {
    if frames <= 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{}_{:04}.{}", stem, frame, ext.to_string_lossy()),
        None => format!("{}_{:04}", stem, frame),
    };
    output.with_file_name(name)
}

fn run(args: &Cli) -> Result<(), AppError> {
    let scene = create_scene(args)?;
    let integrator = PhongIntegrator::default();
    let settings = RenderSettings {
        num_threads: args.nthreads,
        tile_size: args.tile_size,
        progress: !args.no_progress,
    };
    let frames: u32 = args.frames.max(1);
    for frame in 0..frames {
        let angle: Float = 2.0 * PI * frame as Float / frames as Float;
        let camera = orbit_camera(angle, args.width, args.height);
        let film = Film::new(args.width, args.height)?.with_gamma(args.gamma);
        let path = frame_path(&args.output, frame, frames);
        info!("Frame {}/{} -> {:?}", frame + 1, frames, path);
        render_to_file(&scene, &camera, &integrator, film, &settings, &path)?;
    }
    Ok(())
}

fn main() {
    let args = Cli::parse();
    init_logger(args.debug_level.clone().into());
    let num_cores = num_cpus::get();
    info!("rs_rt version {} [Detected {} cores]", VERSION, num_cores);
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
