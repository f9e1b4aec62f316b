//! A voxel grid (e.g. a CT scan) placed in world space.
//!
//! There is no closed form for where a ray meets a voxel grid. The ray
//! is first clipped against the grid's bounding box and then sampled
//! at a fixed step of half the smallest voxel spacing. What counts as
//! a hit depends on the [`VolumeMode`]:
//!
//! - **Iso**: the first sample with a density above zero is an opaque
//!   surface, colored by the color map. Densities the color map
//!   doesn't cover come out black.
//! - **Masked**: like *Iso*, but samples without a color map entry
//!   are passed through. The color map decides what is solid.
//! - **Composite**: colors and opacities of all samples are blended
//!   front to back until the accumulated opacity saturates. This gives
//!   a translucent volume rendering.
//!
//! Normals come from central differences of the density field.

// std
use std::path::Path;
// others
use strum_macros::{Display, EnumString};
// rt
use crate::core::color::Color;
use crate::core::colormap::ColorMap;
use crate::core::error::VolumeError;
use crate::core::geometry::{Bounds3f, Ray, Vector3f};
use crate::core::interaction::Intersection;
use crate::core::material::Material;
use crate::core::rt::{clamp_t, Float};
use crate::core::shape::Shape;
use crate::core::volume::VolumeInfo;

/// Accumulated opacity above which compositing stops early.
pub const OPACITY_CUTOFF: Float = 0.95;
/// Accumulated opacity a ray needs at the far side of the volume to
/// count as a visible hit.
pub const MIN_OPACITY: Float = 0.05;
/// Ray marching step in units of the smallest voxel spacing.
const STEP_FRACTION: Float = 0.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum VolumeMode {
    Iso,
    Masked,
    Composite,
}

impl Default for VolumeMode {
    fn default() -> Self {
        VolumeMode::Iso
    }
}

pub struct CtScan {
    position: Vector3f,
    scale: Float,
    color_map: ColorMap,
    data: Vec<u8>,
    resolution: [usize; 3],
    thickness: [Float; 3],
    bounds: Bounds3f,
    mode: VolumeMode,
}

impl CtScan {
    pub fn new(
        info: &VolumeInfo,
        data: Vec<u8>,
        position: Vector3f,
        scale: Float,
        color_map: ColorMap,
    ) -> Result<Self, VolumeError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(VolumeError::InvalidScale(scale));
        }
        let info = VolumeInfo::new(info.resolution, info.thickness)?;
        if data.len() != info.voxel_count() {
            return Err(VolumeError::VoxelCount {
                expected: info.voxel_count(),
                actual: data.len(),
            });
        }
        let extent = Vector3f::new(
            info.resolution[0] as Float * info.thickness[0] * scale,
            info.resolution[1] as Float * info.thickness[1] * scale,
            info.resolution[2] as Float * info.thickness[2] * scale,
        );
        Ok(CtScan {
            position,
            scale,
            color_map,
            data,
            resolution: info.resolution,
            thickness: info.thickness,
            bounds: Bounds3f::new(position, position + extent),
            mode: VolumeMode::default(),
        })
    }
    /// Load a volume from a metadata file and a raw voxel file.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        dat_file: P,
        raw_file: Q,
        position: Vector3f,
        scale: Float,
        color_map: ColorMap,
    ) -> Result<Self, VolumeError> {
        let info = VolumeInfo::from_file(dat_file)?;
        let data = info.read_voxels(raw_file)?;
        let scan = CtScan::new(&info, data, position, scale, color_map)?;
        log::info!(
            "Loaded {}x{}x{} volume spanning {:?}",
            scan.resolution[0],
            scan.resolution[1],
            scan.resolution[2],
            scan.bounds
        );
        Ok(scan)
    }
    pub fn with_mode(mut self, mode: VolumeMode) -> Self {
        self.mode = mode;
        self
    }
    pub fn bounds(&self) -> Bounds3f {
        self.bounds
    }
    /// Density at grid coordinates, 0 outside the grid.
    pub fn value(&self, x: i64, y: i64, z: i64) -> u8 {
        let [nx, ny, nz] = self.resolution;
        if x < 0 || y < 0 || z < 0 || x >= nx as i64 || y >= ny as i64 || z >= nz as i64 {
            return 0;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        self.data[z * ny * nx + y * nx + x]
    }
    fn step_size(&self) -> Float {
        let min_thickness: Float = self
            .thickness
            .iter()
            .fold(Float::INFINITY, |acc, t| acc.min(*t));
        min_thickness * self.scale * STEP_FRACTION
    }
    /// Grid coordinates of the voxel containing world position *p*.
    fn indexes(&self, p: &Vector3f) -> [i64; 3] {
        let local: Vector3f = p - self.position;
        [
            (local.x / self.thickness[0] / self.scale).floor() as i64,
            (local.y / self.thickness[1] / self.scale).floor() as i64,
            (local.z / self.thickness[2] / self.scale).floor() as i64,
        ]
    }
    fn density(&self, idx: &[i64; 3]) -> u8 {
        self.value(idx[0], idx[1], idx[2])
    }
    /// Outward normal from central differences of the density. Falls
    /// back to facing the ray where the density is flat.
    fn normal(&self, idx: &[i64; 3], ray: &Ray) -> Vector3f {
        let [x, y, z] = *idx;
        let gradient = Vector3f::new(
            self.value(x + 1, y, z) as Float - self.value(x - 1, y, z) as Float,
            self.value(x, y + 1, z) as Float - self.value(x, y - 1, z) as Float,
            self.value(x, y, z + 1) as Float - self.value(x, y, z - 1) as Float,
        );
        if gradient.length_squared() == 0.0 {
            return -ray.d;
        }
        -gradient.normalize()
    }
    /// Parametric range of *ray* inside the volume, clipped to
    /// `[min_dist, max_dist]`.
    fn clip(&self, ray: &Ray, min_dist: Float, max_dist: Float) -> Option<(Float, Float)> {
        if ray.is_degenerate() {
            return None;
        }
        let (t0, t1) = self.bounds.intersect_b(ray)?;
        let t_min: Float = t0.max(min_dist);
        let t_max: Float = t1.min(max_dist);
        if t_min > t_max || !t_min.is_finite() || !t_max.is_finite() {
            return None;
        }
        Some((t_min, t_max))
    }
    /// Sample positions `t_min + k * step` up to and including `t_max`.
    fn samples(&self, t_min: Float, t_max: Float) -> impl Iterator<Item = Float> {
        let step: Float = self.step_size();
        let n: u64 = ((t_max - t_min) / step).floor() as u64;
        (0..=n).map(move |k| t_min + k as Float * step)
    }
    /// First sample with a density above zero. With *masked* set,
    /// densities mapped to a transparent color are skipped.
    fn intersect_first(
        &self,
        ray: &Ray,
        t_min: Float,
        t_max: Float,
        masked: bool,
    ) -> Intersection<'_> {
        for t in self.samples(t_min, t_max) {
            let p: Vector3f = ray.position(t);
            if !self.bounds.inside(&p) {
                continue;
            }
            let idx = self.indexes(&p);
            let density: u8 = self.density(&idx);
            if density == 0 {
                continue;
            }
            let color: Color = self.color_map.get_color(density);
            if masked && color.is_transparent() {
                continue;
            }
            let normal: Vector3f = self.normal(&idx, ray);
            return Intersection::new(self, ray, t, normal, Material::from_color(color), color);
        }
        Intersection::NONE
    }
    fn intersect_composite(&self, ray: &Ray, t_min: Float, t_max: Float) -> Intersection<'_> {
        let mut acc_color: Color = Color::NONE;
        let mut acc_alpha: Float = 0.0;
        let mut last_idx: Option<[i64; 3]> = None;
        for t in self.samples(t_min, t_max) {
            let p: Vector3f = ray.position(t);
            if !self.bounds.inside(&p) {
                continue;
            }
            let idx = self.indexes(&p);
            let density: u8 = self.density(&idx);
            if density == 0 {
                continue;
            }
            let sample: Color = self.color_map.get_color(density);
            if sample.is_transparent() {
                continue;
            }
            let alpha: Float = clamp_t(sample.alpha(), 0.0, 1.0);
            acc_color = acc_color * acc_alpha + sample * (1.0 - acc_alpha);
            acc_alpha += (1.0 - acc_alpha) * alpha;
            last_idx = Some(idx);
            if acc_alpha > OPACITY_CUTOFF {
                acc_color[3] = acc_alpha;
                let normal: Vector3f = self.normal(&idx, ray);
                return Intersection::new(
                    self,
                    ray,
                    t,
                    normal,
                    Material::from_color(acc_color),
                    acc_color,
                );
            }
        }
        let idx = match last_idx {
            Some(idx) => idx,
            None => return Intersection::NONE,
        };
        acc_color[3] = acc_alpha;
        let normal: Vector3f = self.normal(&idx, ray);
        let isect = Intersection::new(
            self,
            ray,
            t_max,
            normal,
            Material::from_color(acc_color),
            acc_color,
        );
        if acc_alpha > MIN_OPACITY {
            isect
        } else {
            // too faint to be seen or to cast a shadow
            isect.hidden()
        }
    }
}

impl Shape for CtScan {
    fn intersect(&self, ray: &Ray, min_dist: Float, max_dist: Float) -> Intersection<'_> {
        let (t_min, t_max) = match self.clip(ray, min_dist, max_dist) {
            Some(range) => range,
            None => return Intersection::NONE,
        };
        match self.mode {
            VolumeMode::Iso => self.intersect_first(ray, t_min, t_max, false),
            VolumeMode::Masked => self.intersect_first(ray, t_min, t_max, true),
            VolumeMode::Composite => self.intersect_composite(ray, t_min, t_max),
        }
    }
}

impl std::fmt::Debug for CtScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtScan")
            .field("resolution", &self.resolution)
            .field("thickness", &self.thickness)
            .field("scale", &self.scale)
            .field("bounds", &self.bounds)
            .field("mode", &self.mode)
            .finish()
    }
}
