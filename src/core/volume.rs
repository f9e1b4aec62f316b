//! Read CT scan volumes from disk.
//!
//! A volume comes in two files: a small text file with metadata
//! records, and a raw file with one unsigned byte per voxel, x varying
//! fastest, then y, then z. Only two metadata records are used:
//!
//! ```text
//! Resolution:      256 256 113
//! SliceThickness:  1.0 1.0 2.0
//! ```
//!
//! Fields may be separated by any mix of colons, blanks and tabs.

// std
use std::fs::File;
use std::io::Read;
use std::path::Path;
// others
use pest::Parser;
use pest_derive::Parser;
// rt
use crate::core::error::VolumeError;
use crate::core::rt::Float;

#[derive(Parser)]
#[grammar = "core/volume.pest"]
struct VolumeInfoParser;

/// Grid dimensions and physical voxel spacing of a volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolumeInfo {
    /// number of voxels along x, y and z
    pub resolution: [usize; 3],
    /// voxel spacing along x, y and z
    pub thickness: [Float; 3],
}

impl VolumeInfo {
    pub fn new(resolution: [usize; 3], thickness: [Float; 3]) -> Result<Self, VolumeError> {
        if resolution.iter().any(|r| *r == 0) {
            return Err(VolumeError::InvalidResolution(resolution));
        }
        if resolution[0]
            .checked_mul(resolution[1])
            .and_then(|n| n.checked_mul(resolution[2]))
            .is_none()
        {
            return Err(VolumeError::InvalidResolution(resolution));
        }
        if thickness.iter().any(|t| !t.is_finite() || *t <= 0.0) {
            return Err(VolumeError::InvalidThickness(thickness));
        }
        Ok(VolumeInfo {
            resolution,
            thickness,
        })
    }
    /// Parse metadata text.
    pub fn parse(text: &str) -> Result<Self, VolumeError> {
        let pairs = VolumeInfoParser::parse(Rule::volume_info, text)
            .map_err(|e| VolumeError::Metadata(e.to_string()))?;
        let mut resolution: Option<[usize; 3]> = None;
        let mut thickness: Option<[Float; 3]> = None;
        for record in pairs.flat_map(|pair| pair.into_inner()) {
            match record.as_rule() {
                Rule::resolution => {
                    let mut values: [usize; 3] = [0; 3];
                    for (value, field) in values.iter_mut().zip(record.into_inner()) {
                        *value = field
                            .as_str()
                            .parse::<usize>()
                            .map_err(|e| VolumeError::Metadata(e.to_string()))?;
                    }
                    resolution = Some(values);
                }
                Rule::thickness => {
                    let mut values: [Float; 3] = [0.0; 3];
                    for (value, field) in values.iter_mut().zip(record.into_inner()) {
                        *value = field
                            .as_str()
                            .parse::<Float>()
                            .map_err(|e| VolumeError::Metadata(e.to_string()))?;
                    }
                    thickness = Some(values);
                }
                _ => {}
            }
        }
        let resolution = resolution.ok_or(VolumeError::MissingRecord("Resolution"))?;
        let thickness = thickness.ok_or(VolumeError::MissingRecord("SliceThickness"))?;
        VolumeInfo::new(resolution, thickness)
    }
    /// Read and parse a metadata file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VolumeError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Parsing volume metadata {:?}", path.as_ref());
        VolumeInfo::parse(&text)
    }
    pub fn voxel_count(&self) -> usize {
        self.resolution[0] * self.resolution[1] * self.resolution[2]
    }
    /// Read exactly [`voxel_count`](Self::voxel_count) bytes from the
    /// start of a raw voxel file. Anything after them is ignored.
    pub fn read_voxels<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>, VolumeError> {
        let expected: usize = self.voxel_count();
        let file = File::open(path.as_ref())?;
        let mut data: Vec<u8> = Vec::with_capacity(expected);
        file.take(expected as u64).read_to_end(&mut data)?;
        if data.len() != expected {
            return Err(VolumeError::VoxelCount {
                expected,
                actual: data.len(),
            });
        }
        log::debug!("Read {} voxels from {:?}", expected, path.as_ref());
        Ok(data)
    }
}
