//! A pinhole **Camera**. Primary rays start at the camera position and
//! pass through a view plane placed `view_plane_distance` in front of
//! it, perpendicular to the viewing direction. See
//! [`generate_ray`](crate::integrators::generate_ray).

// rt
use crate::core::geometry::{vec3_cross_vec3, Vector3f};
use crate::core::rt::Float;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vector3f,
    /// unit viewing direction
    pub direction: Vector3f,
    /// unit up vector
    pub up: Vector3f,
    pub view_plane_distance: Float,
    pub view_plane_width: Float,
    pub view_plane_height: Float,
}

impl Camera {
    pub fn new(
        position: Vector3f,
        direction: Vector3f,
        up: Vector3f,
        view_plane_distance: Float,
        view_plane_width: Float,
        view_plane_height: Float,
    ) -> Self {
        Camera {
            position,
            direction: direction.normalize(),
            up: up.normalize(),
            view_plane_distance,
            view_plane_width,
            view_plane_height,
        }
    }
    /// Camera at *position* looking at *target*.
    pub fn look_at(
        position: Vector3f,
        target: Vector3f,
        up: Vector3f,
        view_plane_distance: Float,
        view_plane_width: Float,
        view_plane_height: Float,
    ) -> Self {
        Camera::new(
            position,
            target - position,
            up,
            view_plane_distance,
            view_plane_width,
            view_plane_height,
        )
    }
    pub fn right(&self) -> Vector3f {
        vec3_cross_vec3(&self.direction, &self.up).normalize()
    }
}
