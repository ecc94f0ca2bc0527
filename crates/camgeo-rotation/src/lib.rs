//! Rotation representation conversions for camera geometry pipelines.
//!
//! Conversions between axis-angle, quaternion, rotation matrix, Euler and
//! azimuth/elevation/twist representations, plus construction of orthonormal
//! frames from a single normal. Representations are transient plain arrays;
//! matrices are 3x3 row-major. Every angle-bearing entry point states its
//! unit; internal computation is always in radians.

pub mod convert;
pub mod frame;

/// Axis-angle rotation: unit axis in the first three slots, angle in radians
/// packed last.
pub type AxisAngle = [f64; 4];

/// Quaternion as (x, y, z, w), scalar part last. Unit magnitude is expected
/// by the conversions and never restored by them.
pub type Quaternion = [f64; 4];

/// 3x3 row-major rotation matrix.
pub type RotationMatrix = [f64; 9];

pub use crate::convert::{
    axis_angle_to_quaternion, axis_angle_to_rotation_matrix, euler_to_rotation_matrix,
    quaternion_to_rotation_matrix, rotation_between_normals, rotation_matrix_around_z,
    rotation_matrix_to_euler,
};
pub use crate::frame::{
    az_el_to_direction, direction_to_az_el, local_coordinate_frame, rotation_frame_error,
    rotation_matrix_to_az_el_twist, CANONICAL_X, CANONICAL_Y, CANONICAL_Z,
};
