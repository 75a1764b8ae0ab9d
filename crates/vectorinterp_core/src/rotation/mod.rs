//! Rotation representation used by the slerp kernel.
//!
//! Attitude is supplied as yaw/pitch/roll triples (Z-Y-X order), stored as
//! unit [`Quaternion`]s and converted back on read-out.

mod angles;
mod quaternion;

pub use angles::{
    normalize_angles_degrees, normalize_angles_rad, quaternion_from_ypr, rotate_xyz,
    ypr_from_quaternion,
};
pub use quaternion::Quaternion;
