pub mod quaternion;
pub mod vector3;

pub use quaternion::*;
pub use vector3::*;
