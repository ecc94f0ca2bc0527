#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use camgeo_matrix as matrix;

#[doc(inline)]
pub use camgeo_rotation as rotation;
