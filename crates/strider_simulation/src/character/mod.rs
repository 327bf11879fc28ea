//! Character domain - интерфейсы коллабораторов ядра
//!
//! Содержит:
//! - ports (GroundOracle, RigidBodyPort, AnimatorSink, CameraPort, SurfaceMaterial)
//! - input (InputSource, InputFrame)
//! - orientation (camera-relative направления, yaw-only LookRotation)

pub mod input;
pub mod orientation;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use input::*;
pub use orientation::*;
pub use ports::*;
