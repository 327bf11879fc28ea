//! ECS Components персонажа - реализации портов ядра
//!
//! Организация:
//! - character: маркер CharacterController (required components)
//! - body: CharacterBody (RigidBodyPort)
//! - ground: GroundProbe (GroundOracle)
//! - animator: AnimatorParams (AnimatorSink)
//! - camera: FollowCamera (CameraPort)
//! - input: ControllerInput (InputSource)
//! - surface: SurfaceFriction (SurfaceMaterial)
//! - root_motion: RootMotion (stand-in для animation root motion)

pub mod animator;
pub mod body;
pub mod camera;
pub mod character;
pub mod ground;
pub mod input;
pub mod root_motion;
pub mod surface;

// Re-exports для удобного импорта
pub use animator::*;
pub use body::*;
pub use camera::*;
pub use character::*;
pub use ground::*;
pub use input::*;
pub use root_motion::*;
pub use surface::*;
