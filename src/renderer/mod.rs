//! Software rendering module
//!
//! Rasterizes each frame into an RGBA8 buffer on the CPU: bodies first, then
//! the additive lighting composite, then overlay particles and score text.
//! The finished buffer is handed to the surface as raw bytes.

pub mod frame;
pub mod lighting;
pub mod scene;
pub mod text;

pub use frame::Frame;
pub use lighting::{FalloffTexture, LightOverlay};
pub use scene::SceneRenderer;
