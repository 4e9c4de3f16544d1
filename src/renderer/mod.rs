//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into colored triangles in screen pixels
//! and drawn with a single flat-color pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Visuals, build};
pub use vertex::Vertex;
