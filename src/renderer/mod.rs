//! WebGPU rendering module
//!
//! Scenes are assembled on the CPU as coloured triangles and drawn with one
//! pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Scene, SceneBuilder, SceneOptions};
pub use vertex::Vertex;
