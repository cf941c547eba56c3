pub mod camera;
pub mod circuit;
pub mod color;
pub mod constants;
pub mod diagram;
pub mod error;
pub mod particles;
pub mod performance;
pub mod readout;
pub mod scene;
pub mod simulator;
pub mod visual;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use camera::*;
pub use circuit::*;
pub use color::*;
pub use constants::*;
pub use error::*;
pub use particles::*;
pub use performance::*;
pub use readout::*;
pub use scene::*;
pub use simulator::*;
pub use visual::*;
