pub mod camera;
pub mod config;
pub mod constants;
pub mod debounce;
pub mod highlight;
pub mod instances;
pub mod loading;
pub mod lockon;
pub mod picking;
pub mod pointer;
pub mod scene;
pub mod tween;
pub mod viewer;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use debounce::*;
pub use highlight::*;
pub use instances::*;
pub use loading::*;
pub use lockon::*;
pub use picking::*;
pub use pointer::*;
pub use scene::*;
pub use viewer::*;
