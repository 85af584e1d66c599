//! dataflow-viz
//!
//! An interactive 3D visualization of a vector-add pipeline: two tensor tiles
//! travel from global memory through the unified buffer into the vector unit,
//! the unit flashes while "computing", and the result tile travels back out.
//! The scene is a full-window canvas with an orbitable camera and two buttons
//! (Run Pipeline / Reset). Builds for native and WASM from the same code.
//!
//! High-level modules
//! - `camera`: orbit camera, damped controller and view/projection uniform
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: instances, procedural meshes and texture helpers
//! - `flow`: the winit application loop and the `GraphicsFlow` lifecycle trait
//! - `label`: text rasterization and billboard labels for the hardware tiers
//! - `pipelines`: render pipeline definitions (solid, transparent, sprite, gui)
//! - `render`: render composition for efficient pipeline reuse
//! - `scene`: tier layout, tensor state and the authored choreography
//! - `timeline`: the sequential animation interpreter (play/reset/advance)
//! - `ui`: the two-button control panel
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod demo;
pub mod flow;
pub mod label;
pub mod pipelines;
pub mod render;
pub mod scene;
pub mod session;
pub mod timeline;
pub mod ui;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
pub use wgpu::*;
