//! Render composition and pipeline batching.
//!
//! This module defines the [`Render`] enum, which flows return from
//! `on_render` to specify how their objects should be drawn. The engine sorts
//! the variants into batches for the solid, transparent, sprite and gui
//! pipelines so each pipeline is bound once per frame.
//!
//! # Key types
//!
//! - [`Render`] is the primary enum describing render operations
//! - [`Instanced`] contains data for instanced 3D rendering (mesh + instances)
//! - [`Flat`] contains data for quad rendering (labels and buttons)

use crate::data_structures::mesh::Mesh;

/// Data for instanced mesh rendering: a mesh, its instance buffer and the
/// number of instances to draw.
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub mesh: &'a Mesh,
    pub amount: usize,
}

/// Data for quad rendering: vertex and index buffers plus the bind group
/// holding the quad's texture (and, for sprites, its params uniform).
pub struct Flat<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub index: &'a wgpu::Buffer,
    pub group: &'a wgpu::BindGroup,
    pub amount: usize,
}

/// Specifies how a flow's objects should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Solid(Instanced)` renders a single opaque instanced mesh
/// - `Solids(Vec<Instanced>)` renders a batch of opaque instanced meshes
/// - `Transparent(Instanced)` renders an alpha-blended instanced mesh
/// - `Sprite(Flat)` / `Sprites(Vec<Flat>)` render billboard labels
/// - `Gui(Flat)` / `Guis(Vec<Flat>)` render screen-space quads
/// - `Composed(Vec<Render>)` recursively renders a composition
pub enum Render<'a> {
    None,
    Solid(Instanced<'a>),
    Solids(Vec<Instanced<'a>>),
    Transparent(Instanced<'a>),
    Sprite(Flat<'a>),
    Sprites(Vec<Flat<'a>>),
    Gui(Flat<'a>),
    Guis(Vec<Flat<'a>>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    pub(crate) fn set_pipelines(
        self,
        solids: &mut Vec<Instanced<'a>>,
        transparents: &mut Vec<Instanced<'a>>,
        sprites: &mut Vec<Flat<'a>>,
        guis: &mut Vec<Flat<'a>>,
    ) {
        match self {
            Render::Solid(instanced) => solids.push(instanced),
            Render::Solids(mut vec) => solids.append(&mut vec),
            Render::Transparent(instanced) => transparents.push(instanced),
            Render::Sprite(flat) => sprites.push(flat),
            Render::Sprites(mut vec) => sprites.append(&mut vec),
            Render::Gui(flat) => guis.push(flat),
            Render::Guis(mut vec) => guis.append(&mut vec),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(solids, transparents, sprites, guis)),
            Render::None => (),
        }
    }
}
