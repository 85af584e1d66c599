//! Billboard text labels.
//!
//! A label is a line of text rasterized with fontdue into an RGBA bitmap,
//! uploaded as a texture and mapped onto a camera-facing quad anchored at a
//! 3D position. Pure decoration: created once at startup, never mutated.

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use wgpu::util::DeviceExt;

use crate::{
    context::InitContext,
    data_structures::texture::Texture,
    pipelines::sprite::{SpriteParams, SpriteVertex},
    render::Flat,
};

/// Point size the tier labels are rasterized at. Only affects texture
/// resolution, not the world-space size of the billboard.
const LABEL_PX: f32 = 48.0;

const QUAD_VERTICES: [SpriteVertex; 4] = [
    SpriteVertex {
        corner: [-0.5, 0.5],
        tex_coords: [0.0, 0.0],
    },
    SpriteVertex {
        corner: [0.5, 0.5],
        tex_coords: [1.0, 0.0],
    },
    SpriteVertex {
        corner: [-0.5, -0.5],
        tex_coords: [0.0, 1.0],
    },
    SpriteVertex {
        corner: [0.5, -0.5],
        tex_coords: [1.0, 1.0],
    },
];
const QUAD_INDICES: [u16; 6] = [0, 2, 3, 0, 3, 1];

/// A billboard label fixed at a world-space anchor.
pub struct Label {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    num_elements: usize,
}

impl Label {
    /// Creates a white text billboard of `size` world units anchored at
    /// `anchor` (the quad is centered on it).
    pub fn new(
        init: &InitContext,
        font: &fontdue::Font,
        text: &str,
        anchor: [f32; 3],
        size: [f32; 2],
    ) -> Self {
        let (rgba, width, height) = rasterize_line(font, text, LABEL_PX, [0xff, 0xff, 0xff]);
        let texture = Texture::from_rgba8(&init.device, &init.queue, &rgba, width, height, text);

        let params = SpriteParams::new(anchor, size);
        let params_buffer = init
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Label Params Buffer"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let bind_group = init.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &init.sprite_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(
                        texture.sampler.as_ref().expect("label texture has a sampler"),
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
            label: Some("label_bind_group"),
        });

        let vertex_buffer = init
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Label Vertex Buffer"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = init
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Label Index Buffer"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            bind_group,
            num_elements: QUAD_INDICES.len(),
        }
    }

    pub fn render(&self) -> Flat<'_> {
        Flat {
            vertex: &self.vertex_buffer,
            index: &self.index_buffer,
            group: &self.bind_group,
            amount: self.num_elements,
        }
    }
}

/// Rasterizes a single line of text into a tightly sized RGBA bitmap.
///
/// Glyph coverage becomes the alpha channel over the given tint; the
/// background stays fully transparent. Returns `(rgba, width, height)`.
pub fn rasterize_line(
    font: &fontdue::Font,
    text: &str,
    px: f32,
    tint: [u8; 3],
) -> (Vec<u8>, u32, u32) {
    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, px, 0));

    let glyphs = layout.glyphs();
    let width = glyphs
        .iter()
        .map(|g| g.x as i32 + g.width as i32)
        .max()
        .unwrap_or(1)
        .max(1) as u32;
    let height = glyphs
        .iter()
        .map(|g| g.y as i32 + g.height as i32)
        .max()
        .unwrap_or(1)
        .max(1) as u32;

    let mut rgba = vec![0u8; (width * height * 4) as usize];
    for glyph in glyphs {
        let (metrics, coverage) = font.rasterize_config(glyph.key);
        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let x = glyph.x as i32 + col as i32;
                let y = glyph.y as i32 + row as i32;
                if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                    continue;
                }
                let alpha = coverage[row * metrics.width + col];
                let idx = ((y as u32 * width + x as u32) * 4) as usize;
                rgba[idx] = tint[0];
                rgba[idx + 1] = tint[1];
                rgba[idx + 2] = tint[2];
                rgba[idx + 3] = rgba[idx + 3].max(alpha);
            }
        }
    }

    (rgba, width, height)
}
