//! The two-button control panel.
//!
//! Buttons are screen-space quads with rasterized captions, anchored in
//! physical pixels at the top-left of the window. Hit-testing is a plain
//! cursor-in-rectangle check on mouse press; with only two static rectangles
//! there is nothing a pick buffer would add.

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalPosition;

use crate::{
    context::InitContext, data_structures::texture::Texture, label::rasterize_line,
    pipelines::gui::GuiVertex, render::{Flat, Render},
};

/// The whole command surface of the demo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    RunPipeline,
    Reset,
}

const MARGIN: f32 = 24.0;
const GAP: f32 = 12.0;
const PAD_X: u32 = 18;
const PAD_Y: u32 = 12;
const CAPTION_PX: f32 = 22.0;
// Caption size when no font is available and the buttons render as plain
// rectangles.
const FALLBACK_SIZE: (u32, u32) = (140, 40);

const BUTTON_BG: [u8; 4] = [0x1f, 0x28, 0x33, 0xe6];
const BUTTON_TEXT: [u8; 3] = [0x66, 0xfc, 0xf1];

const QUAD_INDICES: [u16; 6] = [0, 2, 3, 0, 3, 1];

struct Button {
    command: UiCommand,
    // x, y, w, h in physical pixels, anchored at the top-left corner.
    rect: [f32; 4],
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    num_elements: usize,
}

pub struct ControlPanel {
    buttons: Vec<Button>,
}

impl ControlPanel {
    pub fn new(init: &InitContext, font: Option<&fontdue::Font>) -> Self {
        let mut buttons = Vec::new();
        let mut x = MARGIN;
        for (caption, command) in [
            ("Run Pipeline", UiCommand::RunPipeline),
            ("Reset", UiCommand::Reset),
        ] {
            let (rgba, width, height) = caption_bitmap(font, caption);
            let rect = [x, MARGIN, width as f32, height as f32];
            x += width as f32 + GAP;

            let texture =
                Texture::from_rgba8(&init.device, &init.queue, &rgba, width, height, caption);
            let bind_group = init.device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &init.gui_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(
                            texture
                                .sampler
                                .as_ref()
                                .expect("button texture has a sampler"),
                        ),
                    },
                ],
                label: Some("button_bind_group"),
            });

            let vertex_buffer =
                mk_vertex_buffer(&init.device, rect, init.config.width, init.config.height);
            let index_buffer = init
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Button Index Buffer"),
                    contents: bytemuck::cast_slice(&QUAD_INDICES),
                    usage: wgpu::BufferUsages::INDEX,
                });

            buttons.push(Button {
                command,
                rect,
                vertex_buffer,
                index_buffer,
                bind_group,
                num_elements: QUAD_INDICES.len(),
            });
        }
        Self { buttons }
    }

    /// Returns the command under the cursor, if any.
    pub fn hit(&self, coords: PhysicalPosition<f64>) -> Option<UiCommand> {
        let (cx, cy) = (coords.x as f32, coords.y as f32);
        self.buttons
            .iter()
            .find(|button| {
                let [x, y, w, h] = button.rect;
                cx >= x && cx < x + w && cy >= y && cy < y + h
            })
            .map(|button| button.command)
    }

    /// Rebuilds the quads in NDC after the window size changed. The pixel
    /// rectangles themselves stay put.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        for button in &mut self.buttons {
            button.vertex_buffer = mk_vertex_buffer(device, button.rect, width, height);
        }
    }

    pub fn render(&self) -> Render<'_> {
        Render::Guis(
            self.buttons
                .iter()
                .map(|button| Flat {
                    vertex: &button.vertex_buffer,
                    index: &button.index_buffer,
                    group: &button.bind_group,
                    amount: button.num_elements,
                })
                .collect(),
        )
    }
}

/// Caption bitmap: background fill with the text centered in the padding box,
/// or a plain background rectangle when no font is available.
fn caption_bitmap(font: Option<&fontdue::Font>, caption: &str) -> (Vec<u8>, u32, u32) {
    let Some(font) = font else {
        let (width, height) = FALLBACK_SIZE;
        let rgba = BUTTON_BG
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        return (rgba, width, height);
    };

    let (text, text_w, text_h) = rasterize_line(font, caption, CAPTION_PX, BUTTON_TEXT);
    let width = text_w + 2 * PAD_X;
    let height = text_h + 2 * PAD_Y;

    let mut rgba: Vec<u8> = BUTTON_BG
        .iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();

    // Alpha-blend the caption over the background.
    for row in 0..text_h {
        for col in 0..text_w {
            let src = ((row * text_w + col) * 4) as usize;
            let alpha = text[src + 3] as u32;
            if alpha == 0 {
                continue;
            }
            let dst = (((row + PAD_Y) * width + col + PAD_X) * 4) as usize;
            for channel in 0..3 {
                let over = text[src + channel] as u32;
                let under = rgba[dst + channel] as u32;
                rgba[dst + channel] = ((over * alpha + under * (255 - alpha)) / 255) as u8;
            }
        }
    }

    (rgba, width, height)
}

fn mk_vertex_buffer(
    device: &wgpu::Device,
    rect: [f32; 4],
    screen_width: u32,
    screen_height: u32,
) -> wgpu::Buffer {
    let [x, y, w, h] = rect;
    let sw = screen_width.max(1) as f32;
    let sh = screen_height.max(1) as f32;
    let x0 = x / sw * 2.0 - 1.0;
    let x1 = (x + w) / sw * 2.0 - 1.0;
    let y0 = 1.0 - y / sh * 2.0;
    let y1 = 1.0 - (y + h) / sh * 2.0;

    let vertices = [
        GuiVertex {
            position: [x0, y0, 0.0],
            tex_coords: [0.0, 0.0],
        },
        GuiVertex {
            position: [x1, y0, 0.0],
            tex_coords: [1.0, 0.0],
        },
        GuiVertex {
            position: [x0, y1, 0.0],
            tex_coords: [0.0, 1.0],
        },
        GuiVertex {
            position: [x1, y1, 0.0],
            tex_coords: [1.0, 1.0],
        },
    ];

    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Button Vertex Buffer"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    })
}
