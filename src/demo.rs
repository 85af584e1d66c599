//! The demo flow: wires the scene renderer, tier labels and control panel
//! into the engine's flow lifecycle.

use instant::Duration;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};

use crate::{
    camera::Camera,
    context::{Context, InitContext},
    flow::{FlowConstructor, GraphicsFlow},
    label::Label,
    render::Render,
    scene::{self, renderer::SceneRenderer},
    session::Session,
    ui::{ControlPanel, UiCommand},
};

#[cfg(feature = "integration-tests")]
use crate::flow::ImageTestResult;

/// World-space size of the tier label billboards.
const LABEL_SIZE: [f32; 2] = [6.0, 1.5];

pub struct PipelineFlow {
    scene: SceneRenderer,
    labels: Vec<Label>,
    panel: ControlPanel,
}

impl PipelineFlow {
    pub async fn new(init: InitContext) -> Self {
        let font = load_font();
        if font.is_none() {
            log::warn!("no usable font found, tier labels are disabled");
        }

        let labels = font
            .as_ref()
            .map(|font| {
                vec![
                    Label::new(&init, font, "Global Memory (HBM)", [0.0, 2.0, 12.0], LABEL_SIZE),
                    Label::new(&init, font, "Unified Buffer (UB)", [0.0, 2.0, 2.0], LABEL_SIZE),
                    Label::new(&init, font, "Vector Unit", [0.0, 3.0, -8.0], LABEL_SIZE),
                ]
            })
            .unwrap_or_default();

        let panel = ControlPanel::new(&init, font.as_ref());
        let scene = SceneRenderer::new(&init);

        Self {
            scene,
            labels,
            panel,
        }
    }

    /// Boxes the flow into a constructor for [`crate::flow::run`].
    pub fn constructor() -> FlowConstructor<Session> {
        Box::new(|init| {
            Box::pin(async move {
                Box::new(PipelineFlow::new(init).await) as Box<dyn GraphicsFlow<Session>>
            })
        })
    }
}

impl GraphicsFlow<Session> for PipelineFlow {
    fn on_init(&mut self, ctx: &mut Context, _session: &mut Session) {
        let background = scene::srgb(scene::BACKGROUND);
        ctx.clear_colour = wgpu::Color {
            r: background[0] as f64,
            g: background[1] as f64,
            b: background[2] as f64,
            a: 1.0,
        };
        // Frame the pipeline from above and in front, orbiting its center.
        let camera = Camera::new((0.0, 0.0, 0.0), cgmath::Deg(56.0), cgmath::Deg(29.0), 41.0);
        ctx.camera.camera = camera;
        ctx.camera.controller.focus(&camera);
    }

    fn on_window_events(&mut self, ctx: &Context, session: &mut Session, event: &WindowEvent) {
        match event {
            WindowEvent::Resized(size) => {
                self.panel.resize(&ctx.device, size.width, size.height);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(command) = self.panel.hit(ctx.mouse.coords) {
                    match command {
                        UiCommand::RunPipeline => session.timeline.play(),
                        UiCommand::Reset => session.timeline.reset(&mut session.scene),
                    }
                }
            }
            _ => (),
        }
    }

    fn on_device_events(&mut self, _: &Context, _: &mut Session, _: &DeviceEvent) {}

    fn on_update(&mut self, ctx: &Context, session: &mut Session, dt: Duration) {
        session.timeline.advance(&mut session.scene, dt);
        self.scene.write_to_buffer(ctx, &session.scene);
    }

    fn on_render(&self) -> Render<'_> {
        Render::Composed(vec![
            self.scene.render(),
            Render::Sprites(self.labels.iter().map(Label::render).collect()),
            self.panel.render(),
        ])
    }

    #[cfg(feature = "integration-tests")]
    fn render_to_texture(
        &self,
        _: &Context,
        _: &mut Session,
        _: &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
    ) -> Result<ImageTestResult, anyhow::Error> {
        Ok(ImageTestResult::Passed)
    }
}

/// Looks for a usable TrueType font for labels and button captions. The
/// `DATAFLOW_VIZ_FONT` environment variable wins; otherwise a few well-known
/// system locations are probed.
#[cfg(not(target_arch = "wasm32"))]
fn load_font() -> Option<fontdue::Font> {
    let mut candidates: Vec<std::path::PathBuf> = Vec::new();
    if let Ok(path) = std::env::var("DATAFLOW_VIZ_FONT") {
        candidates.push(path.into());
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
        .into_iter()
        .map(Into::into),
    );

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        match fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()) {
            Ok(font) => {
                log::info!("label font: {}", path.display());
                return Some(font);
            }
            Err(e) => log::warn!("failed to parse font {}: {}", path.display(), e),
        }
    }
    None
}

// Fonts would have to be fetched or embedded on the web; labels are simply
// disabled there for now.
#[cfg(target_arch = "wasm32")]
fn load_font() -> Option<fontdue::Font> {
    None
}
