//! Full-stack smoke test: boots the winit/wgpu stack, renders the pipeline
//! scene to an offscreen texture and checks that pixels actually arrive.
//! Requires a GPU, so it is gated behind the `integration-tests` feature.

#[cfg(feature = "integration-tests")]
mod smoke {
    use std::cell::Cell;

    use dataflow_viz::{
        context::Context,
        demo::PipelineFlow,
        flow::{self, FlowConstructor, GraphicsFlow, ImageTestResult},
        render::Render,
        session::Session,
    };

    /// Renders nothing itself; watches the composed frame and ends the run
    /// once it contains something other than the cleared background.
    pub(super) struct RenderProbe {
        frames: Cell<u32>,
    }

    impl RenderProbe {
        pub(super) fn new() -> Self {
            Self {
                frames: Cell::new(0),
            }
        }
    }

    impl GraphicsFlow<Session> for RenderProbe {
        fn on_init(&mut self, _: &mut Context, _: &mut Session) {}

        fn on_window_events(
            &mut self,
            _: &Context,
            _: &mut Session,
            _: &dataflow_viz::WindowEvent,
        ) {
        }

        fn on_device_events(
            &mut self,
            _: &Context,
            _: &mut Session,
            _: &dataflow_viz::DeviceEvent,
        ) {
        }

        fn on_update(&mut self, _: &Context, _: &mut Session, _: std::time::Duration) {}

        fn on_render(&self) -> Render<'_> {
            Render::None
        }

        fn render_to_texture(
            &self,
            _: &Context,
            session: &mut Session,
            texture: &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
        ) -> Result<ImageTestResult, anyhow::Error> {
            // The timeline must not be disturbed by merely rendering frames.
            assert!(!session.timeline.is_active());

            self.frames.set(self.frames.get() + 1);
            let lit = texture.pixels().any(|pixel| pixel.0 != [0, 0, 0, 0]);
            match (lit, self.frames.get()) {
                (true, _) => Ok(ImageTestResult::Passed),
                (false, frames) if frames > 10 => {
                    anyhow::bail!("no pixels were produced after {} frames", frames)
                }
                (false, _) => Ok(ImageTestResult::Waiting),
            }
        }
    }

    pub(super) fn probe_constructor() -> FlowConstructor<Session> {
        Box::new(|_| {
            Box::pin(async move { Box::new(RenderProbe::new()) as Box<dyn GraphicsFlow<Session>> })
        })
    }

    pub(super) fn run() {
        flow::run::<Session>(vec![PipelineFlow::constructor(), probe_constructor()])
            .expect("Failed to run flow for integration test.");
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn pipeline_scene_produces_pixels() {
    smoke::run();
}
