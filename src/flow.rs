//! Flow control and application event loop.
//!
//! This module provides the main event loop and flow abstraction. A "flow"
//! represents a self-contained part of the application that handles input,
//! updates its state every frame and provides renderable objects. The engine
//! coordinates the active flows and composes their renders.
//!
//! # Lifecycle Flow
//!
//! The event loop follows this pattern each frame:
//! 1. Collect window/device events
//! 2. Call `on_window_events` / `on_device_events` on all flows
//! 3. Render to the frame buffer using batched pipelines
//! 4. Update the camera (damped orbit) and upload its uniform
//! 5. Call flows' `on_update` with the elapsed frame time
//! 6. Present the frame
//!
//! The timeline/scene mutation driven from `on_update` and the drawing in
//! step 3 are decoupled on purpose: the renderer draws whatever the current
//! state is, every frame, no matter whether an animation is running.

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};

#[cfg(feature = "integration-tests")]
use tokio::runtime::Runtime;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    context::{Context, InitContext, MouseButtonState},
    data_structures::{mesh::DrawMesh, texture::Texture},
    render::{Flat, Instanced, Render},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "integration-tests")]
pub enum ImageTestResult {
    Passed,
    Waiting,
    Failed,
}

/// Trait for implementing a renderable scene or application state.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created; the only place to
///    modify the context (camera framing, clear colour, ...)
/// 2. `on_window_events()` and `on_device_events()` are called for each winit
///    input event
/// 3. `on_update()` is called every frame with the elapsed time `dt`
/// 4. `on_render()` is called each frame and specifies how to render `self`
pub trait GraphicsFlow<S> {
    /// Initialize the flow and configure the context.
    fn on_init(&mut self, ctx: &mut Context, state: &mut S);

    /// Handle window events (mouse, keyboard, resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, state: &mut S, event: &WindowEvent);

    /// Handle raw device events (relative mouse motion, etc.).
    fn on_device_events(&mut self, ctx: &Context, state: &mut S, event: &DeviceEvent);

    /// Update state every frame. Use for animations and other per-frame logic.
    fn on_update(&mut self, ctx: &Context, state: &mut S, dt: Duration);

    /// Return renderable objects for this flow.
    ///
    /// Called each frame. Collect your objects into a [`Render`] and return
    /// it; the engine batches all flows' renders per pipeline.
    fn on_render(&self) -> Render<'_>;

    #[cfg(feature = "integration-tests")]
    fn render_to_texture(
        &self,
        ctx: &Context,
        state: &mut S,
        texture: &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
    ) -> Result<ImageTestResult, anyhow::Error>;
}

// Dummy impl to make wasm work
impl<State> Debug for dyn GraphicsFlow<State> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an `InitContext` and asynchronously returns a
/// boxed `GraphicsFlow`. This allows lazy initialization and resource
/// creation before the event loop starts.
pub type FlowConstructor<S> =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = Box<dyn GraphicsFlow<S>>>>>>;

/// Application state bundle: GPU context, app state, and surface status.
#[derive(Debug)]
pub struct AppState<State: 'static> {
    pub(crate) ctx: Context,
    state: State,
    is_surface_configured: bool,
}

impl<State: 'static + Default> AppState<State> {
    async fn new(window: Arc<Window>) -> Self {
        let ctx = Context::new(window).await;
        let ctx = match ctx {
            Ok(ctx) => ctx,
            Err(e) => panic!(
                "App initialization failed. Cannot create the main context: {}",
                e
            ),
        };
        let state = State::default();
        let is_surface_configured = false;
        Self {
            ctx,
            state,
            is_surface_configured,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn get_surface_texture(&self) -> wgpu::SurfaceTexture {
        self.ctx
            .surface
            .get_current_texture()
            .expect("Failed to create surface.")
    }

    #[cfg(feature = "integration-tests")]
    fn get_test_texture(&self, extent3d: wgpu::Extent3d) -> wgpu::Texture {
        self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Test Output Texture"),
            size: extent3d,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.ctx.config.format,
            usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }

    #[cfg(feature = "integration-tests")]
    fn get_test_depth_texture(&self, extent3d: wgpu::Extent3d) -> wgpu::Texture {
        self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Test depth texture"),
            size: extent3d,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }

    #[cfg(feature = "integration-tests")]
    fn get_with_height(&self) -> (u32, u32) {
        // The img lib requires divisibility of 256...
        let width = self.ctx.config.width;
        let height = self.ctx.config.height;
        let width_offset = 256 - (width % 256);
        let height_offset = 256 - (height % 256);
        let width = width + width_offset;
        let height = height + height_offset;
        (width, height)
    }

    #[cfg(feature = "integration-tests")]
    fn get_test_3d_extent(&self) -> wgpu::Extent3d {
        let (width, height) = self.get_with_height();
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        }
    }

    fn render(
        &mut self,
        graphics_flows: &[Box<dyn GraphicsFlow<State>>],
        #[cfg(feature = "integration-tests")] async_runtime: &Runtime,
        #[cfg(feature = "integration-tests")] event_loop: &winit::event_loop::EventLoopProxy<
            FlowEvent<State>,
        >,
    ) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.get_surface_texture();
        #[cfg(not(feature = "integration-tests"))]
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        #[cfg(feature = "integration-tests")]
        let (tex, depth) = {
            let extent3d = self.get_test_3d_extent();
            let tex = self.get_test_texture(extent3d);
            let depth = self.get_test_depth_texture(extent3d);
            (tex, depth)
        };

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        #[cfg(feature = "integration-tests")]
                        view: &tex.create_view(&wgpu::TextureViewDescriptor::default()),
                        #[cfg(not(feature = "integration-tests"))]
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        #[cfg(feature = "integration-tests")]
                        view: &depth.create_view(&wgpu::TextureViewDescriptor::default()),
                        #[cfg(not(feature = "integration-tests"))]
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                });

            // Actual rendering:
            let mut solids: Vec<Instanced> = Vec::new();
            let mut transparents: Vec<Instanced> = Vec::new();
            let mut sprites: Vec<Flat> = Vec::new();
            let mut guis: Vec<Flat> = Vec::new();
            graphics_flows.iter().for_each(|flow| {
                let render = flow.on_render();
                render.set_pipelines(&mut solids, &mut transparents, &mut sprites, &mut guis);
            });

            render_pass.set_pipeline(&self.ctx.pipelines.solid);
            for instanced in solids {
                if instanced.amount == 0 {
                    log::warn!("you attempted to render something with zero instances");
                    continue;
                }
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.draw_mesh_instanced(
                    instanced.mesh,
                    0..instanced.amount as u32,
                    &self.ctx.camera.bind_group,
                    &self.ctx.light.bind_group,
                );
            }

            render_pass.set_pipeline(&self.ctx.pipelines.transparent);
            for instanced in transparents {
                if instanced.amount == 0 {
                    log::warn!("you attempted to render something with zero instances");
                    continue;
                }
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.draw_mesh_instanced(
                    instanced.mesh,
                    0..instanced.amount as u32,
                    &self.ctx.camera.bind_group,
                    &self.ctx.light.bind_group,
                );
            }

            render_pass.set_pipeline(&self.ctx.pipelines.sprite);
            render_pass.set_bind_group(0, &self.ctx.camera.bind_group, &[]);
            for sprite in sprites {
                render_pass.set_bind_group(1, sprite.group, &[]);
                render_pass.set_vertex_buffer(0, sprite.vertex.slice(..));
                render_pass.set_index_buffer(sprite.index.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..sprite.amount as u32, 0, 0..1);
            }

            render_pass.set_pipeline(&self.ctx.pipelines.gui);
            for button in guis {
                render_pass.set_bind_group(0, button.group, &[]);
                render_pass.set_vertex_buffer(0, button.vertex.slice(..));
                render_pass.set_index_buffer(button.index.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..button.amount as u32, 0, 0..1);
            }
        }

        #[cfg(feature = "integration-tests")]
        let output_buffer = {
            let u32_size = std::mem::size_of::<u32>() as u32;
            let (width, height) = self.get_with_height();
            let output_buffer_size = (u32_size * width * height) as wgpu::BufferAddress;
            let output_buffer_desc = wgpu::BufferDescriptor {
                size: output_buffer_size,
                usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
                label: None,
                mapped_at_creation: false,
            };
            let output_buffer = self.ctx.device.create_buffer(&output_buffer_desc);
            encoder.copy_texture_to_buffer(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &tex,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                },
                wgpu::TexelCopyBufferInfo {
                    buffer: &output_buffer,
                    layout: wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(u32_size * width),
                        rows_per_image: Some(height),
                    },
                },
                self.get_test_3d_extent(),
            );
            output_buffer
        };

        self.ctx.queue.submit(iter::once(encoder.finish()));

        #[cfg(feature = "integration-tests")]
        let fut_img = async {
            let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
            let buffer_slice = output_buffer.slice(..);
            buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
                tx.send(result).unwrap();
            });
            self.ctx
                .device
                .poll(wgpu::PollType::Wait {
                    submission_index: None,
                    timeout: Some(Duration::from_secs(3)),
                })
                .unwrap();
            rx.receive().await.unwrap().unwrap();
            let data = buffer_slice.get_mapped_range();
            let (width, height) = self.get_with_height();
            let buffer =
                image::ImageBuffer::<image::Rgba<u8>, _>::from_raw(width, height, data).unwrap();
            buffer
        };
        #[cfg(feature = "integration-tests")]
        {
            use std::convert::identity;

            let mut img: image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView> =
                async_runtime.block_on(fut_img);
            let state = &mut self.state;
            let all_passed = graphics_flows
                .iter()
                .map(|flow| flow.render_to_texture(&self.ctx, state, &mut img))
                .map(|res| match res {
                    Err(e) => panic!("{}", e),
                    Ok(ImageTestResult::Passed) => true,
                    Ok(ImageTestResult::Failed) => panic!("Assertion failed"),
                    Ok(ImageTestResult::Waiting) => false,
                })
                .all(identity);
            if all_passed {
                event_loop
                    .send_event(FlowEvent::Exit)
                    .expect("All assertions passed but the winit event-loop could not safely exit")
            }
        }

        output.present();
        Ok(())
    }
}

pub struct App<S: 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: winit::event_loop::EventLoopProxy<FlowEvent<S>>,
    state: Option<AppState<S>>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow<S>>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConstructor<S>>>,
    last_time: Instant,
}

impl<S: 'static> App<S> {
    fn new(event_loop: &EventLoop<FlowEvent<S>>, constructors: Vec<FlowConstructor<S>>) -> Self {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new().unwrap();
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            last_time: Instant::now(),
        }
    }
}

pub(crate) enum FlowEvent<S: 'static> {
    #[allow(dead_code)]
    Initialized {
        state: AppState<S>,
        flows: Vec<Box<dyn GraphicsFlow<S>>>,
    },
    #[allow(dead_code)]
    Exit,
}

impl<S> Debug for FlowEvent<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized { state: _, flows } => {
                f.debug_struct("Initialized").field("flows", flows).finish()
            }
            Self::Exit => f.write_str("Exit"),
        }
    }
}

impl<S: 'static + Default> ApplicationHandler<FlowEvent<S>> for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("dataflow-viz");

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        let constructors = self.constructors.take().unwrap();

        let init_future = async move {
            let app_state = AppState::new(window).await;

            let flow_futures: Vec<_> = constructors
                .into_iter()
                // The clone in into() leverages the internal Arcs of Device and Queue and thus only clones the ref
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows: Vec<_> = futures::future::join_all(flow_futures).await;
            (app_state, flows)
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let (mut app_state, flows) = self.async_runtime.block_on(init_future);
            self.graphics_flows = flows;
            self.graphics_flows.iter_mut().for_each(|flow| {
                flow.on_init(&mut app_state.ctx, &mut app_state.state);
            });
            self.state = Some(app_state);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let (app_state, flows) = init_future.await;
                assert!(
                    proxy
                        .send_event(FlowEvent::Initialized {
                            state: app_state,
                            flows,
                        })
                        .is_ok()
                );
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent<S>) {
        match event {
            FlowEvent::Initialized { state, flows } => {
                // This is the message from our wasm `spawn_local`
                self.state = Some(state);
                self.graphics_flows = flows;

                // Important: Trigger a resize and redraw now that we are initialized
                let app_state = self.state.as_mut().unwrap();
                let size = app_state.ctx.window.inner_size();
                app_state.resize(size.width, size.height);
                self.graphics_flows.iter_mut().for_each(|flow| {
                    flow.on_init(&mut app_state.ctx, &mut app_state.state);
                });
                app_state.ctx.window.request_redraw();
            }
            FlowEvent::Exit => {
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            let speed_factor = 5.0;
            if let MouseButtonState::Left = state.ctx.mouse.pressed {
                state
                    .ctx
                    .camera
                    .controller
                    .handle_mouse(dx * speed_factor, dy * speed_factor);
            }
        }
        self.graphics_flows.iter_mut().for_each(|f| {
            f.on_device_events(&state.ctx, &mut state.state, &event);
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        // general stuff
        state.ctx.camera.controller.handle_window_events(&event);

        if let WindowEvent::CursorMoved {
            device_id: _,
            position,
        } = event
        {
            state.ctx.mouse.coords = position;
        };

        self.graphics_flows.iter_mut().for_each(|f| {
            f.on_window_events(&state.ctx, &mut state.state, &event);
        });

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                match state.render(
                    &self.graphics_flows,
                    #[cfg(feature = "integration-tests")]
                    &self.async_runtime,
                    #[cfg(feature = "integration-tests")]
                    &self.proxy,
                ) {
                    Ok(_) => {
                        // Update the camera
                        state
                            .ctx
                            .camera
                            .controller
                            .update(&mut state.ctx.camera.camera, dt);
                        state
                            .ctx
                            .camera
                            .uniform
                            .update_view_proj(&state.ctx.camera.camera, &state.ctx.projection);
                        state.ctx.queue.write_buffer(
                            &state.ctx.camera.buffer,
                            0,
                            bytemuck::cast_slice(&[state.ctx.camera.uniform]),
                        );
                        // Update custom stuff
                        self.graphics_flows.iter_mut().for_each(|f| {
                            f.on_update(&state.ctx, &mut state.state, dt);
                        });
                    }
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => match (button, button_state.is_pressed()) {
                (MouseButton::Left, true) => {
                    state.ctx.mouse.pressed = MouseButtonState::Left;
                }
                (MouseButton::Right, true) => {
                    state.ctx.mouse.pressed = MouseButtonState::Right;
                }
                (_, false) => state.ctx.mouse.pressed = MouseButtonState::None,
                _ => (),
            },
            _ => {}
        }
    }
}

pub fn run<S: 'static + Default>(constructors: Vec<FlowConstructor<S>>) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    #[cfg(all(feature = "integration-tests", target_os = "linux"))]
    let event_loop: EventLoop<FlowEvent<S>> = {
        use winit::platform::wayland::EventLoopBuilderExtWayland;

        winit::event_loop::EventLoop::with_user_event()
            .with_any_thread(true)
            .build()
            .expect("Failed to create an event loop")
    };

    #[cfg(all(feature = "integration-tests", target_os = "windows"))]
    let event_loop: EventLoop<FlowEvent<S>> = {
        use winit::platform::windows::EventLoopBuilderExtWindows;

        winit::event_loop::EventLoop::with_user_event()
            .with_any_thread(true)
            .build()
            .expect("Failed to create an event loop")
    };

    #[cfg(not(feature = "integration-tests"))]
    let event_loop: EventLoop<FlowEvent<S>> = EventLoop::with_user_event().build()?;

    let mut app: App<S> = App::new(&event_loop, constructors);

    event_loop.run_app(&mut app)?;

    Ok(())
}
