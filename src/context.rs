use std::sync::Arc;

use winit::window::Window;

use crate::{
    camera::{self, CameraResources, Projection},
    data_structures::texture,
    pipelines::{
        gui::{mk_gui_bind_group_layout, mk_gui_pipeline},
        light::{LightResources, LightUniform},
        solid::{mk_solid_pipeline, mk_transparent_pipeline},
        sprite::{mk_sprite_bind_group_layout, mk_sprite_pipeline},
    },
    scene,
};

/// All render pipelines plus the bind group layouts that flows need when they
/// create their own textured resources (labels, buttons).
#[derive(Debug)]
pub struct Pipelines {
    pub solid: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
    pub sprite: wgpu::RenderPipeline,
    pub gui: wgpu::RenderPipeline,
    pub sprite_layout: wgpu::BindGroupLayout,
    pub gui_layout: wgpu::BindGroupLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButtonState {
    Left,
    Right,
    None,
}

#[derive(Debug)]
pub struct MouseState {
    pub coords: winit::dpi::PhysicalPosition<f64>,
    pub pressed: MouseButtonState,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            coords: (0.0, 0.0).into(),
            pressed: MouseButtonState::None,
        }
    }
}

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub light: LightResources,
    pub pipelines: Pipelines,
    pub mouse: MouseState,
    pub clear_colour: wgpu::Color,
}

impl Context {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // The instance is a handle to our GPU
        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders assume an Srgb surface texture; picking a different one
        // would make all colours come out darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let projection =
            Projection::new(config.width.max(1), config.height.max(1), cgmath::Deg(45.0), 0.1, 1000.0);
        let camera = CameraResources::new(&device, camera::default_camera(), &projection);

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let light_uniform = LightUniform {
            position: [10.0, 20.0, 10.0],
            ambient: 0.5,
            color: [1.0, 1.0, 1.0],
            fog_density: 0.02,
            fog_color: scene::srgb(scene::BACKGROUND),
            _padding: 0.0,
        };
        let light = LightResources::new(light_uniform, &device);

        let sprite_layout = mk_sprite_bind_group_layout(&device);
        let gui_layout = mk_gui_bind_group_layout(&device);
        let pipelines = Pipelines {
            solid: mk_solid_pipeline(
                &device,
                &config,
                &light.bind_group_layout,
                &camera.bind_group_layout,
            ),
            transparent: mk_transparent_pipeline(
                &device,
                &config,
                &light.bind_group_layout,
                &camera.bind_group_layout,
            ),
            sprite: mk_sprite_pipeline(&device, &config, &camera.bind_group_layout, &sprite_layout),
            gui: mk_gui_pipeline(&device, &config, &gui_layout),
            sprite_layout,
            gui_layout,
        };

        let background = scene::srgb(scene::BACKGROUND);
        let clear_colour = wgpu::Color {
            r: background[0] as f64,
            g: background[1] as f64,
            b: background[2] as f64,
            a: 1.0,
        };

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            light,
            pipelines,
            mouse: MouseState::default(),
            clear_colour,
        })
    }
}

/// The slice of the context that flow constructors get to create their GPU
/// resources before the event loop starts.
///
/// Device and queue are internally reference counted, so cloning them here
/// only clones the handle.
#[derive(Debug, Clone)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub sprite_layout: wgpu::BindGroupLayout,
    pub gui_layout: wgpu::BindGroupLayout,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            config: ctx.config.clone(),
            sprite_layout: ctx.pipelines.sprite_layout.clone(),
            gui_layout: ctx.pipelines.gui_layout.clone(),
        }
    }
}
