//! Orbit camera, damped controller and view/projection uniforms.
//!
//! The camera orbits a fixed target (the center of the pipeline) on a
//! yaw/pitch/radius sphere. Mouse drags and scroll wheel input move a *target*
//! orientation; [`CameraController::update`] eases the camera towards it every
//! frame, which gives the drag its damped inertia.

use cgmath::{Deg, Matrix4, Point3, Rad, Vector3, perspective};
use instant::Duration;
use wgpu::util::DeviceExt;
use winit::event::{MouseScrollDelta, WindowEvent};

/// Maps the OpenGL clip-space cube (z in -1..1) onto WGPU's (z in 0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// An orbiting camera described by its target point and spherical coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub target: Point3<f32>,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
    pub radius: f32,
}

impl Camera {
    pub fn new<T, Y, P>(target: T, yaw: Y, pitch: P, radius: f32) -> Self
    where
        T: Into<Point3<f32>>,
        Y: Into<Rad<f32>>,
        P: Into<Rad<f32>>,
    {
        Self {
            target: target.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
            radius,
        }
    }

    /// World-space eye position on the orbit sphere.
    pub fn position(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        self.target
            + Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw) * self.radius
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position(), self.target, Vector3::unit_y())
    }
}

/// Perspective projection with a resizable aspect ratio.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

// Keeps the camera between "almost horizontal" and "almost top-down" so the
// orbit never flips over the pole.
const PITCH_MIN: f32 = 0.05;
const PITCH_MAX: f32 = 1.5;
const RADIUS_MIN: f32 = 10.0;
const RADIUS_MAX: f32 = 120.0;

/// Damped orbit controller.
///
/// Input events only move the target orientation; `update` moves the camera a
/// damping-dependent fraction of the way there each frame.
#[derive(Clone, Copy, Debug)]
pub struct CameraController {
    sensitivity: f32,
    zoom_speed: f32,
    damping: f32,
    target_yaw: Rad<f32>,
    target_pitch: Rad<f32>,
    target_radius: f32,
}

impl CameraController {
    pub fn new(sensitivity: f32, damping: f32, camera: &Camera) -> Self {
        Self {
            sensitivity,
            zoom_speed: 2.0,
            damping,
            target_yaw: camera.yaw,
            target_pitch: camera.pitch,
            target_radius: camera.radius,
        }
    }

    /// Re-seeds the controller targets from `camera`, e.g. after a flow
    /// replaced the camera framing during `on_init`.
    pub fn focus(&mut self, camera: &Camera) {
        self.target_yaw = camera.yaw;
        self.target_pitch = camera.pitch;
        self.target_radius = camera.radius;
    }

    /// Accumulate a drag delta (in pixels) into the target orientation.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        self.target_yaw += Rad(dx as f32 * self.sensitivity * 0.001);
        self.target_pitch += Rad(dy as f32 * self.sensitivity * 0.001);
        self.target_pitch.0 = self.target_pitch.0.clamp(PITCH_MIN, PITCH_MAX);
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        if let WindowEvent::MouseWheel { delta, .. } = event {
            let lines = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
            };
            self.target_radius =
                (self.target_radius - lines * self.zoom_speed).clamp(RADIUS_MIN, RADIUS_MAX);
        }
    }

    /// Ease the camera towards the target orientation.
    pub fn update(&mut self, camera: &mut Camera, dt: Duration) {
        let k = 1.0 - (-self.damping * dt.as_secs_f32()).exp();
        camera.yaw += (self.target_yaw - camera.yaw) * k;
        camera.pitch += (self.target_pitch - camera.pitch) * k;
        camera.radius += (self.target_radius - camera.radius) * k;
    }
}

/// Camera data as uploaded to the GPU each frame.
///
/// The view matrix rides along so billboard shaders can recover the camera's
/// right/up axes.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view: [[f32; 4]; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view: Matrix4::identity().into(),
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        let view = camera.calc_matrix();
        self.view_position = camera.position().to_homogeneous().into();
        self.view = view.into();
        self.view_proj = (projection.calc_matrix() * view).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Bundles everything camera related that lives on the [`crate::context::Context`].
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: CameraController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, camera: Camera, projection: &Projection) -> Self {
        let controller = CameraController::new(2.0, 8.0, &camera);

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("camera_bind_group_layout"),
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            controller,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }
}

/// Default framing of the pipeline scene: above and in front, looking at the
/// unified buffer between the memory tiers.
pub fn default_camera() -> Camera {
    Camera::new((0.0, 0.0, 0.0), Deg(56.0), Deg(29.0), 41.0)
}
