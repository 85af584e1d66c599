//! Turns [`SceneState`] into GPU instance batches.
//!
//! All boxes share one unit cube mesh and get their dimensions from the
//! per-instance scale; the bus is a unit plane. The instance buffer is
//! rewritten every frame from whatever the current scene state is; the
//! renderer never interprets the choreography, it just draws.

use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::{
    context::{Context, InitContext},
    data_structures::{
        instance::{Instance, InstanceRaw},
        mesh::{self, Mesh},
    },
    render::{Instanced, Render},
    scene::{
        self, BUS_COLOR, BUS_POS, BUS_SIZE, GLOBAL_MEMORY_COLOR, GLOBAL_MEMORY_POS,
        GLOBAL_MEMORY_SIZE, SceneState, TILE_SIZE, TensorId, UNIFIED_BUFFER_COLOR,
        UNIFIED_BUFFER_POS, UNIFIED_BUFFER_SIZE, VECTOR_UNIT_POS, VECTOR_UNIT_SIZE,
    },
};

// Two memory slabs, the vector unit and up to three tensor tiles.
const MAX_SOLID_INSTANCES: usize = 6;

pub struct SceneRenderer {
    cube: Mesh,
    plane: Mesh,
    solid_buffer: wgpu::Buffer,
    solid_amount: usize,
    bus_buffer: wgpu::Buffer,
}

impl SceneRenderer {
    pub fn new(init: &InitContext) -> Self {
        let cube = mesh::unit_cube(&init.device);
        let plane = mesh::unit_plane(&init.device);

        let solid_buffer = init.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Instance Buffer"),
            size: (MAX_SOLID_INSTANCES * std::mem::size_of::<InstanceRaw>())
                as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // The bus never changes: an unlit translucent strip over the ground.
        let bus = Instance {
            position: BUS_POS.into(),
            scale: Vector3::new(BUS_SIZE[0], 1.0, BUS_SIZE[1]),
            color: [0.0, 0.0, 0.0, 0.1],
            emissive: emissive(scene::srgb(BUS_COLOR), 1.0),
            ..Default::default()
        };
        let bus_buffer = init
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Bus Instance Buffer"),
                contents: bytemuck::cast_slice(&[bus.to_raw()]),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            cube,
            plane,
            solid_buffer,
            solid_amount: 0,
            bus_buffer,
        }
    }

    /// Rebuilds the solid instance batch from the current scene state.
    pub fn write_to_buffer(&mut self, ctx: &Context, state: &SceneState) {
        let mut instances = Vec::with_capacity(MAX_SOLID_INSTANCES);

        instances.push(slab(GLOBAL_MEMORY_POS, GLOBAL_MEMORY_SIZE, GLOBAL_MEMORY_COLOR));
        instances.push(slab(UNIFIED_BUFFER_POS, UNIFIED_BUFFER_SIZE, UNIFIED_BUFFER_COLOR));
        instances.push(Instance {
            position: VECTOR_UNIT_POS.into(),
            scale: VECTOR_UNIT_SIZE.into(),
            color: rgba(state.unit.color),
            emissive: emissive(state.unit.emissive, state.unit.emissive_intensity),
            ..Default::default()
        });

        for id in [TensorId::A, TensorId::B, TensorId::C] {
            let tensor = state.tensor(id);
            if !tensor.visible {
                continue;
            }
            let edge = TILE_SIZE * tensor.scale;
            instances.push(Instance {
                position: tensor.position,
                scale: Vector3::new(edge, edge, edge),
                color: rgba(scene::tensor_color(id)),
                ..Default::default()
            });
        }

        let raw: Vec<InstanceRaw> = instances.iter().map(Instance::to_raw).collect();
        ctx.queue
            .write_buffer(&self.solid_buffer, 0, bytemuck::cast_slice(&raw));
        self.solid_amount = raw.len();
    }

    pub fn render(&self) -> Render<'_> {
        Render::Composed(vec![
            Render::Solids(vec![Instanced {
                instance: &self.solid_buffer,
                mesh: &self.cube,
                amount: self.solid_amount,
            }]),
            Render::Transparent(Instanced {
                instance: &self.bus_buffer,
                mesh: &self.plane,
                amount: 1,
            }),
        ])
    }
}

fn slab(position: [f32; 3], size: [f32; 3], color: u32) -> Instance {
    Instance {
        position: position.into(),
        scale: size.into(),
        color: rgba(scene::srgb(color)),
        ..Default::default()
    }
}

fn rgba(rgb: [f32; 3]) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], 1.0]
}

fn emissive(rgb: [f32; 3], intensity: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], intensity]
}
