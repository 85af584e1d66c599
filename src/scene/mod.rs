//! Scene layout and state for the vector-add pipeline.
//!
//! The hardware blocks (global memory, unified buffer, vector unit, bus) are
//! static decoration; their positions, sizes and colours live here as layout
//! constants. The mutable part of the scene is [`SceneState`]: the three
//! tensor tiles plus the vector unit's material, which is everything the
//! animation timeline touches and everything `reset` restores.

pub mod choreography;
pub mod renderer;

use cgmath::Vector3;

// Tier layout, in world units. The pipeline runs along the z axis: global
// memory near the camera, the vector unit in the back.
pub const GLOBAL_MEMORY_POS: [f32; 3] = [0.0, 0.0, 10.0];
pub const GLOBAL_MEMORY_SIZE: [f32; 3] = [20.0, 0.5, 10.0];
pub const UNIFIED_BUFFER_POS: [f32; 3] = [0.0, 0.0, 0.0];
pub const UNIFIED_BUFFER_SIZE: [f32; 3] = [10.0, 0.5, 6.0];
pub const VECTOR_UNIT_POS: [f32; 3] = [0.0, 0.5, -8.0];
pub const VECTOR_UNIT_SIZE: [f32; 3] = [4.0, 1.0, 4.0];
// The bus plane sits just above the ground and spans all three tiers.
pub const BUS_POS: [f32; 3] = [0.0, 0.05, 1.0];
pub const BUS_SIZE: [f32; 2] = [2.0, 24.0];

/// Edge length of a tensor tile at scale factor 1.
pub const TILE_SIZE: f32 = 0.8;
/// Height of a tile travelling over the memory tiers.
pub const TRAVEL_HEIGHT: f32 = 1.0;
/// Height of a tile sitting inside the vector unit.
pub const COMPUTE_HEIGHT: f32 = 1.5;

// Palette (sRGB hex as in any style sheet; converted via `srgb` for the GPU).
pub const BACKGROUND: u32 = 0x0b0c10;
pub const GLOBAL_MEMORY_COLOR: u32 = 0x2c3e50;
pub const UNIFIED_BUFFER_COLOR: u32 = 0x34495e;
pub const VECTOR_UNIT_COLOR: u32 = 0x45a29e;
pub const VECTOR_UNIT_EMISSIVE: u32 = 0x1f2833;
pub const BUS_COLOR: u32 = 0x66fcf1;
pub const TENSOR_A_COLOR: u32 = 0x2ecc71;
pub const TENSOR_B_COLOR: u32 = 0x3498db;
pub const TENSOR_C_COLOR: u32 = 0xf1c40f;

/// Baseline emissive intensity of the vector unit (the "idle glow").
pub const UNIT_BASE_INTENSITY: f32 = 0.5;

/// Converts a packed sRGB hex colour to linear RGB as the shaders expect it.
pub fn srgb(hex: u32) -> [f32; 3] {
    let channel = |c: u32| {
        let c = (c & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(hex >> 16), channel(hex >> 8), channel(hex)]
}

/// The three tensor tiles of the add operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TensorId {
    A,
    B,
    C,
}

/// Home slot of a tensor on the global-memory tier: inputs flank the bus,
/// the result lands in the middle.
pub fn tensor_home(id: TensorId) -> Vector3<f32> {
    let x = match id {
        TensorId::A => -2.0,
        TensorId::B => 2.0,
        TensorId::C => 0.0,
    };
    Vector3::new(x, TRAVEL_HEIGHT, GLOBAL_MEMORY_POS[2])
}

/// A tensor's slot on the unified buffer (same lane, z of the buffer).
pub fn buffer_slot(id: TensorId) -> Vector3<f32> {
    let home = tensor_home(id);
    Vector3::new(home.x, TRAVEL_HEIGHT, UNIFIED_BUFFER_POS[2])
}

/// A tensor's slot inside the vector unit (raised into the core).
pub fn unit_slot(id: TensorId) -> Vector3<f32> {
    let home = tensor_home(id);
    Vector3::new(home.x, COMPUTE_HEIGHT, VECTOR_UNIT_POS[2])
}

pub fn tensor_color(id: TensorId) -> [f32; 3] {
    match id {
        TensorId::A => srgb(TENSOR_A_COLOR),
        TensorId::B => srgb(TENSOR_B_COLOR),
        TensorId::C => srgb(TENSOR_C_COLOR),
    }
}

/// Mutable state of one tensor tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorState {
    pub position: Vector3<f32>,
    pub scale: f32,
    pub visible: bool,
}

/// Mutable material state of the vector unit. Flashed by the timeline while
/// "computing", restored by reset.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitMaterial {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

/// Everything in the scene that the timeline mutates.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub a: TensorState,
    pub b: TensorState,
    pub c: TensorState,
    pub unit: UnitMaterial,
}

impl SceneState {
    /// The documented initial state: inputs visible at full scale on global
    /// memory, the result hidden at zero scale, the unit at its idle glow.
    pub fn new() -> Self {
        let input = |id| TensorState {
            position: tensor_home(id),
            scale: 1.0,
            visible: true,
        };
        Self {
            a: input(TensorId::A),
            b: input(TensorId::B),
            c: TensorState {
                position: tensor_home(TensorId::C),
                scale: 0.0,
                visible: false,
            },
            unit: UnitMaterial {
                color: srgb(VECTOR_UNIT_COLOR),
                emissive: srgb(VECTOR_UNIT_EMISSIVE),
                emissive_intensity: UNIT_BASE_INTENSITY,
            },
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn tensor(&self, id: TensorId) -> &TensorState {
        match id {
            TensorId::A => &self.a,
            TensorId::B => &self.b,
            TensorId::C => &self.c,
        }
    }

    pub fn tensor_mut(&mut self, id: TensorId) -> &mut TensorState {
        match id {
            TensorId::A => &mut self.a,
            TensorId::B => &mut self.b,
            TensorId::C => &mut self.c,
        }
    }

    pub fn visible_count(&self) -> usize {
        [&self.a, &self.b, &self.c]
            .into_iter()
            .filter(|t| t.visible)
            .count()
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}
