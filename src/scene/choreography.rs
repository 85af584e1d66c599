//! The authored choreography of the vector-add pipeline.
//!
//! Fixed steps, executed in order by the [`crate::timeline::Timeline`]:
//!
//! 1. copy A and B from global memory to the unified buffer (staggered)
//! 2. stage A and B into the vector unit
//! 3. flash the unit while "computing"
//! 4. atomically swap the inputs for the result tile
//! 5. grow the result from zero scale
//! 6. drain the result back to the unified buffer
//! 7. write the result back to global memory

use crate::scene::{TensorId, buffer_slot, tensor_home, unit_slot};
use crate::timeline::{Channel, Ease, Mutation, Step, Tween};

/// Global memory → unified buffer.
pub const COPY_SECS: f32 = 1.5;
/// Offset between A's and B's start of travel in step 1.
pub const COPY_STAGGER: f32 = 0.2;
/// Unified buffer → vector unit.
pub const STAGE_SECS: f32 = 1.0;
/// Half-period of one emissive flash.
pub const FLASH_HALF_PERIOD: f32 = 0.1;
/// Full up-down flash cycles while computing.
pub const FLASH_CYCLES: u32 = 2;
/// Peak emissive intensity while computing.
pub const FLASH_INTENSITY: f32 = 2.0;
/// Result tile growth after the swap.
pub const GROW_SECS: f32 = 0.2;
/// Vector unit → unified buffer.
pub const DRAIN_SECS: f32 = 1.0;
/// Unified buffer → global memory.
pub const WRITE_BACK_SECS: f32 = 1.5;

/// Builds the step list for one run of the pipeline.
pub fn vector_add_steps() -> Vec<Step> {
    use TensorId::{A, B, C};

    vec![
        // 1: data move, HBM -> UB
        Step::Tween(Tween {
            channels: vec![
                Channel::Position {
                    tensor: A,
                    to: buffer_slot(A),
                },
                Channel::Position {
                    tensor: B,
                    to: buffer_slot(B),
                },
            ],
            duration: COPY_SECS,
            ease: Ease::CubicInOut,
            stagger: COPY_STAGGER,
        }),
        // 2: compute prep, UB -> vector unit
        Step::Tween(Tween {
            channels: vec![
                Channel::Position {
                    tensor: A,
                    to: unit_slot(A),
                },
                Channel::Position {
                    tensor: B,
                    to: unit_slot(B),
                },
            ],
            duration: STAGE_SECS,
            ease: Ease::QuadIn,
            stagger: 0.0,
        }),
        // 3: the add itself, visualized as the core flashing
        Step::Oscillate {
            intensity: FLASH_INTENSITY,
            color: [1.0, 1.0, 1.0],
            half_period: FLASH_HALF_PERIOD,
            cycles: FLASH_CYCLES,
            marker: "computing add(a, b)",
        },
        // 4: inputs consumed, result appears in the core
        Step::Atomic(vec![
            Mutation::Visible(A, false),
            Mutation::Visible(B, false),
            Mutation::MoveTo(C, unit_slot(C)),
            Mutation::Visible(C, true),
        ]),
        // 5: the result pops into existence
        Step::Tween(Tween {
            channels: vec![Channel::Scale { tensor: C, to: 1.0 }],
            duration: GROW_SECS,
            ease: Ease::QuadOut,
            stagger: 0.0,
        }),
        // 6 + 7: write back, vector unit -> UB -> HBM
        Step::Tween(Tween {
            channels: vec![Channel::Position {
                tensor: C,
                to: buffer_slot(C),
            }],
            duration: DRAIN_SECS,
            ease: Ease::QuadOut,
            stagger: 0.0,
        }),
        Step::Tween(Tween {
            channels: vec![Channel::Position {
                tensor: C,
                to: tensor_home(C),
            }],
            duration: WRITE_BACK_SECS,
            ease: Ease::CubicInOut,
            stagger: 0.0,
        }),
    ]
}

/// Wall-clock length of the whole choreography in seconds.
pub fn total_secs() -> f32 {
    vector_add_steps().iter().map(Step::duration).sum()
}
