//! The particle field behind the page content.
//!
//! A fixed set of points is generated once at construction and never mutated;
//! all visible motion comes from the field's rotation angles and the camera.
//! Generation is deterministic per seed so a layout can be reproduced exactly.

use crate::config::BackdropConfig;

/// An immutable cloud of particles plus its current rotation.
#[derive(Clone, Debug)]
pub struct ParticleField {
    positions: Vec<[f32; 3]>,
    rotation_x: f32,
    rotation_y: f32,
    delta_x: f32,
    delta_y: f32,
}

impl ParticleField {
    /// Generate a field from the config: `particle_count` points, each
    /// coordinate uniform in [-spread, spread].
    pub fn new(config: &BackdropConfig) -> Self {
        // xorshift64 for deterministic randomness
        // Note: seed 0 is degenerate (produces all zeros), so we use a default non-zero seed
        let mut state = config.seed;
        if state == 0 {
            state = 0x5DEECE66D; // Same default as Java's Random
        }
        let mut next_f32 = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state as f32) / (u64::MAX as f32)
        };

        let mut positions = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            positions.push([
                (next_f32() - 0.5) * config.spread * 2.0,
                (next_f32() - 0.5) * config.spread * 2.0,
                (next_f32() - 0.5) * config.spread * 2.0,
            ]);
        }

        Self {
            positions,
            rotation_x: 0.0,
            rotation_y: 0.0,
            delta_x: config.rotation_delta_x,
            delta_y: config.rotation_delta_y,
        }
    }

    /// The generated particle positions. Fixed for the lifetime of the field.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current rotation around X in radians.
    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    /// Current rotation around Y in radians.
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Advance rotation by the fixed per-step deltas.
    ///
    /// Deliberately not scaled by frame time: the cloud turns a constant angle
    /// per step, so playback speed follows whatever drives the stepping.
    pub fn step_rotation(&mut self) {
        self.rotation_x = (self.rotation_x + self.delta_x) % std::f32::consts::TAU;
        self.rotation_y = (self.rotation_y + self.delta_y) % std::f32::consts::TAU;
    }

    /// Model matrix applying the field's rotation.
    pub fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_euler(glam::EulerRot::XYZ, self.rotation_x, self.rotation_y, 0.0)
    }
}
