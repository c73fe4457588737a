//! seeded 3‑D height field, one byte per (x, y, floor)
use noise::{NoiseFn, OpenSimplex};

use crate::config::GeneratorConfig;
use crate::constants::{NOISE_MAX, NOISE_OFFSET, NOISE_SCALE};

pub struct NoiseField<N = OpenSimplex> {
    noise: N,
    scale: f64,
    z_multiplier: f64,
}

impl NoiseField<OpenSimplex> {
    pub fn seeded(seed: u32, generator: &GeneratorConfig) -> Self {
        Self::new(OpenSimplex::new(seed), generator)
    }
}

impl<N: NoiseFn<f64, 3>> NoiseField<N> {
    pub fn new(noise: N, generator: &GeneratorConfig) -> Self {
        Self {
            noise,
            scale: generator.freq * generator.octaves as f64,
            z_multiplier: generator.z_multiplier,
        }
    }

    /// `round(noise3(x/s, y/s, z/s · zmult) · 127 + 128)`, clamped to a byte
    pub fn sample(&self, x: usize, y: usize, z: usize) -> u8 {
        let n = self.noise.get([
            x as f64 / self.scale,
            y as f64 / self.scale,
            z as f64 / self.scale * self.z_multiplier,
        ]);
        (n * NOISE_SCALE + NOISE_OFFSET)
            .round()
            .clamp(0.0, NOISE_MAX as f64) as u8
    }
}
