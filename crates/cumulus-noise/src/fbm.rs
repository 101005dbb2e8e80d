use std::sync::OnceLock;

use glam::{Vec2, Vec3};
use noise::{NoiseFn, Perlin};

// Fixed lattice seed: regeneration with the same parameters must be
// reproducible, so no caller-supplied seed state exists.
const SEED: u32 = 0x00C1_00D5;

const OCTAVES: u32 = 4;
const LACUNARITY: f32 = 2.0;
const GAIN: f32 = 0.5;

static PERLIN: OnceLock<Perlin> = OnceLock::new();

fn perlin() -> &'static Perlin {
    PERLIN.get_or_init(|| Perlin::new(SEED))
}

/// Multi-octave fractal noise over a 2D coordinate, normalized to [0, 1].
pub fn fbm_2d(p: Vec2, frequency: f32) -> f32 {
    let perlin = perlin();
    let mut amplitude = 1.0;
    let mut freq = frequency;
    let mut sum = 0.0;
    let mut norm = 0.0;
    for _ in 0..OCTAVES {
        let q = p * freq;
        sum += amplitude * perlin.get([q.x as f64, q.y as f64]) as f32;
        norm += amplitude;
        amplitude *= GAIN;
        freq *= LACUNARITY;
    }
    (sum / norm) * 0.5 + 0.5
}

/// Multi-octave fractal noise over a 3D coordinate, normalized to [0, 1].
pub fn fbm_3d(p: Vec3, frequency: f32) -> f32 {
    let perlin = perlin();
    let mut amplitude = 1.0;
    let mut freq = frequency;
    let mut sum = 0.0;
    let mut norm = 0.0;
    for _ in 0..OCTAVES {
        let q = p * freq;
        sum += amplitude * perlin.get([q.x as f64, q.y as f64, q.z as f64]) as f32;
        norm += amplitude;
        amplitude *= GAIN;
        freq *= LACUNARITY;
    }
    (sum / norm) * 0.5 + 0.5
}
