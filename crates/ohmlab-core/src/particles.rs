//! Per-frame particle state: flow trails along the wires and the smoke plume
//! rising from the resistor.
//!
//! Both systems own a seeded RNG so that a given seed replays the same
//! animation, which keeps the tests deterministic.

use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

/// Particles travelling along a polyline at a speed proportional to current.
pub struct FlowTrail {
    points: SmallVec<[Vec3; 4]>,
    phases: Vec<f32>,
    rng: StdRng,
}

impl FlowTrail {
    pub fn new(points: &[Vec3], count: usize, seed: u64) -> Self {
        let mut trail = Self {
            points: SmallVec::from_slice(points),
            phases: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        trail.reseed(count);
        trail
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    /// Change the particle count; phases are re-randomized only when it differs.
    pub fn set_count(&mut self, count: usize) {
        if count != self.phases.len() {
            self.reseed(count);
        }
    }

    fn reseed(&mut self, count: usize) {
        self.phases = (0..count).map(|_| self.rng.gen::<f32>()).collect();
    }

    /// Advance every particle; later particles move faster so they spread out.
    pub fn step(&mut self, dt_sec: f32, speed: f32) {
        let n = self.phases.len() as f32;
        for (i, t) in self.phases.iter_mut().enumerate() {
            *t += dt_sec.max(0.0) * speed * (0.2 + (i as f32 / n) * 0.8);
            if *t > 1.0 {
                *t = 0.0;
            }
        }
    }

    pub fn position_at(&self, t: f32) -> Vec3 {
        match self.points.len() {
            0 => Vec3::ZERO,
            1 => self.points[0],
            n => {
                let span = t.clamp(0.0, 1.0) * (n - 1) as f32;
                let idx = (span.floor() as usize).min(n - 1);
                let local = span.fract();
                let a = self.points[idx];
                let b = self.points[(idx + 1).min(n - 1)];
                a.lerp(b, local)
            }
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.phases.iter().map(|&t| self.position_at(t))
    }
}

#[derive(Clone, Copy, Debug)]
struct Puff {
    x: f32,
    y: f32,
    z: f32,
    life: f32,
    age: f32,
    scale: f32,
    rot: f32,
}

/// One puff as it should be drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PuffSample {
    pub position: Vec3,
    pub opacity: f32,
    pub scale: f32,
    pub rotation: f32,
}

/// Smoke rising from the resistor, denser and faster with power.
pub struct SmokePlume {
    anchor: Vec3,
    puffs: Vec<Puff>,
    intensity: f32,
    rng: StdRng,
}

// Puffs start this far above the anchor (top of the resistor body).
const PLUME_BASE_HEIGHT: f32 = 0.8;

impl SmokePlume {
    pub fn new(anchor: Vec3, count: usize, seed: u64) -> Self {
        let mut plume = Self {
            anchor,
            puffs: Vec::new(),
            intensity: 0.0,
            rng: StdRng::seed_from_u64(seed),
        };
        plume.reseed(count);
        plume
    }

    pub fn len(&self) -> usize {
        self.puffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puffs.is_empty()
    }

    pub fn set_count(&mut self, count: usize) {
        if count != self.puffs.len() {
            self.reseed(count);
        }
    }

    fn reseed(&mut self, count: usize) {
        let rng = &mut self.rng;
        self.puffs = (0..count)
            .map(|_| Puff {
                x: (rng.gen::<f32>() - 0.5) * 0.6,
                z: (rng.gen::<f32>() - 0.5) * 0.2,
                y: rng.gen::<f32>() * 0.5,
                life: 0.5 + rng.gen::<f32>() * 1.5,
                age: rng.gen::<f32>(),
                scale: 0.2 + rng.gen::<f32>() * 0.6,
                rot: rng.gen::<f32>() * std::f32::consts::TAU,
            })
            .collect();
    }

    /// Advance the plume; `intensity` is the normalized power in [0, 1].
    pub fn step(&mut self, dt_sec: f32, intensity: f32) {
        let dt = dt_sec.max(0.0);
        let k = intensity.clamp(0.0, 1.0);
        self.intensity = k;
        let rng = &mut self.rng;
        for (i, p) in self.puffs.iter_mut().enumerate() {
            p.age += dt * (0.3 + k * 3.0);
            if p.age > p.life {
                p.age = 0.0;
                p.y = 0.0;
                p.x = (rng.gen::<f32>() - 0.5) * 0.6;
                p.z = (rng.gen::<f32>() - 0.5) * 0.2;
                p.life = 0.6 + rng.gen::<f32>() * 1.6;
                p.scale = 0.2 + rng.gen::<f32>() * 0.6;
            } else {
                let fi = i as f32;
                p.y += dt * (0.2 + k * 1.5) * (0.8 + rng.gen::<f32>() * 0.4);
                p.x += (p.age * 3.0 + fi).sin() * 0.001 * (1.0 + k * 2.0);
                p.z += (p.age * 2.0 + fi).cos() * 0.001 * (1.0 + k * 2.0);
            }
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = PuffSample> + '_ {
        let k = self.intensity;
        self.puffs.iter().map(move |p| {
            let life_ratio = (p.age / p.life).clamp(0.0, 1.0);
            PuffSample {
                position: self.anchor + Vec3::new(p.x, PLUME_BASE_HEIGHT + p.y, p.z),
                opacity: ((1.0 - life_ratio) * (0.15 + k * 0.6)).clamp(0.0, 1.0),
                scale: p.scale * (0.8 + life_ratio * 1.6),
                rotation: p.rot + life_ratio * 1.5,
            }
        })
    }
}
