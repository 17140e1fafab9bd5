// src/testgen/mod.rs
//
// Synthetic vibration signal generation for demos and for validating the
// detection pipeline. Signals model a small gearbox: a rotation tone, a
// gear-mesh tone, Gaussian sensor noise, and optional seeded fault
// signatures.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Fault signatures the generator can seed into a baseline signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeededFault {
    /// Repeated impulses with exponential decay at the bearing defect rate.
    Bearing,
    /// Amplified component at the rotation frequency.
    Unbalance,
    /// Added second and third rotation harmonics.
    Misalignment,
    /// Amplitude-modulated gear-mesh component.
    Gear,
}

/// Generator settings shared by all signal kinds.
#[derive(Debug, Clone)]
pub struct SignalSpec {
    pub duration_secs: f64,
    pub sample_rate_hz: f64,
    /// Shaft rotation frequency (30 Hz = 1800 RPM).
    pub rotation_hz: f64,
    /// Gear-mesh frequency (12-tooth gear on the default shaft).
    pub gear_mesh_hz: f64,
    /// RNG seed; identical specs produce identical signals.
    pub seed: u64,
}

impl Default for SignalSpec {
    fn default() -> Self {
        Self {
            duration_secs: 1.0,
            sample_rate_hz: 12_000.0,
            rotation_hz: 30.0,
            gear_mesh_hz: 360.0,
            seed: 42,
        }
    }
}

impl SignalSpec {
    fn sample_count(&self) -> usize {
        (self.duration_secs * self.sample_rate_hz) as usize
    }

    fn time(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate_hz
    }
}

/// Baseline rotation + gear-mesh tone mix with light sensor noise.
pub fn healthy_signal(spec: &SignalSpec) -> Vec<f64> {
    let mut signal = base_tones(spec);
    add_noise(&mut signal, 0.1, spec.seed);
    signal
}

/// Baseline signal with the requested fault signature mixed in, plus the
/// heavier noise floor of a degraded machine.
pub fn faulty_signal(spec: &SignalSpec, fault: SeededFault) -> Vec<f64> {
    let mut signal = base_tones(spec);

    match fault {
        SeededFault::Bearing => add_bearing_impulses(&mut signal, spec),
        SeededFault::Unbalance => add_tone(&mut signal, spec, spec.rotation_hz, 2.0),
        SeededFault::Misalignment => {
            add_tone(&mut signal, spec, 2.0 * spec.rotation_hz, 1.0);
            add_tone(&mut signal, spec, 3.0 * spec.rotation_hz, 0.8);
        }
        SeededFault::Gear => add_modulated_mesh(&mut signal, spec),
    }

    add_noise(&mut signal, 0.3, spec.seed);
    signal
}

fn base_tones(spec: &SignalSpec) -> Vec<f64> {
    (0..spec.sample_count())
        .map(|i| {
            let t = spec.time(i);
            0.5 * (2.0 * PI * spec.rotation_hz * t).sin()
                + 0.3 * (2.0 * PI * spec.gear_mesh_hz * t).sin()
        })
        .collect()
}

fn add_tone(signal: &mut [f64], spec: &SignalSpec, freq_hz: f64, amplitude: f64) {
    for (i, s) in signal.iter_mut().enumerate() {
        *s += amplitude * (2.0 * PI * freq_hz * spec.time(i)).sin();
    }
}

/// Impulse train at a typical outer-race defect rate, each impact decaying
/// exponentially.
fn add_bearing_impulses(signal: &mut [f64], spec: &SignalSpec) {
    let defect_hz = 85.0;
    let decay_per_sec = 100.0;
    let n = signal.len();

    let mut impact = 0;
    loop {
        let impact_time = impact as f64 / defect_hz;
        let start = (impact_time * spec.sample_rate_hz) as usize;
        if start >= n {
            break;
        }
        for i in start..n {
            let decay = (-decay_per_sec * (spec.time(i) - spec.time(start))).exp();
            if decay < 1e-6 {
                break;
            }
            signal[i] += 5.0 * decay;
        }
        impact += 1;
    }
}

/// Gear-mesh tone amplitude-modulated at a slow wobble rate.
fn add_modulated_mesh(signal: &mut [f64], spec: &SignalSpec) {
    let modulation_hz = 5.0;
    for (i, s) in signal.iter_mut().enumerate() {
        let t = spec.time(i);
        *s += 1.5
            * (2.0 * PI * spec.gear_mesh_hz * t).sin()
            * (1.0 + 0.5 * (2.0 * PI * modulation_hz * t).sin());
    }
}

fn add_noise(signal: &mut [f64], amplitude: f64, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for s in signal.iter_mut() {
        let noise: f64 = rng.sample(StandardNormal);
        *s += amplitude * noise;
    }
}
