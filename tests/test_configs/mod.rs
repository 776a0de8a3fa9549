#![allow(dead_code)]

use itofsim::units::AngleUnit;
use itofsim::{SimulationConfig, SimulationParams};

pub const MODULATION_FREQUENCY: f64 = 20e6;

/// Evenly spaced 4-phase configuration
pub fn four_phase(duty_cycle: f64, num_samples: usize) -> SimulationConfig {
    with_shifts_deg(&[0.0, 90.0, 180.0, 270.0], duty_cycle, num_samples)
}

pub fn with_shifts_deg(shifts: &[f64], duty_cycle: f64, num_samples: usize) -> SimulationConfig {
    let params = SimulationParams::new(MODULATION_FREQUENCY, num_samples, shifts.len())
        .with_phase_shift(shifts.to_vec())
        .with_phase_unit(AngleUnit::Degrees)
        .with_duty_cycle(duty_cycle);
    SimulationConfig::new(&params).expect("test configuration should be valid")
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn peak_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0f64, |a, &b| a.max(b.abs()))
}
