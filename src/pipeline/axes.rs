use crate::config::SimulationConfig;
use crate::constants::SPEED_OF_LIGHT;
use crate::units::distance_to_phase;

/// Time and frequency axes of one modulation period, with the ground truth
/// distance and phase at every time sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleAxes {
    /// Sample times in seconds, uniform over [0, period)
    pub time: Vec<f64>,
    /// DFT bin frequencies in Hz (standard layout, negative half last)
    pub frequency: Vec<f64>,
    /// Ground-truth distance in meters
    pub distance: Vec<f64>,
    /// Ground-truth phase in radians, in [0, 2π)
    pub phase: Vec<f64>,
    /// Unambiguous range in meters
    pub unambiguous_range: f64,
}

impl SampleAxes {
    pub fn new(config: &SimulationConfig) -> Self {
        let n = config.num_time_samples();
        let dt = config.period() / n as f64;
        let unambiguous_range = config.unambiguous_range();

        let time: Vec<f64> = (0..n).map(|i| i as f64 * dt).collect();
        let frequency = dft_frequencies(n, dt);
        let distance: Vec<f64> = time.iter().map(|&t| 0.5 * t * SPEED_OF_LIGHT).collect();
        let phase = distance
            .iter()
            .map(|&d| distance_to_phase(d, unambiguous_range))
            .collect();

        Self {
            time,
            frequency,
            distance,
            phase,
            unambiguous_range,
        }
    }
}

/// Bin frequencies of an `n`-point DFT with sample spacing `dt`
pub fn dft_frequencies(n: usize, dt: f64) -> Vec<f64> {
    let df = 1.0 / (n as f64 * dt);
    let positive = (n - 1) / 2;
    (0..n)
        .map(|k| {
            if k <= positive {
                k as f64 * df
            } else {
                (k as f64 - n as f64) * df
            }
        })
        .collect()
}
