//! Summary statistics and harmonic content of simulation outputs.

use num_complex::Complex64;
use rolling_stats::Stats;

use crate::constants::DEGENERACY_EPSILON;
use crate::error::Result;
use crate::result::SimulationResult;
use crate::signal_processing::FftEngine;

/// Statistics of a cyclic error sequence, in radians
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ErrorStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub peak_to_peak: f64,
    pub rms: f64,
}

impl ErrorStats {
    /// `None` for an empty sequence
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut stats: Stats<f64> = Stats::new();
        let mut sum_sq = 0.0;
        for &e in samples {
            stats.update(e);
            sum_sq += e * e;
        }

        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: if stats.count > 1 { stats.std_dev } else { 0.0 },
            min: stats.min,
            max: stats.max,
            peak_to_peak: stats.max - stats.min,
            rms: (sum_sq / samples.len() as f64).sqrt(),
        })
    }
}

pub fn cyclic_error_stats(result: &SimulationResult) -> Option<ErrorStats> {
    ErrorStats::from_samples(result.cyclic_error())
}

/// Magnitude of one harmonic relative to the strongest one
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct HarmonicComponent {
    pub order: usize,
    pub magnitude: f64,
}

/// Normalized magnitudes of harmonic orders `0..=max_order` of a spectrum.
///
/// Bins are spaced by the modulation frequency, so bin `k` is harmonic
/// order `k`. Only the positive half of the spectrum is considered and the
/// magnitudes are scaled so its largest bin is 1.
pub fn harmonic_spectrum(spectrum: &[Complex64], max_order: usize) -> Vec<HarmonicComponent> {
    let half = &spectrum[..spectrum.len() / 2];
    let peak = half.iter().fold(0.0f64, |a, c| a.max(c.norm()));

    half.iter()
        .take(max_order.saturating_add(1))
        .enumerate()
        .map(|(order, c)| HarmonicComponent {
            order,
            magnitude: if peak > 0.0 { c.norm() / peak } else { 0.0 },
        })
        .collect()
}

/// Harmonic order (DFT bin in `1..=N/2`) with the largest magnitude.
///
/// For a cyclic error sampled over one unambiguous range this is the number
/// of ripples per range. `None` when there is no such bin or the signal has
/// no AC content.
pub fn dominant_harmonic(signal: &[f64]) -> Result<Option<usize>> {
    let n = signal.len();
    if n < 2 {
        return Ok(None);
    }

    let spectrum = FftEngine::new(n).forward_real(signal)?;
    let best = spectrum[1..=n / 2]
        .iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c.norm()))
        .fold((0, 0.0f64), |best, cur| if cur.1 > best.1 { cur } else { best });

    let amplitude = signal.iter().fold(0.0f64, |a, &b| a.max(b.abs()));
    let floor = DEGENERACY_EPSILON * n as f64 * amplitude;
    Ok(if best.1 > floor { Some(best.0) } else { None })
}
