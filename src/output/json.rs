use serde::Serialize;

use super::{Formatter, REPORT_MAX_HARMONIC, ReportUnits, iso8601_timestamp};
use crate::analysis::{
    ErrorStats, HarmonicComponent, cyclic_error_stats, dominant_harmonic, harmonic_spectrum,
};
use crate::result::SimulationResult;

/// Summary, statistics and harmonic spectra; per-sample arrays when verbose
pub struct JsonFormatter {
    units: ReportUnits,
    include_samples: bool,
}

impl JsonFormatter {
    pub fn new(units: ReportUnits, include_samples: bool) -> Self {
        Self {
            units,
            include_samples,
        }
    }
}

#[derive(Serialize)]
struct Report {
    generated_at: String,
    modulation_frequency_hz: f64,
    num_time_samples: usize,
    num_components: usize,
    duty_cycle: f64,
    angle_unit: String,
    length_unit: String,
    phase_shift: Vec<f64>,
    unambiguous_range: f64,
    /// Always in radians
    cyclic_error_stats_rad: Option<ErrorStats>,
    dominant_error_harmonic: Option<usize>,
    harmonics: Harmonics,
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<Samples>,
}

#[derive(Serialize)]
struct Harmonics {
    sensor_demodulation: Vec<HarmonicComponent>,
    source_modulation: Vec<HarmonicComponent>,
    correlation: Vec<HarmonicComponent>,
}

#[derive(Serialize)]
struct Samples {
    time_ns: Vec<f64>,
    ground_truth_distance: Vec<f64>,
    ground_truth_phase: Vec<f64>,
    simulated_phase: Vec<f64>,
    cyclic_error: Vec<f64>,
}

impl JsonFormatter {
    fn report(&self, result: &SimulationResult) -> Report {
        let u = &self.units;
        let angles = |values: &[f64]| values.iter().map(|&v| u.angle(v)).collect::<Vec<_>>();
        let harmonics = |spectrum: Option<&[num_complex::Complex64]>| {
            spectrum
                .map(|s| harmonic_spectrum(s, REPORT_MAX_HARMONIC))
                .unwrap_or_default()
        };

        let samples = self.include_samples.then(|| Samples {
            time_ns: result.time().iter().map(|t| t * 1e9).collect(),
            ground_truth_distance: result
                .ground_truth_distance()
                .iter()
                .map(|&d| u.length(d))
                .collect(),
            ground_truth_phase: angles(result.ground_truth_phase()),
            simulated_phase: angles(result.simulated_phase()),
            cyclic_error: angles(result.cyclic_error()),
        });

        Report {
            generated_at: iso8601_timestamp(),
            modulation_frequency_hz: result.modulation_frequency(),
            num_time_samples: result.num_time_samples(),
            num_components: result.num_components(),
            duty_cycle: result.config().duty_cycle(),
            angle_unit: u.angle.to_string(),
            length_unit: u.length.to_string(),
            phase_shift: angles(result.config().phase_shift()),
            unambiguous_range: u.length(result.unambiguous_range()),
            cyclic_error_stats_rad: cyclic_error_stats(result),
            dominant_error_harmonic: dominant_harmonic(result.cyclic_error()).ok().flatten(),
            harmonics: Harmonics {
                sensor_demodulation: harmonics(result.sensor_spectrum(0)),
                source_modulation: harmonics(result.source_spectrum(0)),
                correlation: harmonics(result.correlation_spectrum(0)),
            },
            samples,
        }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, result: &SimulationResult) -> String {
        serde_json::to_string_pretty(&self.report(result))
            .unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
