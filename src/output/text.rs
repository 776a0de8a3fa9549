use super::{Formatter, REPORT_MAX_HARMONIC, ReportUnits};
use crate::analysis::{cyclic_error_stats, dominant_harmonic, harmonic_spectrum};
use crate::result::SimulationResult;
use crate::units::phase_to_distance;
use std::fmt::Write;

pub struct TextFormatter {
    units: ReportUnits,
    verbose: bool,
}

impl TextFormatter {
    pub fn new(units: ReportUnits, verbose: bool) -> Self {
        Self { units, verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, result: &SimulationResult) -> String {
        let u = &self.units;
        let range = result.unambiguous_range();
        let config = result.config();
        let mut out = String::new();

        let shifts: Vec<String> = config
            .phase_shift()
            .iter()
            .map(|&p| format!("{:.1}", u.angle(p)))
            .collect();

        // Writing into a String cannot fail
        let _ = writeln!(out, "=== iToF cyclic error simulation ===");
        let _ = writeln!(
            out,
            "Modulation frequency: {:.3} MHz",
            result.modulation_frequency() / 1e6
        );
        let _ = writeln!(
            out,
            "Unambiguous range: {:.4} {}",
            u.length(range),
            u.length
        );
        let _ = writeln!(
            out,
            "Samples: {}, channels: {}, duty cycle: {:.2}",
            result.num_time_samples(),
            result.num_components(),
            config.duty_cycle()
        );
        let _ = writeln!(out, "Phase shifts ({}): [{}]", u.angle, shifts.join(", "));

        if let Some(stats) = cyclic_error_stats(result) {
            let _ = writeln!(
                out,
                "Cyclic error ({}): std {:.4}, min {:.4}, max {:.4}, p-p {:.4}",
                u.angle,
                u.angle(stats.std_dev),
                u.angle(stats.min),
                u.angle(stats.max),
                u.angle(stats.peak_to_peak)
            );
            let _ = writeln!(
                out,
                "Cyclic error ({}): rms {:.4}, p-p {:.4}",
                u.length,
                u.length(phase_to_distance(stats.rms, range)),
                u.length(phase_to_distance(stats.peak_to_peak, range))
            );
        }

        match dominant_harmonic(result.cyclic_error()) {
            Ok(Some(order)) => {
                let _ = writeln!(out, "Dominant error harmonic: {}", order);
            }
            _ => {
                let _ = writeln!(out, "Dominant error harmonic: -");
            }
        }

        if self.verbose
            && let Some(spectrum) = result.correlation_spectrum(0)
        {
            let _ = writeln!(out, "Correlation harmonics (channel 0):");
            for h in harmonic_spectrum(spectrum, REPORT_MAX_HARMONIC) {
                if h.magnitude > 1e-6 {
                    let _ = writeln!(out, "  {:>2}: {:.4}", h.order, h.magnitude);
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::small_result;
    use crate::units::{AngleUnit, LengthUnit};

    #[test]
    fn test_text_summary() {
        let result = small_result();
        let formatter = TextFormatter::new(
            ReportUnits::new(AngleUnit::Degrees, LengthUnit::Centimeters),
            false,
        );
        let text = formatter.format(&result);
        assert!(text.contains("Modulation frequency: 20.000 MHz"));
        assert!(text.contains("Unambiguous range: 749.4811 cm"));
        assert!(text.contains("Phase shifts (deg): [0.0, 90.0, 180.0, 270.0]"));
        assert!(!text.contains("Correlation harmonics"));
    }

    #[test]
    fn test_text_verbose_lists_harmonics() {
        let result = small_result();
        let formatter = TextFormatter::new(ReportUnits::default(), true);
        let text = formatter.format(&result);
        assert!(text.contains("Correlation harmonics (channel 0):"));
        assert!(text.contains("   1: 1.0000"));
    }
}
