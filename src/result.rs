use num_complex::Complex64;

use crate::config::SimulationConfig;
use crate::error::{ItofError, Result};
use crate::pipeline::{ChannelSignals, CorrectedPhase, SampleAxes};

/// Output of one simulation run
///
/// Built once from the stage outputs and read-only afterwards. Per-channel
/// signals are indexed by channel id `0..num_components`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    config: SimulationConfig,
    axes: SampleAxes,
    channels: Vec<ChannelSignals>,
    simulated_phase: Vec<f64>,
    cyclic_error: Vec<f64>,
}

impl SimulationResult {
    /// Assemble the record, checking every array against the configuration
    pub(crate) fn assemble(
        config: SimulationConfig,
        axes: SampleAxes,
        channels: Vec<ChannelSignals>,
        corrected: CorrectedPhase,
    ) -> Result<Self> {
        let n = config.num_time_samples();
        check("channel count", config.num_components(), channels.len())?;
        for axis in [&axes.time, &axes.frequency, &axes.distance, &axes.phase] {
            check("sample axes", n, axis.len())?;
        }
        for ch in &channels {
            for signal in [&ch.sensor_demodulation, &ch.source_modulation, &ch.correlation] {
                check("channel signal", n, signal.len())?;
            }
            for spectrum in [&ch.sensor_spectrum, &ch.source_spectrum, &ch.correlation_spectrum] {
                check("channel spectrum", n, spectrum.len())?;
            }
        }
        check("simulated phase", n, corrected.simulated_phase.len())?;
        check("cyclic error", n, corrected.cyclic_error.len())?;

        Ok(Self {
            config,
            axes,
            channels,
            simulated_phase: corrected.simulated_phase,
            cyclic_error: corrected.cyclic_error,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn modulation_frequency(&self) -> f64 {
        self.config.modulation_frequency()
    }

    pub fn num_time_samples(&self) -> usize {
        self.config.num_time_samples()
    }

    pub fn num_components(&self) -> usize {
        self.config.num_components()
    }

    /// Sample times in seconds
    pub fn time(&self) -> &[f64] {
        &self.axes.time
    }

    /// DFT bin frequencies in Hz
    pub fn frequency(&self) -> &[f64] {
        &self.axes.frequency
    }

    pub fn ground_truth_distance(&self) -> &[f64] {
        &self.axes.distance
    }

    pub fn ground_truth_phase(&self) -> &[f64] {
        &self.axes.phase
    }

    pub fn unambiguous_range(&self) -> f64 {
        self.axes.unambiguous_range
    }

    pub fn channels(&self) -> &[ChannelSignals] {
        &self.channels
    }

    pub fn channel(&self, channel: usize) -> Option<&ChannelSignals> {
        self.channels.get(channel)
    }

    pub fn sensor_demodulation(&self, channel: usize) -> Option<&[f64]> {
        self.channel(channel).map(|c| c.sensor_demodulation.as_slice())
    }

    pub fn source_modulation(&self, channel: usize) -> Option<&[f64]> {
        self.channel(channel).map(|c| c.source_modulation.as_slice())
    }

    pub fn correlation(&self, channel: usize) -> Option<&[f64]> {
        self.channel(channel).map(|c| c.correlation.as_slice())
    }

    pub fn sensor_spectrum(&self, channel: usize) -> Option<&[Complex64]> {
        self.channel(channel).map(|c| c.sensor_spectrum.as_slice())
    }

    pub fn source_spectrum(&self, channel: usize) -> Option<&[Complex64]> {
        self.channel(channel).map(|c| c.source_spectrum.as_slice())
    }

    pub fn correlation_spectrum(&self, channel: usize) -> Option<&[Complex64]> {
        self.channel(channel).map(|c| c.correlation_spectrum.as_slice())
    }

    /// Simulated phase in radians
    pub fn simulated_phase(&self) -> &[f64] {
        &self.simulated_phase
    }

    /// Cyclic error in radians (zero mean)
    pub fn cyclic_error(&self) -> &[f64] {
        &self.cyclic_error
    }

    /// Largest absolute cyclic error in radians
    pub fn peak_cyclic_error(&self) -> f64 {
        self.cyclic_error.iter().fold(0.0f64, |a, &b| a.max(b.abs()))
    }
}

fn check(context: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ItofError::ShapeMismatch {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationParams;

    fn parts() -> (SimulationConfig, SampleAxes, CorrectedPhase) {
        let config = SimulationConfig::new(&SimulationParams::new(20e6, 8, 3)).unwrap();
        let axes = SampleAxes::new(&config);
        let corrected = CorrectedPhase {
            simulated_phase: vec![0.0; 8],
            cyclic_error: vec![0.0; 8],
        };
        (config, axes, corrected)
    }

    fn channel(n: usize) -> ChannelSignals {
        ChannelSignals {
            sensor_demodulation: vec![1.0; n],
            source_modulation: vec![0.0; n],
            correlation: vec![1.0; n],
            sensor_spectrum: vec![Complex64::new(0.0, 0.0); n],
            source_spectrum: vec![Complex64::new(0.0, 0.0); n],
            correlation_spectrum: vec![Complex64::new(0.0, 0.0); n],
        }
    }

    #[test]
    fn test_assemble_accepts_consistent_parts() {
        let (config, axes, corrected) = parts();
        let result =
            SimulationResult::assemble(config, axes, vec![channel(8); 3], corrected).unwrap();
        assert_eq!(result.channels().len(), 3);
        assert!(result.correlation(2).is_some());
        assert!(result.correlation(3).is_none());
    }

    #[test]
    fn test_assemble_rejects_missing_channel() {
        let (config, axes, corrected) = parts();
        let err =
            SimulationResult::assemble(config, axes, vec![channel(8); 2], corrected).unwrap_err();
        assert!(matches!(err, ItofError::ShapeMismatch { context: "channel count", .. }));
    }

    #[test]
    fn test_assemble_rejects_short_signal() {
        let (config, axes, corrected) = parts();
        let mut channels = vec![channel(8); 3];
        channels[1].correlation.pop();
        let err = SimulationResult::assemble(config, axes, channels, corrected).unwrap_err();
        assert!(matches!(err, ItofError::ShapeMismatch { context: "channel signal", .. }));
    }
}
