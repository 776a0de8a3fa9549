//! Waveform synthesis and frequency-domain correlation.
//!
//! Each channel pairs the shared sensor demodulation reference (bipolar
//! square wave, 50% duty) with a unipolar, phase-shifted source modulation
//! signal. Their circular cross-correlation is computed as
//! `IFFT(FFT(sensor) · conj(FFT(source)))` and normalized to unit peak.

use crossbeam_channel::bounded;
use num_complex::Complex64;
use std::f64::consts::PI;
use std::thread;

use crate::config::SimulationConfig;
use crate::constants::DEGENERACY_EPSILON;
use crate::error::{ItofError, Result};
use crate::signal_processing::{FftEngine, square_wave};

/// Time- and frequency-domain signals of one measurement channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSignals {
    /// Sensor demodulation reference, ±1
    pub sensor_demodulation: Vec<f64>,
    /// Source (illumination) modulation, 0 or 1
    pub source_modulation: Vec<f64>,
    /// Correlation of sensor and source, normalized to max |x| = 1
    pub correlation: Vec<f64>,
    pub sensor_spectrum: Vec<Complex64>,
    pub source_spectrum: Vec<Complex64>,
    /// `sensor_spectrum · conj(source_spectrum)`
    pub correlation_spectrum: Vec<Complex64>,
}

struct SensorReference {
    signal: Vec<f64>,
    spectrum: Vec<Complex64>,
}

/// Sensor demodulation reference sampled on `time`
pub fn sensor_demodulation(config: &SimulationConfig, time: &[f64]) -> Vec<f64> {
    let omega = 2.0 * PI * config.modulation_frequency();
    time.iter().map(|&t| square_wave(omega * t, 0.5)).collect()
}

/// Source modulation of `channel` sampled on `time`, rescaled to {0, 1}
pub fn source_modulation(config: &SimulationConfig, time: &[f64], channel: usize) -> Vec<f64> {
    let omega = 2.0 * PI * config.modulation_frequency();
    let shift = config.phase_shift()[channel] + config.phase_offset();
    let duty = config.duty_cycle();
    time.iter()
        .map(|&t| 0.5 * (square_wave(omega * t - shift, duty) + 1.0))
        .collect()
}

/// Per-channel signal generator for a fixed number of time samples
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    fft: FftEngine,
}

impl SignalGenerator {
    pub fn new(num_samples: usize) -> Self {
        Self {
            fft: FftEngine::new(num_samples),
        }
    }

    /// Generate every channel in index order.
    ///
    /// Fails with [`ItofError::NumericDegeneracy`] for the first channel whose
    /// correlation is identically zero.
    pub fn generate(&self, config: &SimulationConfig, time: &[f64]) -> Result<Vec<ChannelSignals>> {
        let sensor = self.sensor_reference(config, time)?;
        (0..config.num_components())
            .map(|channel| self.build_channel(config, time, &sensor, channel))
            .collect()
    }

    /// Same output as [`generate`](Self::generate), with channels spread over
    /// scoped worker threads.
    pub fn generate_parallel(
        &self,
        config: &SimulationConfig,
        time: &[f64],
    ) -> Result<Vec<ChannelSignals>> {
        let sensor = self.sensor_reference(config, time)?;
        let num_components = config.num_components();
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(num_components);

        // Capacity covers every channel, so workers never block on send
        let (tx, rx) = bounded(num_components);
        thread::scope(|scope| {
            for worker in 0..workers {
                let tx = tx.clone();
                let sensor = &sensor;
                scope.spawn(move || {
                    for channel in (worker..num_components).step_by(workers) {
                        let result = self.build_channel(config, time, sensor, channel);
                        if tx.send((channel, result)).is_err() {
                            return;
                        }
                    }
                });
            }
        });
        drop(tx);

        let mut slots: Vec<Option<Result<ChannelSignals>>> =
            (0..num_components).map(|_| None).collect();
        for (channel, result) in rx.iter() {
            slots[channel] = Some(result);
        }

        let received = slots.iter().filter(|s| s.is_some()).count();
        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or(Err(ItofError::ShapeMismatch {
                    context: "parallel channel synthesis",
                    expected: num_components,
                    actual: received,
                }))
            })
            .collect()
    }

    /// Generate a single channel
    pub fn generate_channel(
        &self,
        config: &SimulationConfig,
        time: &[f64],
        channel: usize,
    ) -> Result<ChannelSignals> {
        if channel >= config.num_components() {
            return Err(ItofError::InvalidConfiguration(format!(
                "channel {} out of range for {} components",
                channel,
                config.num_components()
            )));
        }
        let sensor = self.sensor_reference(config, time)?;
        self.build_channel(config, time, &sensor, channel)
    }

    fn sensor_reference(&self, config: &SimulationConfig, time: &[f64]) -> Result<SensorReference> {
        let signal = sensor_demodulation(config, time);
        let spectrum = self.fft.forward_real(&signal)?;
        Ok(SensorReference { signal, spectrum })
    }

    fn build_channel(
        &self,
        config: &SimulationConfig,
        time: &[f64],
        sensor: &SensorReference,
        channel: usize,
    ) -> Result<ChannelSignals> {
        let source = source_modulation(config, time, channel);
        let source_spectrum = self.fft.forward_real(&source)?;

        let correlation_spectrum: Vec<Complex64> = sensor
            .spectrum
            .iter()
            .zip(&source_spectrum)
            .map(|(s, y)| s * y.conj())
            .collect();

        let raw = self.fft.inverse_real(&correlation_spectrum)?;
        let peak = raw.iter().fold(0.0f64, |a, &b| a.max(b.abs()));
        if peak <= DEGENERACY_EPSILON {
            return Err(ItofError::NumericDegeneracy { channel });
        }
        log::debug!("Channel {}: correlation peak {:.6e}", channel, peak);

        Ok(ChannelSignals {
            sensor_demodulation: sensor.signal.clone(),
            source_modulation: source,
            correlation: raw.iter().map(|v| v / peak).collect(),
            sensor_spectrum: sensor.spectrum.clone(),
            source_spectrum,
            correlation_spectrum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationParams;
    use crate::pipeline::SampleAxes;
    use crate::units::AngleUnit;
    use approx::assert_abs_diff_eq;

    fn config(duty: f64) -> SimulationConfig {
        let params = SimulationParams::new(20e6, 400, 4)
            .with_phase_shift(vec![0.0, 90.0, 180.0, 270.0])
            .with_phase_unit(AngleUnit::Degrees)
            .with_duty_cycle(duty);
        SimulationConfig::new(&params).unwrap()
    }

    #[test]
    fn test_sensor_is_bipolar_half_duty() {
        let config = config(0.5);
        let axes = SampleAxes::new(&config);
        let sensor = sensor_demodulation(&config, &axes.time);
        assert!(sensor.iter().all(|&v| v == 1.0 || v == -1.0));
        let high = sensor.iter().filter(|&&v| v > 0.0).count();
        assert!((199..=201).contains(&high), "high samples {}", high);
    }

    #[test]
    fn test_source_is_unipolar_with_duty() {
        let config = config(0.25);
        let axes = SampleAxes::new(&config);
        let source = source_modulation(&config, &axes.time, 0);
        assert!(source.iter().all(|&v| v == 0.0 || v == 1.0));
        let high = source.iter().filter(|&&v| v > 0.0).count();
        assert!((99..=101).contains(&high), "high samples {}", high);
    }

    #[test]
    fn test_source_shift_moves_rising_edge() {
        let config = config(0.5);
        let axes = SampleAxes::new(&config);
        // 90° shift: the pulse starts a quarter period in
        let source = source_modulation(&config, &axes.time, 1);
        assert_eq!(source[50], 0.0);
        assert_eq!(source[150], 1.0);
        assert_eq!(source[350], 0.0);
    }

    #[test]
    fn test_correlation_normalized_per_channel() {
        let config = config(0.5);
        let axes = SampleAxes::new(&config);
        let channels = SignalGenerator::new(400).generate(&config, &axes.time).unwrap();

        assert_eq!(channels.len(), 4);
        for ch in &channels {
            assert_eq!(ch.correlation.len(), 400);
            assert_eq!(ch.correlation_spectrum.len(), 400);
            let peak = ch.correlation.iter().fold(0.0f64, |a, &b| a.max(b.abs()));
            assert_abs_diff_eq!(peak, 1.0, epsilon = f64::EPSILON);
        }
    }

    #[test]
    fn test_correlation_spectrum_is_product() {
        let config = config(0.5);
        let axes = SampleAxes::new(&config);
        let ch = SignalGenerator::new(400)
            .generate_channel(&config, &axes.time, 2)
            .unwrap();
        for k in [0, 1, 3, 7] {
            let expected = ch.sensor_spectrum[k] * ch.source_spectrum[k].conj();
            assert_abs_diff_eq!(ch.correlation_spectrum[k].re, expected.re, epsilon = 1e-9);
            assert_abs_diff_eq!(ch.correlation_spectrum[k].im, expected.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_half_duty_correlation_is_triangle() {
        let config = config(0.5);
        let axes = SampleAxes::new(&config);
        let ch = SignalGenerator::new(400)
            .generate_channel(&config, &axes.time, 0)
            .unwrap();
        // Square ⋆ square is piecewise linear: constant slope away from the corners
        let slopes: Vec<f64> = ch.correlation.windows(2).map(|w| w[1] - w[0]).collect();
        assert_abs_diff_eq!(slopes[50].abs(), slopes[60].abs(), epsilon = 1e-9);
        assert!(slopes[50].abs() > 0.0);
    }

    #[test]
    fn test_zero_duty_is_degenerate() {
        let config = config(0.0);
        let axes = SampleAxes::new(&config);
        let err = SignalGenerator::new(400)
            .generate(&config, &axes.time)
            .unwrap_err();
        assert_eq!(err, ItofError::NumericDegeneracy { channel: 0 });
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = config(0.3);
        let axes = SampleAxes::new(&config);
        let generator = SignalGenerator::new(400);
        let sequential = generator.generate(&config, &axes.time).unwrap();
        let parallel = generator.generate_parallel(&config, &axes.time).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_parallel_reports_degeneracy() {
        let config = config(0.0);
        let axes = SampleAxes::new(&config);
        let err = SignalGenerator::new(400)
            .generate_parallel(&config, &axes.time)
            .unwrap_err();
        assert_eq!(err, ItofError::NumericDegeneracy { channel: 0 });
    }

    #[test]
    fn test_channel_out_of_range() {
        let config = config(0.5);
        let axes = SampleAxes::new(&config);
        assert!(matches!(
            SignalGenerator::new(400).generate_channel(&config, &axes.time, 4),
            Err(ItofError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_time_axis_length_mismatch() {
        let config = config(0.5);
        let axes = SampleAxes::new(&config);
        let err = SignalGenerator::new(200)
            .generate(&config, &axes.time)
            .unwrap_err();
        assert!(matches!(err, ItofError::ShapeMismatch { expected: 200, actual: 400, .. }));
    }
}
