use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::{ItofError, Result};
use crate::signal_processing::FftEngine;

/// Minimum channel count for a first-harmonic bin distinct from DC and Nyquist
pub const MIN_COMPONENTS: usize = 3;

/// N-phase demodulation across channels
///
/// At each time sample the correlation values of all channels, taken in
/// channel order, form one period of a sinusoid in channel index. The
/// argument of its first DFT harmonic is the raw phase estimate.
#[derive(Debug, Clone)]
pub struct PhaseExtractor {
    fft: FftEngine,
}

impl PhaseExtractor {
    pub fn new(num_components: usize) -> Result<Self> {
        if num_components < MIN_COMPONENTS {
            return Err(ItofError::InvalidConfiguration(format!(
                "phase extraction needs at least {} components, got {}",
                MIN_COMPONENTS, num_components
            )));
        }
        Ok(Self {
            fft: FftEngine::new(num_components),
        })
    }

    pub fn num_components(&self) -> usize {
        self.fft.size()
    }

    /// Raw wrapped phase in (−π, π] for every time sample.
    ///
    /// `correlations[c]` is the correlation signal of channel `c`; all must
    /// have the same length.
    pub fn extract<S: AsRef<[f64]>>(&self, correlations: &[S]) -> Result<Vec<f64>> {
        if correlations.len() != self.num_components() {
            return Err(ItofError::ShapeMismatch {
                context: "phase extraction channels",
                expected: self.num_components(),
                actual: correlations.len(),
            });
        }

        let channels: Vec<&[f64]> = correlations.iter().map(|c| c.as_ref()).collect();
        let num_samples = channels[0].len();
        if let Some(bad) = channels.iter().find(|c| c.len() != num_samples) {
            return Err(ItofError::ShapeMismatch {
                context: "phase extraction samples",
                expected: num_samples,
                actual: bad.len(),
            });
        }

        let mut buffer = vec![Complex64::new(0.0, 0.0); self.num_components()];
        let mut phase = Vec::with_capacity(num_samples);
        for i in 0..num_samples {
            for (slot, channel) in buffer.iter_mut().zip(&channels) {
                *slot = Complex64::new(channel[i], 0.0);
            }
            self.fft.forward_in_place(&mut buffer)?;

            let arg = buffer[1].arg();
            phase.push(if arg == -PI { PI } else { arg });
        }

        log::debug!(
            "Extracted {} phase samples from {} channels",
            num_samples,
            self.num_components()
        );
        Ok(phase)
    }
}
