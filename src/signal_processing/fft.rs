//! Planned forward/inverse FFTs of a fixed size.

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

use crate::error::{ItofError, Result};

/// Forward and inverse FFT plans for one transform size
///
/// Plans are shared through `Arc`, so an engine can be cloned cheaply and
/// used from several worker threads.
#[derive(Clone)]
pub struct FftEngine {
    size: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for FftEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftEngine").field("size", &self.size).finish()
    }
}

impl FftEngine {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        Self {
            size,
            forward,
            inverse,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// In-place forward transform (no scaling)
    pub fn forward_in_place(&self, buffer: &mut [Complex64]) -> Result<()> {
        self.check_len("forward FFT", buffer.len())?;
        self.forward.process(buffer);
        Ok(())
    }

    /// Forward transform of a real signal
    pub fn forward_real(&self, signal: &[f64]) -> Result<Vec<Complex64>> {
        let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        self.forward_in_place(&mut buffer)?;
        Ok(buffer)
    }

    /// Inverse transform scaled by 1/N, keeping only the real part
    pub fn inverse_real(&self, spectrum: &[Complex64]) -> Result<Vec<f64>> {
        self.check_len("inverse FFT", spectrum.len())?;
        let mut buffer = spectrum.to_vec();
        self.inverse.process(&mut buffer);
        let scale = 1.0 / self.size as f64;
        Ok(buffer.iter().map(|c| c.re * scale).collect())
    }

    fn check_len(&self, context: &'static str, actual: usize) -> Result<()> {
        if actual != self.size {
            return Err(ItofError::ShapeMismatch {
                context,
                expected: self.size,
                actual,
            });
        }
        Ok(())
    }
}
