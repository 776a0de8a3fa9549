pub mod fft;
pub mod math;

pub use fft::FftEngine;
pub use math::{mean, square_wave, unwrap_phase, wrap_to_two_pi};
