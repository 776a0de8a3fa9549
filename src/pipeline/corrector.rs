use crate::error::{ItofError, Result};
use crate::signal_processing::{mean, unwrap_phase, wrap_to_two_pi};

/// Unwrapped, bias-free phase and the residual cyclic error
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedPhase {
    pub simulated_phase: Vec<f64>,
    /// `simulated_phase - ground_truth_phase`, zero mean
    pub cyclic_error: Vec<f64>,
}

/// Unwrap `raw_phase` and remove its constant offset from the ground truth.
///
/// The offset combines the 2π multiple picked by unwrapping and the
/// arbitrary phase origin of the correlation; only the periodic residual is
/// kept, so the returned cyclic error always has zero mean.
pub fn correct_phase(raw_phase: &[f64], ground_truth_phase: &[f64]) -> Result<CorrectedPhase> {
    if raw_phase.len() != ground_truth_phase.len() {
        return Err(ItofError::ShapeMismatch {
            context: "phase correction",
            expected: ground_truth_phase.len(),
            actual: raw_phase.len(),
        });
    }

    let folded: Vec<f64> = raw_phase.iter().map(|&p| wrap_to_two_pi(p)).collect();
    let unwrapped = unwrap_phase(&folded);

    let provisional: Vec<f64> = unwrapped
        .iter()
        .zip(ground_truth_phase)
        .map(|(u, g)| u - g)
        .collect();
    let bias = mean(&provisional);
    log::debug!("Removing phase bias of {:.6} rad", bias);

    Ok(CorrectedPhase {
        simulated_phase: unwrapped.iter().map(|u| u - bias).collect(),
        cyclic_error: provisional.iter().map(|e| e - bias).collect(),
    })
}
