use std::f64::consts::PI;

/// Square wave with period 2π, matching the usual `square(phase, duty)`
/// convention: +1 while `phase mod 2π < duty·2π`, −1 otherwise.
pub fn square_wave(phase: f64, duty: f64) -> f64 {
    if phase.rem_euclid(2.0 * PI) < duty * 2.0 * PI {
        1.0
    } else {
        -1.0
    }
}

/// Fold a phase into [0, 2π)
pub fn wrap_to_two_pi(phase: f64) -> f64 {
    let wrapped = phase.rem_euclid(2.0 * PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= 2.0 * PI { 0.0 } else { wrapped }
}

/// Remove 2π jumps from a phase sequence.
///
/// Whenever consecutive samples differ by more than π, the remainder of the
/// sequence is shifted by the multiple of 2π that brings the difference back
/// into [−π, π]. The first sample is left untouched.
pub fn unwrap_phase(phase: &[f64]) -> Vec<f64> {
    let mut unwrapped = Vec::with_capacity(phase.len());
    let Some(&first) = phase.first() else {
        return unwrapped;
    };
    unwrapped.push(first);

    let mut correction = 0.0;
    for pair in phase.windows(2) {
        let diff = pair[1] - pair[0];
        if diff.abs() >= PI {
            let mut wrapped_diff = (diff + PI).rem_euclid(2.0 * PI) - PI;
            // A jump of exactly π keeps its direction
            if wrapped_diff == -PI && diff > 0.0 {
                wrapped_diff = PI;
            }
            correction += wrapped_diff - diff;
        }
        unwrapped.push(pair[1] + correction);
    }

    unwrapped
}

/// Arithmetic mean, zero for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
