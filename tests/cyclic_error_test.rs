mod test_configs;

use approx::assert_abs_diff_eq;
use itofsim::analysis::{cyclic_error_stats, dominant_harmonic};
use itofsim::{SimulationConfig, SimulationParams, simulate};
use test_configs::{four_phase, mean, with_shifts_deg};

#[test]
fn test_square_wave_four_phase_has_four_ripples() {
    let result = simulate(&four_phase(0.5, 3000)).unwrap();
    let error = result.cyclic_error();

    assert_eq!(dominant_harmonic(error).unwrap(), Some(4));
    assert_abs_diff_eq!(mean(error), 0.0, epsilon = 1e-12);

    let peak = result.peak_cyclic_error();
    assert!(
        peak > 0.05 && peak < 0.1,
        "peak cyclic error {} rad outside expected range",
        peak
    );
}

#[test]
fn test_simulated_phase_tracks_ground_truth() {
    let result = simulate(&four_phase(0.5, 3000)).unwrap();
    for (s, g) in result
        .simulated_phase()
        .iter()
        .zip(result.ground_truth_phase())
    {
        assert!((s - g).abs() < 0.1);
    }
}

#[test]
fn test_narrow_pulse_error_is_staircase() {
    let narrow = simulate(&four_phase(0.01, 3000)).unwrap();
    let half = simulate(&four_phase(0.5, 3000)).unwrap();

    assert_abs_diff_eq!(mean(narrow.cyclic_error()), 0.0, epsilon = 1e-12);
    assert_eq!(dominant_harmonic(narrow.cyclic_error()).unwrap(), Some(4));
    assert!(
        narrow.peak_cyclic_error() > 5.0 * half.peak_cyclic_error(),
        "narrow {} vs half {}",
        narrow.peak_cyclic_error(),
        half.peak_cyclic_error()
    );
}

#[test]
fn test_uneven_phase_shifts_still_characterized() {
    let result = simulate(&with_shifts_deg(&[0.0, 90.0, 120.0, 210.0], 0.5, 3000)).unwrap();
    let stats = cyclic_error_stats(&result).unwrap();

    assert_eq!(stats.count, 3000);
    assert_abs_diff_eq!(stats.mean, 0.0, epsilon = 1e-12);
    assert!(stats.peak_to_peak > 0.01);
    assert!(result.peak_cyclic_error() < 0.5);
}

#[test]
fn test_global_offset_only_moves_phase_origin() {
    let reference_config = four_phase(0.5, 3000);
    // 9° is 75 samples at N = 3000
    let params = SimulationParams::new(20e6, 3000, 4)
        .with_phase_shift(reference_config.phase_shift().to_vec())
        .with_duty_cycle(0.5)
        .with_phase_offset(9f64.to_radians());
    let shifted = simulate(&SimulationConfig::new(&params).unwrap()).unwrap();
    let reference = simulate(&reference_config).unwrap();

    assert_abs_diff_eq!(mean(shifted.cyclic_error()), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        shifted.peak_cyclic_error(),
        reference.peak_cyclic_error(),
        epsilon = 5e-3
    );
}

#[test]
fn test_more_phases_reduce_error() {
    let four = simulate(&four_phase(0.5, 2400)).unwrap();
    let eight = simulate(&with_shifts_deg(
        &[0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0],
        0.5,
        2400,
    ))
    .unwrap();
    assert!(eight.peak_cyclic_error() < four.peak_cyclic_error());
}
