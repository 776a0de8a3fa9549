use anyhow::{Context, Result};
use clap::Parser;
use itofsim::analysis::dominant_harmonic;
use itofsim::units::{AngleUnit, LengthUnit, phase_to_distance};
use itofsim::{ItofError, SimulationConfig, SimulationParams, simulate};

#[derive(Parser, Debug)]
#[command(name = "duty_sweep")]
#[command(about = "Sweep the source duty cycle and report the peak cyclic error")]
struct Args {
    /// Duty cycle range as "start-end:step" (e.g. "0.05-0.95:0.05")
    #[arg(short, long, default_value = "0.05-0.95:0.05")]
    range: String,

    /// Modulation frequency in Hz
    #[arg(short = 'f', long, default_value_t = 20e6)]
    modulation_frequency: f64,

    /// Number of time samples per modulation period
    #[arg(short = 'n', long, default_value_t = 3000)]
    samples: usize,

    /// Per-channel phase shifts in degrees, comma-separated
    #[arg(short, long, default_value = "0,90,180,270")]
    phase_shift: String,
}

fn parse_range(s: &str) -> Result<Vec<f64>> {
    let (span, step) = s
        .split_once(':')
        .context("Invalid range format. Use 'start-end:step'")?;
    let (start, end) = span
        .split_once('-')
        .context("Invalid range format. Use 'start-end:step'")?;
    let start: f64 = start.trim().parse().context("Invalid start value")?;
    let end: f64 = end.trim().parse().context("Invalid end value")?;
    let step: f64 = step.trim().parse().context("Invalid step value")?;
    if step <= 0.0 {
        anyhow::bail!("Step must be positive");
    }

    // Index-based stepping avoids accumulating float error past `end`
    let count = ((end - start) / step + 1e-9).floor();
    if count < 0.0 {
        return Ok(Vec::new());
    }
    Ok((0..=count as usize).map(|i| start + i as f64 * step).collect())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let duties = parse_range(&args.range)?;
    let shifts: Vec<f64> = args
        .phase_shift
        .split(',')
        .map(|p| p.trim().parse::<f64>().context("Invalid phase shift value"))
        .collect::<Result<_>>()?;

    println!("duty_cycle,peak_error_rad,peak_error_cm,dominant_harmonic");
    for duty in duties {
        let params = SimulationParams::new(args.modulation_frequency, args.samples, shifts.len())
            .with_phase_shift(shifts.clone())
            .with_phase_unit(AngleUnit::Degrees)
            .with_duty_cycle(duty);
        let config = SimulationConfig::new(&params).context("Invalid simulation configuration")?;

        let result = match simulate(&config) {
            Ok(result) => result,
            Err(ItofError::NumericDegeneracy { channel }) => {
                log::warn!("Duty cycle {:.3}: channel {} degenerate, skipped", duty, channel);
                continue;
            }
            Err(e) => return Err(e).context("Simulation failed"),
        };

        let peak = result.peak_cyclic_error();
        let peak_cm =
            LengthUnit::Centimeters.express_meters(phase_to_distance(peak, result.unambiguous_range()));
        let harmonic = dominant_harmonic(result.cyclic_error())?
            .map_or(String::new(), |h| h.to_string());
        println!("{:.3},{:.6},{:.4},{}", duty, peak, peak_cm, harmonic);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        let duties = parse_range("0.1-0.5:0.1").unwrap();
        assert_eq!(duties.len(), 5);
        assert!((duties[4] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_parse_range_invalid() {
        assert!(parse_range("0.1-0.5").is_err());
        assert!(parse_range("0.1:0.1").is_err());
        assert!(parse_range("0.1-0.5:0").is_err());
    }

    #[test]
    fn test_parse_range_empty_when_reversed() {
        assert!(parse_range("0.5-0.1:0.1").unwrap().is_empty());
    }
}
