use anyhow::{Context, Result};
use clap::Parser;
use itofsim::output::{OutputFormat, ReportUnits, create_formatter};
use itofsim::units::{AngleUnit, LengthUnit};
use itofsim::{SimulationConfig, SimulationParams, Simulator};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "itofsim")]
#[command(about = "Simulate iToF correlation waveforms and the resulting cyclic ranging error")]
struct Args {
    /// TOML simulation configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Modulation frequency in Hz
    #[arg(short = 'f', long)]
    modulation_frequency: Option<f64>,

    /// Number of time samples per modulation period
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Per-channel phase shifts in degrees, comma-separated (e.g. "0,90,180,270").
    /// Also sets the number of channels.
    #[arg(short, long)]
    phase_shift: Option<String>,

    /// Source duty cycle (0-1)
    #[arg(short, long)]
    duty_cycle: Option<f64>,

    /// Global source phase offset in degrees
    #[arg(long)]
    phase_offset: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Angle unit for reported phases
    #[arg(long, value_enum, default_value_t = AngleUnit::Degrees)]
    angle_unit: AngleUnit,

    /// Length unit for reported distances
    #[arg(long, value_enum, default_value_t = LengthUnit::Centimeters)]
    length_unit: LengthUnit,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate channels on worker threads
    #[arg(long)]
    parallel: bool,

    /// Include harmonics (text) or per-sample arrays (json)
    #[arg(short, long)]
    verbose: bool,
}

/// Parameters used when no configuration file is given
fn default_params() -> SimulationParams {
    SimulationParams::new(20e6, 3000, 4)
        .with_phase_shift(vec![0.0, 90.0, 120.0, 210.0])
        .with_phase_unit(AngleUnit::Degrees)
        .with_duty_cycle(0.5)
}

fn parse_phase_shifts(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|p| p.trim().parse::<f64>().context("Invalid phase shift value"))
        .collect()
}

fn load_params(path: &Path) -> Result<SimulationParams> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    SimulationParams::from_toml_str(&content).context("Failed to parse config file")
}

fn build_params(args: &Args) -> Result<SimulationParams> {
    let mut params = match args.config {
        Some(ref path) => load_params(path)?,
        None => default_params(),
    };

    if let Some(f) = args.modulation_frequency {
        params.modulation_frequency = f;
    }
    if let Some(n) = args.samples {
        params.num_time_samples = n;
    }
    if let Some(ref shifts) = args.phase_shift {
        let shifts = parse_phase_shifts(shifts)?;
        params.num_components = shifts.len();
        params = params
            .with_phase_shift(shifts)
            .with_phase_unit(AngleUnit::Degrees);
    }
    if let Some(duty) = args.duty_cycle {
        params.duty_cycle = duty;
    }
    if let Some(offset) = args.phase_offset {
        params.phase_offset = offset.to_radians();
    }

    Ok(params)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let params = build_params(&args)?;
    let config = SimulationConfig::new(&params).context("Invalid simulation configuration")?;

    let result = Simulator::new()
        .with_parallel_channels(args.parallel)
        .run(&config)
        .context("Simulation failed")?;

    let units = ReportUnits::new(args.angle_unit, args.length_unit);
    let report = create_formatter(args.format, units, args.verbose).format(&result);

    match args.output {
        Some(ref path) => {
            fs::write(path, report + "\n").context("Failed to write report")?;
            eprintln!("Report written to: {}", path.display());
        }
        None => println!("{}", report),
    }

    Ok(())
}
