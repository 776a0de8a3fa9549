mod csv;
mod json;
mod text;

use chrono::Utc;

use crate::result::SimulationResult;
use crate::units::{AngleUnit, LengthUnit};

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

/// Highest harmonic order listed in reports
pub const REPORT_MAX_HARMONIC: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

/// Units used when rendering phases and distances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportUnits {
    pub angle: AngleUnit,
    pub length: LengthUnit,
}

impl ReportUnits {
    pub fn new(angle: AngleUnit, length: LengthUnit) -> Self {
        Self { angle, length }
    }

    pub fn angle(&self, radians: f64) -> f64 {
        self.angle.express_radians(radians)
    }

    pub fn length(&self, meters: f64) -> f64 {
        self.length.express_meters(meters)
    }
}

pub trait Formatter: Send {
    fn format(&self, result: &SimulationResult) -> String;
}

pub fn create_formatter(
    format: OutputFormat,
    units: ReportUnits,
    verbose: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(units, verbose)),
        OutputFormat::Csv => Box::new(CsvFormatter::new(units)),
        OutputFormat::Json => Box::new(JsonFormatter::new(units, verbose)),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
