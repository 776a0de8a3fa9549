//! Simulation configuration.
//!
//! [`SimulationParams`] is the raw form, as written in a TOML file or built
//! in code. [`SimulationConfig::new`] validates it once and produces the
//! immutable configuration the pipeline runs on.
//!
//! ```toml
//! modulation_frequency = 20e6
//! num_time_samples = 3000
//! num_components = 4
//! phase_shift = [0, 90, 180, 270]
//! phase_unit = "degrees"
//! duty_cycle = 0.5
//! ```

use std::f64::consts::PI;

use crate::constants::PHASE_SPACING_TOLERANCE;
use crate::error::{ItofError, Result};
use crate::units::{AngleUnit, unambiguous_range};

/// Unvalidated simulation parameters
///
/// # Example
/// ```
/// use itofsim::config::{SimulationConfig, SimulationParams};
/// use itofsim::units::AngleUnit;
///
/// let params = SimulationParams::new(20e6, 3000, 4)
///     .with_phase_shift(vec![0.0, 90.0, 180.0, 270.0])
///     .with_phase_unit(AngleUnit::Degrees)
///     .with_duty_cycle(0.5);
/// let config = SimulationConfig::new(&params).unwrap();
/// assert_eq!(config.num_components(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationParams {
    /// Modulation frequency in Hz
    pub modulation_frequency: f64,
    /// Number of time samples over one modulation period
    pub num_time_samples: usize,
    /// Number of phase-shifted measurement channels
    pub num_components: usize,
    /// Per-channel phase shift, in `phase_unit` (all zero when absent)
    #[serde(default)]
    pub phase_shift: Option<Vec<f64>>,
    /// Unit of `phase_shift`
    #[serde(default)]
    pub phase_unit: AngleUnit,
    /// Fraction of the period the source modulation is high
    #[serde(default)]
    pub duty_cycle: f64,
    /// Global source phase offset in radians
    #[serde(default)]
    pub phase_offset: f64,
}

impl SimulationParams {
    pub fn new(modulation_frequency: f64, num_time_samples: usize, num_components: usize) -> Self {
        Self {
            modulation_frequency,
            num_time_samples,
            num_components,
            phase_shift: None,
            phase_unit: AngleUnit::Radians,
            duty_cycle: 0.0,
            phase_offset: 0.0,
        }
    }

    pub fn with_phase_shift(mut self, phase_shift: Vec<f64>) -> Self {
        self.phase_shift = Some(phase_shift);
        self
    }

    pub fn with_phase_unit(mut self, unit: AngleUnit) -> Self {
        self.phase_unit = unit;
        self
    }

    pub fn with_duty_cycle(mut self, duty_cycle: f64) -> Self {
        self.duty_cycle = duty_cycle;
        self
    }

    pub fn with_phase_offset(mut self, phase_offset: f64) -> Self {
        self.phase_offset = phase_offset;
        self
    }

    /// Parse parameters from TOML text
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Validated, immutable simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    modulation_frequency: f64,
    num_time_samples: usize,
    num_components: usize,
    phase_shift: Vec<f64>,
    duty_cycle: f64,
    phase_offset: f64,
}

impl SimulationConfig {
    /// Validate `params`, failing with [`ItofError::InvalidConfiguration`]
    /// on the first violated rule.
    pub fn new(params: &SimulationParams) -> Result<Self> {
        let f = params.modulation_frequency;
        if !f.is_finite() || f <= 0.0 {
            return Err(invalid(format!(
                "modulation_frequency must be positive and finite, got {}",
                f
            )));
        }
        if params.num_time_samples < 1 {
            return Err(invalid("num_time_samples must be at least 1".to_string()));
        }
        if params.num_components < 1 {
            return Err(invalid("num_components must be at least 1".to_string()));
        }
        if !params.duty_cycle.is_finite() || !(0.0..=1.0).contains(&params.duty_cycle) {
            return Err(invalid(format!(
                "duty_cycle must lie in [0, 1], got {}",
                params.duty_cycle
            )));
        }
        if !params.phase_offset.is_finite() {
            return Err(invalid("phase_offset must be finite".to_string()));
        }

        let phase_shift = match &params.phase_shift {
            Some(shifts) => {
                if shifts.len() != params.num_components {
                    return Err(invalid(format!(
                        "phase_shift has {} entries but num_components is {}",
                        shifts.len(),
                        params.num_components
                    )));
                }
                if let Some(bad) = shifts.iter().position(|p| !p.is_finite()) {
                    return Err(invalid(format!("phase_shift[{}] is not finite", bad)));
                }
                shifts
                    .iter()
                    .map(|&p| params.phase_unit.to_radians(p))
                    .collect()
            }
            None => vec![0.0; params.num_components],
        };

        Ok(Self {
            modulation_frequency: f,
            num_time_samples: params.num_time_samples,
            num_components: params.num_components,
            phase_shift,
            duty_cycle: params.duty_cycle,
            phase_offset: params.phase_offset,
        })
    }

    pub fn modulation_frequency(&self) -> f64 {
        self.modulation_frequency
    }

    pub fn num_time_samples(&self) -> usize {
        self.num_time_samples
    }

    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Per-channel phase shifts in radians
    pub fn phase_shift(&self) -> &[f64] {
        &self.phase_shift
    }

    pub fn duty_cycle(&self) -> f64 {
        self.duty_cycle
    }

    /// Global source phase offset in radians
    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    /// Modulation period in seconds
    pub fn period(&self) -> f64 {
        1.0 / self.modulation_frequency
    }

    /// Unambiguous range in meters
    pub fn unambiguous_range(&self) -> f64 {
        unambiguous_range(self.modulation_frequency)
    }

    /// Whether the phase shifts, taken in channel order, step by exactly
    /// 2π/C modulo 2π.
    pub fn has_even_phase_spacing(&self) -> bool {
        let step = 2.0 * PI / self.num_components as f64;
        let first = self.phase_shift[0];
        self.phase_shift.iter().enumerate().all(|(c, &p)| {
            let offset = (p - first - step * c as f64).rem_euclid(2.0 * PI);
            offset < PHASE_SPACING_TOLERANCE || 2.0 * PI - offset < PHASE_SPACING_TOLERANCE
        })
    }
}

impl TryFrom<SimulationParams> for SimulationConfig {
    type Error = ItofError;

    fn try_from(params: SimulationParams) -> Result<Self> {
        Self::new(&params)
    }
}

impl TryFrom<&SimulationParams> for SimulationConfig {
    type Error = ItofError;

    fn try_from(params: &SimulationParams) -> Result<Self> {
        Self::new(params)
    }
}

fn invalid(reason: String) -> ItofError {
    ItofError::InvalidConfiguration(reason)
}
