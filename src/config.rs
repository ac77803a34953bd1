//! Run configuration for the command-line front end
//!
//! Rates are entered as percentages here and converted to fractions when
//! entities are built. Range rules in this module belong to the front end;
//! the engine itself accepts any valid horizon.

use crate::error::ConfigError;
use crate::municipality::{default_name, Entity};
use crate::projection::{default_split_year, Method, RateSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

pub const DEFAULT_HORIZON_YEARS: u32 = 20;
pub const DEFAULT_INITIAL_POPULATION: f64 = 100_000.0;
pub const DEFAULT_RATE_PERCENT: f64 = 2.5;
pub const DEFAULT_RATE_EARLY_PERCENT: f64 = 3.0;
pub const DEFAULT_RATE_LATE_PERCENT: f64 = 1.5;

/// Horizon range offered to users
pub const HORIZON_RANGE: RangeInclusive<u32> = 5..=50;

/// Number of municipalities a single run may compare
pub const MUNICIPALITY_RANGE: RangeInclusive<usize> = 1..=5;

/// Methods selected when a municipality does not list any
pub fn default_methods() -> Vec<Method> {
    vec![Method::Arithmetic, Method::Geometric]
}

fn default_horizon() -> u32 { DEFAULT_HORIZON_YEARS }
fn default_population() -> f64 { DEFAULT_INITIAL_POPULATION }
fn default_rate() -> f64 { DEFAULT_RATE_PERCENT }
fn default_rate_early() -> f64 { DEFAULT_RATE_EARLY_PERCENT }
fn default_rate_late() -> f64 { DEFAULT_RATE_LATE_PERCENT }

/// Whole-run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Years projected after year 0
    #[serde(default = "default_horizon")]
    pub horizon_years: u32,

    /// Use early/late rates instead of a single rate
    #[serde(default)]
    pub segmented: bool,

    #[serde(default)]
    pub municipalities: Vec<MunicipalityConfig>,
}

/// Per-municipality settings as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MunicipalityConfig {
    /// Falls back to `Municipio_{i}` when absent
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_population")]
    pub initial_population: f64,

    /// Annual growth rate in percent (constant mode)
    #[serde(default = "default_rate")]
    pub rate_percent: f64,

    /// Rate in percent for the early years (segmented mode)
    #[serde(default = "default_rate_early")]
    pub rate_early_percent: f64,

    /// Rate in percent for the final years (segmented mode)
    #[serde(default = "default_rate_late")]
    pub rate_late_percent: f64,

    /// Last year of the early segment; defaults to half the horizon
    #[serde(default)]
    pub split_year: Option<u32>,

    #[serde(default = "default_methods")]
    pub methods: Vec<Method>,
}

impl Default for MunicipalityConfig {
    fn default() -> Self {
        Self {
            name: None,
            initial_population: DEFAULT_INITIAL_POPULATION,
            rate_percent: DEFAULT_RATE_PERCENT,
            rate_early_percent: DEFAULT_RATE_EARLY_PERCENT,
            rate_late_percent: DEFAULT_RATE_LATE_PERCENT,
            split_year: None,
            methods: default_methods(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            segmented: false,
            municipalities: vec![MunicipalityConfig::default(), MunicipalityConfig::default()],
        }
    }
}

/// Convert a percentage to a fraction
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

impl ScenarioConfig {
    /// Load from a JSON file
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Enforce the front-end input bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !HORIZON_RANGE.contains(&self.horizon_years) {
            return Err(ConfigError::OutOfRange(format!(
                "horizon must be between {} and {} years, got {}",
                HORIZON_RANGE.start(),
                HORIZON_RANGE.end(),
                self.horizon_years
            )));
        }
        if !MUNICIPALITY_RANGE.contains(&self.municipalities.len()) {
            return Err(ConfigError::OutOfRange(format!(
                "between {} and {} municipalities are supported, got {}",
                MUNICIPALITY_RANGE.start(),
                MUNICIPALITY_RANGE.end(),
                self.municipalities.len()
            )));
        }

        for (i, municipality) in self.municipalities.iter().enumerate() {
            let name = municipality.display_name(i + 1);
            if !municipality.initial_population.is_finite() || municipality.initial_population < 0.0 {
                return Err(ConfigError::OutOfRange(format!(
                    "{}: initial population must be non-negative",
                    name
                )));
            }
            if !self.segmented && municipality.rate_percent < 0.0 {
                return Err(ConfigError::OutOfRange(format!(
                    "{}: growth rate must be non-negative",
                    name
                )));
            }
            if self.segmented {
                if let Some(split) = municipality.split_year {
                    if split > self.horizon_years {
                        return Err(ConfigError::OutOfRange(format!(
                            "{}: split year {} is beyond the {}-year horizon",
                            name, split, self.horizon_years
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Build engine entities, converting percentages to fractions
    pub fn to_entities(&self) -> Vec<Entity> {
        self.municipalities
            .iter()
            .enumerate()
            .map(|(i, m)| m.to_entity(i + 1, self.horizon_years, self.segmented))
            .collect()
    }
}

impl MunicipalityConfig {
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => default_name(index),
        }
    }

    pub fn rate_spec(&self, horizon_years: u32, segmented: bool) -> RateSpec {
        if segmented {
            RateSpec::Segmented {
                rate_early: percent_to_fraction(self.rate_early_percent),
                rate_late: percent_to_fraction(self.rate_late_percent),
                split_year: self.split_year.unwrap_or_else(|| default_split_year(horizon_years)),
            }
        } else {
            RateSpec::constant(percent_to_fraction(self.rate_percent))
        }
    }

    pub fn to_entity(&self, index: usize, horizon_years: u32, segmented: bool) -> Entity {
        Entity::new(
            self.display_name(index),
            self.initial_population,
            self.rate_spec(horizon_years, segmented),
            self.methods.clone(),
        )
    }
}
