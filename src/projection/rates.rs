//! Growth-rate specifications and the per-year rate schedule

use crate::error::ProjectionError;
use serde::{Deserialize, Serialize};

/// Growth rate applied over the projection horizon
///
/// Rates are fractions (0.03 for 3%). Percentage inputs are converted
/// before they reach this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RateSpec {
    /// Single rate for the whole horizon
    Constant { rate: f64 },
    /// Early rate up to and including `split_year`, late rate afterwards
    Segmented {
        rate_early: f64,
        rate_late: f64,
        split_year: u32,
    },
}

impl RateSpec {
    pub fn constant(rate: f64) -> Self {
        RateSpec::Constant { rate }
    }

    /// Segmented rates split at the midpoint of the horizon (floor)
    pub fn segmented(rate_early: f64, rate_late: f64, horizon_years: u32) -> Self {
        RateSpec::Segmented {
            rate_early,
            rate_late,
            split_year: default_split_year(horizon_years),
        }
    }

    pub fn is_segmented(&self) -> bool {
        matches!(self, RateSpec::Segmented { .. })
    }

    /// Check the rate values against a horizon
    pub fn validate(&self, horizon_years: u32) -> Result<(), ProjectionError> {
        match *self {
            RateSpec::Constant { rate } => {
                if !rate.is_finite() {
                    return Err(ProjectionError::invalid(format!("rate must be finite, got {}", rate)));
                }
            }
            RateSpec::Segmented { rate_early, rate_late, split_year } => {
                if !rate_early.is_finite() || !rate_late.is_finite() {
                    return Err(ProjectionError::invalid(format!(
                        "segment rates must be finite, got {} and {}",
                        rate_early, rate_late
                    )));
                }
                if split_year > horizon_years {
                    return Err(ProjectionError::invalid(format!(
                        "split year {} outside [0, {}]",
                        split_year, horizon_years
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Split year used when the caller does not choose one
pub fn default_split_year(horizon_years: u32) -> u32 {
    horizon_years / 2
}

/// Rate in effect for each year of the horizon
///
/// Index `t` holds the rate that moves the population from year `t-1`
/// to year `t`. Index 0 is a placeholder and never compounds.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSchedule {
    rates: Vec<f64>,
}

impl RateSchedule {
    /// Build the schedule for a validated spec
    pub fn build(spec: &RateSpec, horizon_years: u32) -> Self {
        let len = horizon_years as usize + 1;
        let rates = match *spec {
            RateSpec::Constant { rate } => vec![rate; len],
            RateSpec::Segmented { rate_early, rate_late, split_year } => {
                let early_len = split_year as usize + 1;
                let mut rates = vec![rate_early; early_len.min(len)];
                rates.resize(len, rate_late);
                rates
            }
        };
        Self { rates }
    }

    /// Number of entries (`horizon_years + 1`)
    pub(crate) fn len(&self) -> usize {
        self.rates.len()
    }

    /// Rate applied when stepping into year `t`
    pub fn rate_at(&self, t: usize) -> f64 {
        self.rates[t]
    }

    /// Mean over every entry, placeholder included
    pub fn mean(&self) -> f64 {
        if self.rates.is_empty() {
            return 0.0;
        }
        self.rates.iter().sum::<f64>() / self.rates.len() as f64
    }

    /// Running sum of the rates applied up to each year; 0.0 at year 0
    pub fn cumulative(&self) -> Vec<f64> {
        let mut total = 0.0;
        let mut sums = Vec::with_capacity(self.rates.len());
        sums.push(0.0);
        for &rate in self.rates.iter().skip(1) {
            total += rate;
            sums.push(total);
        }
        sums
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_split_is_floor_half() {
        assert_eq!(default_split_year(20), 10);
        assert_eq!(default_split_year(7), 3);
        assert_eq!(default_split_year(1), 0);
    }

    #[test]
    fn test_segmented_schedule_layout() {
        let spec = RateSpec::Segmented { rate_early: 0.05, rate_late: 0.02, split_year: 2 };
        let schedule = RateSchedule::build(&spec, 4);

        assert_eq!(schedule.as_slice(), &[0.05, 0.05, 0.05, 0.02, 0.02]);
        assert_eq!(schedule.len(), 5);
    }

    #[test]
    fn test_split_at_bounds() {
        let all_early = RateSpec::Segmented { rate_early: 0.01, rate_late: 0.09, split_year: 3 };
        assert_eq!(RateSchedule::build(&all_early, 3).as_slice(), &[0.01; 4]);

        let split_zero = RateSpec::Segmented { rate_early: 0.01, rate_late: 0.09, split_year: 0 };
        assert_eq!(RateSchedule::build(&split_zero, 3).as_slice(), &[0.01, 0.09, 0.09, 0.09]);
    }

    #[test]
    fn test_cumulative_skips_placeholder() {
        let spec = RateSpec::Segmented { rate_early: 0.05, rate_late: 0.02, split_year: 2 };
        let sums = RateSchedule::build(&spec, 4).cumulative();

        assert_eq!(sums.len(), 5);
        assert_eq!(sums[0], 0.0);
        assert_relative_eq!(sums[2], 0.10, epsilon = 1e-12);
        assert_relative_eq!(sums[4], 0.14, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_includes_every_entry() {
        let spec = RateSpec::Segmented { rate_early: 0.03, rate_late: 0.015, split_year: 10 };
        let schedule = RateSchedule::build(&spec, 20);

        // 11 early entries and 10 late entries
        let expected = (11.0 * 0.03 + 10.0 * 0.015) / 21.0;
        assert_relative_eq!(schedule.mean(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_split() {
        let spec = RateSpec::Segmented { rate_early: 0.03, rate_late: 0.01, split_year: 11 };
        assert!(spec.validate(10).is_err());
        assert!(spec.validate(11).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_finite_rate() {
        assert!(RateSpec::constant(f64::NAN).validate(10).is_err());
        assert!(RateSpec::constant(f64::INFINITY).validate(10).is_err());
        assert!(RateSpec::constant(-0.02).validate(10).is_ok());
    }
}
