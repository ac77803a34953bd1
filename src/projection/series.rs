//! Projection output structures

use serde::{Deserialize, Serialize};

/// Population at one year of the horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: u32,
    /// Unrounded model value
    pub population: f64,
}

impl SeriesPoint {
    /// Population truncated toward zero, as shown in tables and exports
    pub fn population_int(&self) -> i64 {
        truncate_population(self.population)
    }
}

/// Magnitude at which a model value no longer fits the integer output (2^63)
pub const POPULATION_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Whether a model value converts to an integer population without clamping
pub fn is_representable(value: f64) -> bool {
    value.is_finite() && value.abs() < POPULATION_LIMIT
}

/// Truncate a model value toward zero
///
/// Values are expected to pass [`is_representable`]; the engine rejects any
/// series that does not.
pub fn truncate_population(value: f64) -> i64 {
    value.trunc() as i64
}

/// Population trajectory for one (entity, method) pair
///
/// Holds one point per year from 0 to the horizon, inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    points: Vec<SeriesPoint>,
}

impl ProjectionSeries {
    /// Wrap model values indexed by year
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(year, population)| SeriesPoint { year: year as u32, population })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last year of the series
    pub fn horizon_years(&self) -> u32 {
        self.points.last().map(|p| p.year).unwrap_or(0)
    }

    /// Unrounded values, for charting
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.population).collect()
    }

    /// Truncated values, for tables and export
    pub fn integer_values(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.population_int()).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> SeriesSummary {
        let initial = self.points.first().map(|p| p.population).unwrap_or(0.0);
        let final_population = self.points.last().map(|p| p.population).unwrap_or(0.0);
        let years = self.horizon_years();

        let average_annual_growth = if initial > 0.0 && final_population > 0.0 && years > 0 {
            Some((final_population / initial).powf(1.0 / years as f64) - 1.0)
        } else {
            None
        };

        SeriesSummary {
            horizon_years: years,
            initial_population: truncate_population(initial),
            final_population: truncate_population(final_population),
            absolute_growth: truncate_population(final_population - initial),
            average_annual_growth,
        }
    }
}

/// Summary statistics for a projection series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub horizon_years: u32,
    pub initial_population: i64,
    pub final_population: i64,
    pub absolute_growth: i64,
    /// Equivalent compound annual rate; None when the base is not positive
    pub average_annual_growth: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_truncation_toward_zero() {
        assert_eq!(truncate_population(134391.99), 134391);
        assert_eq!(truncate_population(-12.7), -12);
        assert_eq!(truncate_population(0.999), 0);
    }

    #[test]
    fn test_representable_range() {
        assert!(is_representable(1.0e18));
        assert!(is_representable(-1.0e18));
        assert!(!is_representable(POPULATION_LIMIT));
        assert!(!is_representable(1.267_650_600_228_229_4e36));
        assert!(!is_representable(f64::NAN));
        assert_eq!(POPULATION_LIMIT, 2.0_f64.powi(63));
    }

    #[test]
    fn test_years_follow_index() {
        let series = ProjectionSeries::from_values(vec![10.0, 11.5, 12.9]);

        let years: Vec<u32> = series.points().iter().map(|p| p.year).collect();
        assert_eq!(years, vec![0, 1, 2]);
        assert_eq!(series.horizon_years(), 2);
        assert_eq!(series.integer_values(), vec![10, 11, 12]);
    }

    #[test]
    fn test_summary() {
        let series = ProjectionSeries::from_values(vec![100.0, 110.0, 121.0]);
        let summary = series.summary();

        assert_eq!(summary.final_population, 121);
        assert_eq!(summary.absolute_growth, 21);
        assert_relative_eq!(summary.average_annual_growth.unwrap(), 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_summary_zero_base() {
        let series = ProjectionSeries::from_values(vec![0.0, 0.0]);
        assert!(series.summary().average_annual_growth.is_none());
    }
}
