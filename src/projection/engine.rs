//! Core projection engine for annual population projections

use super::method::Method;
use super::rates::{RateSchedule, RateSpec};
use super::series::{is_representable, ProjectionSeries};
use crate::error::ProjectionError;
use serde::{Deserialize, Serialize};

/// Inputs for a single projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Population at year 0
    pub initial_population: f64,

    /// Number of years projected after year 0
    pub horizon_years: u32,

    /// Growth model
    pub method: Method,

    /// Growth rate, constant or segmented
    pub rate: RateSpec,
}

impl ProjectionInput {
    pub fn new(initial_population: f64, horizon_years: u32, method: Method, rate: RateSpec) -> Self {
        Self { initial_population, horizon_years, method, rate }
    }

    /// Check every engine constraint before computing anything
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !self.initial_population.is_finite() || self.initial_population < 0.0 {
            return Err(ProjectionError::invalid(format!(
                "initial population must be a non-negative number, got {}",
                self.initial_population
            )));
        }
        if self.horizon_years < 1 {
            return Err(ProjectionError::invalid("horizon must be at least one year"));
        }
        self.rate.validate(self.horizon_years)?;

        if self.initial_population == 0.0 && self.method.needs_positive_base() {
            return Err(ProjectionError::invalid(format!(
                "{} projection is undefined for a zero initial population",
                self.method
            )));
        }
        Ok(())
    }
}

/// Project a population trajectory
///
/// Returns one point per year in `0..=horizon_years`. Fails without producing
/// any points when the input is invalid or the model overflows.
pub fn project(input: &ProjectionInput) -> Result<ProjectionSeries, ProjectionError> {
    input.validate()?;

    let p0 = input.initial_population;
    let n = input.horizon_years;

    let values = match input.rate {
        RateSpec::Constant { rate } => constant_rate(input.method, p0, n, rate),
        RateSpec::Segmented { .. } => {
            let schedule = RateSchedule::build(&input.rate, n);
            segmented_rate(input.method, p0, n, &schedule)
        }
    };

    if let Some(year) = values.iter().position(|&v| !is_representable(v)) {
        return Err(ProjectionError::invalid(format!(
            "{} projection exceeds the representable population at year {}",
            input.method, year
        )));
    }

    log::debug!(
        "projected {} from {} over {} years (segmented: {})",
        input.method,
        p0,
        n,
        input.rate.is_segmented()
    );

    Ok(ProjectionSeries::from_values(values))
}

fn constant_rate(method: Method, p0: f64, n: u32, rate: f64) -> Vec<f64> {
    match method {
        Method::Arithmetic => {
            let increment = p0 * rate;
            years(n).map(|t| p0 + increment * t).collect()
        }
        Method::Geometric => years(n).map(|t| p0 * (1.0 + rate).powf(t)).collect(),
        Method::Exponential => years(n).map(|t| p0 * (rate * t).exp()).collect(),
        Method::Wappaus => {
            let pn = wappaus_endpoint(p0, rate, n);
            wappaus(p0, pn, n)
        }
    }
}

fn segmented_rate(method: Method, p0: f64, n: u32, schedule: &RateSchedule) -> Vec<f64> {
    match method {
        Method::Arithmetic => schedule
            .cumulative()
            .into_iter()
            .map(|sum| p0 + p0 * sum)
            .collect(),
        Method::Geometric => {
            let mut values = Vec::with_capacity(schedule.len());
            values.push(p0);
            for t in 1..schedule.len() {
                let prior = values[t - 1];
                values.push(prior * (1.0 + schedule.rate_at(t)));
            }
            values
        }
        Method::Exponential => schedule
            .cumulative()
            .into_iter()
            .map(|sum| p0 * sum.exp())
            .collect(),
        Method::Wappaus => {
            let pn = wappaus_endpoint(p0, schedule.mean(), n);
            wappaus(p0, pn, n)
        }
    }
}

/// Terminal population used by the Wappaus model: geometric growth over the full horizon
pub fn wappaus_endpoint(p0: f64, rate: f64, horizon_years: u32) -> f64 {
    p0 * (1.0 + rate).powf(horizon_years as f64)
}

/// P(t) = P0 + ((Pn-P0)/n) t + ((Pn-P0)/(2 n^2)) t^2
fn wappaus(p0: f64, pn: f64, n: u32) -> Vec<f64> {
    let span = n as f64;
    let linear = (pn - p0) / span;
    let quadratic = (pn - p0) / (2.0 * span * span);
    years(n).map(|t| p0 + linear * t + quadratic * t * t).collect()
}

fn years(n: u32) -> impl Iterator<Item = f64> {
    (0..=n).map(|t| t as f64)
}
