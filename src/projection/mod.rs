//! Projection engine for single-municipality population projections

mod method;
mod rates;
mod series;
mod engine;

pub use method::Method;
pub use rates::{RateSpec, RateSchedule, default_split_year};
pub use series::{ProjectionSeries, SeriesPoint, SeriesSummary, truncate_population};
pub use engine::{ProjectionInput, project, wappaus_endpoint};
