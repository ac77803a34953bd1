//! Municipality data structures

use crate::projection::{Method, ProjectionInput, RateSpec};
use serde::{Deserialize, Serialize};

/// A named municipality carrying its own projection inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,

    /// Population at year 0
    pub initial_population: f64,

    /// Growth rate as a fraction
    pub rate: RateSpec,

    /// Selected methods, in display order
    pub methods: Vec<Method>,
}

impl Entity {
    pub fn new(name: impl Into<String>, initial_population: f64, rate: RateSpec, methods: Vec<Method>) -> Self {
        Self {
            name: name.into(),
            initial_population,
            rate,
            methods,
        }
    }

    /// Engine input for one of this municipality's methods
    pub fn input_for(&self, method: Method, horizon_years: u32) -> ProjectionInput {
        ProjectionInput::new(self.initial_population, horizon_years, method, self.rate)
    }

    pub fn has_methods(&self) -> bool {
        !self.methods.is_empty()
    }
}

/// Default name for the i-th municipality (1-indexed)
pub fn default_name(index: usize) -> String {
    format!("Municipio_{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_for_copies_entity_values() {
        let entity = Entity::new(
            "Villa Nueva",
            25_000.0,
            RateSpec::constant(0.018),
            vec![Method::Geometric],
        );
        let input = entity.input_for(Method::Wappaus, 15);

        assert_eq!(input.initial_population, 25_000.0);
        assert_eq!(input.horizon_years, 15);
        assert_eq!(input.method, Method::Wappaus);
        assert_eq!(input.rate, RateSpec::constant(0.018));
    }

    #[test]
    fn test_default_name() {
        assert_eq!(default_name(3), "Municipio_3");
    }
}
