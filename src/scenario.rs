//! Scenario runner for multi-municipality projections
//!
//! Projects every selected method of every municipality and keeps the
//! results in entity order, then method order, then year order.

use crate::error::ProjectionError;
use crate::municipality::Entity;
use crate::projection::{project, Method, ProjectionSeries};
use crate::report::{EntityTable, ResultTable};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One projected series tagged with its municipality and method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    /// Position of the municipality in the run input
    pub entity_index: usize,
    pub entity_name: String,
    pub method: Method,
    pub series: ProjectionSeries,
}

impl LabeledSeries {
    /// Chart legend label
    pub fn label(&self) -> String {
        format!("{} - {}", self.entity_name, self.method)
    }
}

/// Output of a multi-municipality run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRun {
    pub horizon_years: u32,

    /// Series in entity, then method order
    pub series: Vec<LabeledSeries>,

    /// Non-fatal configuration notices, e.g. municipalities without methods
    pub notices: Vec<ProjectionError>,
}

impl ProjectionRun {
    /// Flatten every series into result rows
    pub fn table(&self) -> ResultTable {
        ResultTable::from_series(&self.series)
    }

    /// One wide table per municipality, in entity order
    ///
    /// Municipalities are told apart by input position, so two entries
    /// sharing a name still get separate tables.
    pub fn entity_tables(&self) -> Vec<EntityTable> {
        self.by_entity()
            .into_iter()
            .map(|group| {
                let mut table = EntityTable::new(group[0]);
                for labeled in &group[1..] {
                    table.add_column(labeled);
                }
                table
            })
            .collect()
    }

    /// Names of municipalities that produced at least one series, one per entity
    pub fn entity_names(&self) -> Vec<&str> {
        self.by_entity()
            .into_iter()
            .map(|group| group[0].entity_name.as_str())
            .collect()
    }

    fn by_entity(&self) -> Vec<Vec<&LabeledSeries>> {
        let mut groups: Vec<Vec<&LabeledSeries>> = Vec::new();
        for labeled in &self.series {
            match groups.last_mut() {
                Some(group) if group[0].entity_index == labeled.entity_index => group.push(labeled),
                _ => groups.push(vec![labeled]),
            }
        }
        groups
    }
}

/// Runs projections for a set of municipalities over a shared horizon
#[derive(Debug, Clone, Copy)]
pub struct ScenarioRunner {
    horizon_years: u32,
}

impl ScenarioRunner {
    pub fn new(horizon_years: u32) -> Self {
        Self { horizon_years }
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    /// Project every (entity, method) pair sequentially
    ///
    /// Stops at the first engine error. Entities without methods add a
    /// notice and no series.
    pub fn run(&self, entities: &[Entity]) -> Result<ProjectionRun, ProjectionError> {
        let outcomes = entities
            .iter()
            .enumerate()
            .map(|(index, entity)| self.run_entity(index, entity))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.collect(outcomes))
    }

    /// Same as [`run`](Self::run) but projects entities on the rayon pool
    ///
    /// Output order matches the sequential run.
    pub fn run_parallel(&self, entities: &[Entity]) -> Result<ProjectionRun, ProjectionError> {
        let outcomes = entities
            .par_iter()
            .enumerate()
            .map(|(index, entity)| self.run_entity(index, entity))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.collect(outcomes))
    }

    fn run_entity(&self, index: usize, entity: &Entity) -> Result<EntityOutcome, ProjectionError> {
        if !entity.has_methods() {
            log::warn!("municipality '{}' has no methods selected; skipping", entity.name);
            return Ok(EntityOutcome::Notice(ProjectionError::NoMethodsSelected {
                entity: entity.name.clone(),
            }));
        }

        let series = entity
            .methods
            .iter()
            .map(|&method| {
                let series = project(&entity.input_for(method, self.horizon_years))?;
                Ok(LabeledSeries {
                    entity_index: index,
                    entity_name: entity.name.clone(),
                    method,
                    series,
                })
            })
            .collect::<Result<Vec<_>, ProjectionError>>()?;

        Ok(EntityOutcome::Series(series))
    }

    fn collect(&self, outcomes: Vec<EntityOutcome>) -> ProjectionRun {
        let mut run = ProjectionRun {
            horizon_years: self.horizon_years,
            series: Vec::new(),
            notices: Vec::new(),
        };

        for outcome in outcomes {
            match outcome {
                EntityOutcome::Series(series) => run.series.extend(series),
                EntityOutcome::Notice(notice) => run.notices.push(notice),
            }
        }

        log::info!(
            "projected {} series over {} years ({} notices)",
            run.series.len(),
            self.horizon_years,
            run.notices.len()
        );
        run
    }
}

enum EntityOutcome {
    Series(Vec<LabeledSeries>),
    Notice(ProjectionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::RateSpec;

    fn entities() -> Vec<Entity> {
        vec![
            Entity::new("Norte", 100_000.0, RateSpec::constant(0.03), vec![Method::Wappaus, Method::Arithmetic]),
            Entity::new("Vacio", 5_000.0, RateSpec::constant(0.01), vec![]),
            Entity::new("Sur", 40_000.0, RateSpec::segmented(0.04, 0.01, 10), vec![Method::Geometric]),
        ]
    }

    #[test]
    fn test_run_orders_entity_method_year() {
        let run = ScenarioRunner::new(10).run(&entities()).unwrap();

        let labels: Vec<String> = run.series.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Norte - Wappaus", "Norte - Aritmético", "Sur - Geométrico"]);

        let table = run.table();
        assert_eq!(table.len(), 3 * 11);
        let first = &table.rows()[0];
        assert_eq!((first.entity_name.as_str(), first.method, first.year), ("Norte", Method::Wappaus, 0));
        let twelfth = &table.rows()[11];
        assert_eq!((twelfth.entity_name.as_str(), twelfth.method, twelfth.year), ("Norte", Method::Arithmetic, 0));
        let last = table.rows().last().unwrap();
        assert_eq!((last.entity_name.as_str(), last.method, last.year), ("Sur", Method::Geometric, 10));
    }

    #[test]
    fn test_entity_without_methods_is_notice() {
        let run = ScenarioRunner::new(10).run(&entities()).unwrap();

        assert_eq!(run.notices, vec![ProjectionError::NoMethodsSelected { entity: "Vacio".to_string() }]);
        assert!(run.notices[0].is_notice());
        assert_eq!(run.entity_names(), vec!["Norte", "Sur"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut many = Vec::new();
        for i in 0..40 {
            let methods = Method::ALL.iter().copied().take(i % 4 + 1).collect();
            many.push(Entity::new(
                format!("M{}", i),
                10_000.0 + i as f64 * 1_000.0,
                RateSpec::segmented(0.02 + i as f64 * 0.001, 0.01, 30),
                methods,
            ));
        }

        let runner = ScenarioRunner::new(30);
        let sequential = runner.run(&many).unwrap();
        let parallel = runner.run_parallel(&many).unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(sequential.table(), parallel.table());
    }

    #[test]
    fn test_same_name_entities_stay_separate() {
        let twins = vec![
            Entity::new("A", 1_000.0, RateSpec::constant(0.02), vec![Method::Geometric]),
            Entity::new("A", 2_000.0, RateSpec::constant(0.01), vec![Method::Geometric]),
        ];
        let run = ScenarioRunner::new(5).run(&twins).unwrap();

        let tables = run.entity_tables();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].methods, vec![Method::Geometric]);
        assert_eq!(tables[1].methods, vec![Method::Geometric]);
        assert_eq!(tables[0].column(Method::Geometric).unwrap()[0], 1_000);
        assert_eq!(tables[1].column(Method::Geometric).unwrap()[0], 2_000);
        assert_eq!(run.entity_names(), vec!["A", "A"]);

        let indexes: Vec<usize> = run.series.iter().map(|s| s.entity_index).collect();
        assert_eq!(indexes, vec![0, 1]);
        assert_eq!(run, ScenarioRunner::new(5).run_parallel(&twins).unwrap());
    }

    #[test]
    fn test_engine_error_propagates() {
        let bad = vec![
            Entity::new("Ok", 1_000.0, RateSpec::constant(0.02), vec![Method::Geometric]),
            Entity::new("Cero", 0.0, RateSpec::constant(0.02), vec![Method::Exponential]),
        ];

        let err = ScenarioRunner::new(10).run(&bad).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput(_)));
        assert!(ScenarioRunner::new(10).run_parallel(&bad).is_err());
    }

    #[test]
    fn test_empty_run() {
        let run = ScenarioRunner::new(10).run(&[]).unwrap();
        assert!(run.series.is_empty());
        assert!(run.table().is_empty());
        assert!(run.entity_tables().is_empty());
    }

    #[test]
    fn test_entity_tables_group_by_entity() {
        let run = ScenarioRunner::new(10).run(&entities()).unwrap();
        let tables = run.entity_tables();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].entity_name, "Norte");
        assert_eq!(tables[0].methods, vec![Method::Wappaus, Method::Arithmetic]);
        assert_eq!(tables[1].methods, vec![Method::Geometric]);
    }
}
