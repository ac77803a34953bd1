//! Tabular views of projection results

use crate::projection::Method;
use crate::scenario::LabeledSeries;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One row of the consolidated table
///
/// Field names match the export header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "Municipio")]
    pub entity_name: String,
    #[serde(rename = "Método")]
    pub method: Method,
    #[serde(rename = "Año")]
    pub year: u32,
    #[serde(rename = "Población proyectada")]
    pub population: i64,
}

/// Flattened union of all series: entity, then method, then year
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn from_series(series: &[LabeledSeries]) -> Self {
        let rows = series
            .iter()
            .flat_map(|labeled| {
                labeled.series.points().iter().map(move |point| ResultRow {
                    entity_name: labeled.entity_name.clone(),
                    method: labeled.method,
                    year: point.year,
                    population: point.population_int(),
                })
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to one municipality
    pub fn for_entity<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ResultRow> + 'a {
        self.rows.iter().filter(move |row| row.entity_name == name)
    }
}

/// Per-municipality table: one row per year, one column per method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTable {
    pub entity_name: String,
    pub methods: Vec<Method>,
    years: Vec<u32>,
    columns: Vec<Vec<i64>>,
}

impl EntityTable {
    pub fn new(first: &LabeledSeries) -> Self {
        let mut table = Self {
            entity_name: first.entity_name.clone(),
            methods: Vec::new(),
            years: first.series.points().iter().map(|p| p.year).collect(),
            columns: Vec::new(),
        };
        table.add_column(first);
        table
    }

    /// Append a method column; series share the horizon of the first column
    pub fn add_column(&mut self, labeled: &LabeledSeries) {
        self.methods.push(labeled.method);
        self.columns.push(labeled.series.integer_values());
    }

    pub fn years(&self) -> &[u32] {
        &self.years
    }

    pub fn column(&self, method: Method) -> Option<&[i64]> {
        self.methods
            .iter()
            .position(|&m| m == method)
            .map(|i| self.columns[i].as_slice())
    }

    /// Population values for one year, in method order
    pub fn row(&self, index: usize) -> Option<Vec<i64>> {
        self.columns.iter().map(|col| col.get(index).copied()).collect()
    }

    /// Render as aligned plain text
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "{:>5}", "Año");
        for method in &self.methods {
            let _ = write!(out, " {:>14}", method.label());
        }
        out.push('\n');

        for (i, year) in self.years.iter().enumerate() {
            let _ = write!(out, "{:>5}", year);
            for value in self.row(i).unwrap_or_default() {
                let _ = write!(out, " {:>14}", value);
            }
            out.push('\n');
        }
        out
    }
}
