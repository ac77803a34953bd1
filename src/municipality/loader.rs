//! Load municipality settings from CSV
//!
//! Expected columns: `Municipio,PoblacionInicial,Tasa,TasaInicial,TasaFinal,AnioCorte,Metodos`.
//! Rates are percentages; methods are separated by `;`. Every column except
//! `Municipio` may be left empty to use the defaults, the same ones the JSON
//! scenario applies. An empty `AnioCorte` splits at half the horizon.

use crate::config::{default_methods, MunicipalityConfig, DEFAULT_INITIAL_POPULATION,
    DEFAULT_RATE_EARLY_PERCENT, DEFAULT_RATE_LATE_PERCENT, DEFAULT_RATE_PERCENT};
use crate::error::ConfigError;
use crate::projection::Method;
use csv::Reader;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Municipio")]
    name: String,
    #[serde(rename = "PoblacionInicial", default)]
    initial_population: Option<f64>,
    #[serde(rename = "Tasa", default)]
    rate: Option<f64>,
    #[serde(rename = "TasaInicial", default)]
    rate_early: Option<f64>,
    #[serde(rename = "TasaFinal", default)]
    rate_late: Option<f64>,
    #[serde(rename = "AnioCorte", default)]
    split_year: Option<u32>,
    #[serde(rename = "Metodos", default)]
    methods: Option<String>,
}

impl CsvRow {
    fn into_config(self) -> Result<MunicipalityConfig, ConfigError> {
        let methods = match self.methods.as_deref().map(parse_methods).transpose()? {
            Some(methods) if !methods.is_empty() => methods,
            _ => default_methods(),
        };

        Ok(MunicipalityConfig {
            name: Some(self.name),
            initial_population: self.initial_population.unwrap_or(DEFAULT_INITIAL_POPULATION),
            rate_percent: self.rate.unwrap_or(DEFAULT_RATE_PERCENT),
            rate_early_percent: self.rate_early.unwrap_or(DEFAULT_RATE_EARLY_PERCENT),
            rate_late_percent: self.rate_late.unwrap_or(DEFAULT_RATE_LATE_PERCENT),
            split_year: self.split_year,
            methods,
        })
    }
}

/// Parse a `;`-separated method list; blank entries are skipped
pub fn parse_methods(list: &str) -> Result<Vec<Method>, ConfigError> {
    list.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Load all municipalities from a CSV file
pub fn load_municipalities<P: AsRef<Path>>(path: P) -> Result<Vec<MunicipalityConfig>, ConfigError> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load municipalities from any reader (e.g., string buffer)
pub fn load_municipalities_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<MunicipalityConfig>, ConfigError> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<MunicipalityConfig>, ConfigError> {
    let mut municipalities = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        municipalities.push(row.into_config()?);
    }

    log::info!("loaded {} municipalities", municipalities.len());
    Ok(municipalities)
}
