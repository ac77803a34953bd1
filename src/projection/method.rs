//! Growth models available to the projection engine

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classical demographic growth model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Linear growth: constant absolute increment per year
    #[serde(rename = "Aritmético", alias = "Aritmetico", alias = "Arithmetic")]
    Arithmetic,
    /// Discrete compounding
    #[serde(rename = "Geométrico", alias = "Geometrico", alias = "Geometric")]
    Geometric,
    /// Continuous compounding
    #[serde(rename = "Exponencial", alias = "Exponential")]
    Exponential,
    /// Quadratic interpolation towards a geometric endpoint
    #[serde(rename = "Wappaus")]
    Wappaus,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::Arithmetic,
        Method::Geometric,
        Method::Exponential,
        Method::Wappaus,
    ];

    /// Display label used in tables, chart legends and the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            Method::Arithmetic => "Aritmético",
            Method::Geometric => "Geométrico",
            Method::Exponential => "Exponencial",
            Method::Wappaus => "Wappaus",
        }
    }

    /// Whether the model derives growth from ratios of the initial population
    pub fn needs_positive_base(&self) -> bool {
        !matches!(self, Method::Arithmetic)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aritmético" | "aritmetico" | "arithmetic" => Ok(Method::Arithmetic),
            "geométrico" | "geometrico" | "geometric" => Ok(Method::Geometric),
            "exponencial" | "exponential" => Ok(Method::Exponential),
            "wappaus" => Ok(Method::Wappaus),
            _ => Err(ConfigError::UnknownMethod(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("Aritmético".parse::<Method>().unwrap(), Method::Arithmetic);
        assert_eq!("geometrico".parse::<Method>().unwrap(), Method::Geometric);
        assert_eq!(" Exponential ".parse::<Method>().unwrap(), Method::Exponential);
        assert_eq!("WAPPAUS".parse::<Method>().unwrap(), Method::Wappaus);
        assert!("logistic".parse::<Method>().is_err());
    }

    #[test]
    fn test_label_round_trip() {
        for method in Method::ALL {
            assert_eq!(method.label().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn test_serde_uses_spanish_labels() {
        let json = serde_json::to_string(&Method::Geometric).unwrap();
        assert_eq!(json, "\"Geométrico\"");

        let parsed: Vec<Method> = serde_json::from_str(r#"["Aritmetico", "Exponential"]"#).unwrap();
        assert_eq!(parsed, vec![Method::Arithmetic, Method::Exponential]);
    }
}
