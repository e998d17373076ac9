use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Scale the forecast narratives are rendered in.
///
/// `Celsius` converts temperatures, wind speeds and accumulations to metric.
/// `Fahrenheit` leaves the imperial text as published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TempScale {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TempScaleError {
    #[error("No temperature scale entered.")]
    Empty,
    #[error("Not a valid temperature scale.")]
    Invalid,
}

impl FromStr for TempScale {
    type Err = TempScaleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "" => Err(TempScaleError::Empty),
            "celsius" | "c" => Ok(TempScale::Celsius),
            "fahrenheit" | "f" => Ok(TempScale::Fahrenheit),
            _ => Err(TempScaleError::Invalid),
        }
    }
}

impl fmt::Display for TempScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempScale::Celsius => write!(f, "Celsius"),
            TempScale::Fahrenheit => write!(f, "Fahrenheit"),
        }
    }
}
