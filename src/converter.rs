//! Text-level normalization and imperial to metric conversion of forecast
//! narratives.
//!
//! Every narrative is normalized first (whitespace runs collapsed, trailing
//! whitespace dropped, "10am" / "10 pm." rewritten as "10 a.m." / "10 p.m.").
//! For Celsius output the converter then rewrites number words as numerals,
//! classifies every number by the text around it, and substitutes
//! temperatures, wind speeds and accumulations in place. Numbers it cannot
//! classify are left exactly as they were.

pub mod measurement;
pub mod number_words;
pub mod rules;

pub use measurement::{MeasurementKind, MeasurementMatch};
pub use rules::{ConversionRules, RuleVocabulary};

use crate::temp_scale::TempScale;

#[derive(Debug, Clone, Default)]
pub struct UnitConverter {
    rules: ConversionRules,
}

impl UnitConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: ConversionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ConversionRules {
        &self.rules
    }

    /// Normalize whitespace and time notation only.
    pub fn format(&self, forecasts: Vec<String>) -> Vec<String> {
        forecasts.iter().map(|f| self.format_text(f)).collect()
    }

    /// Normalize, then convert temperatures, wind speeds and accumulations
    /// to metric.
    pub fn convert(&self, forecasts: Vec<String>) -> Vec<String> {
        forecasts.iter().map(|f| self.convert_text(f)).collect()
    }

    pub fn apply(&self, forecasts: Vec<String>, scale: TempScale) -> Vec<String> {
        match scale {
            TempScale::Celsius => self.convert(forecasts),
            TempScale::Fahrenheit => self.format(forecasts),
        }
    }

    pub fn format_text(&self, text: &str) -> String {
        let collapsed = self.rules.whitespace_run.replace_all(text, "${1}");
        let spaced = self
            .rules
            .am_pm_boundary
            .replace_all(collapsed.trim_end(), "${1} ${2}");
        self.rules
            .am_pm_format
            .replace_all(&spaced, "${1}.m.")
            .into_owned()
    }

    pub fn convert_text(&self, text: &str) -> String {
        let formatted = self.format_text(text);
        let numerals = number_words::to_numerals(&formatted, &self.rules);
        let matches = measurement::classify(&numerals, &self.rules);
        let converted = measurement::substitute(&numerals.text, &matches);
        number_words::to_words(&converted, &self.rules)
    }
}
