use std::ops::Range;

use super::number_words::NumeralText;
use super::rules::ConversionRules;

const KM_PER_MILE: f64 = 1.60934;
const CM_PER_INCH: f64 = 2.54;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementKind {
    Temperature,
    WindSpeed,
    Accumulation,
    /// "mph" with no convertible number next to it
    SpeedUnit,
    /// A number word that turned out not to be a measurement
    SpelledNumber,
}

/// A located span of narrative text and what it should become.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementMatch {
    pub kind: MeasurementKind,
    pub span: Range<usize>,
    pub replacement: String,
}

pub fn fahrenheit_to_celsius(fahrenheit: i64) -> i64 {
    ((fahrenheit - 32) as f64 * 5.0 / 9.0).round() as i64
}

pub fn mph_to_kmh(mph: f64) -> i64 {
    (mph * KM_PER_MILE).round() as i64
}

pub fn inches_to_cm(inches: f64) -> i64 {
    (inches * CM_PER_INCH).round() as i64
}

/// Find every measurement in the text, most specific context first:
/// accumulation and wind claim their number (and range partner) before a
/// bare number is considered as a temperature. Returned matches never
/// overlap and are ordered by position.
pub fn classify(source: &NumeralText, rules: &ConversionRules) -> Vec<MeasurementMatch> {
    let text = source.text.as_str();
    let mut matches = Vec::new();
    let mut consumed = 0;

    for found in rules.number.find_iter(text) {
        let mut start = found.start();
        let end = found.end();
        if start < consumed {
            continue;
        }
        if text[start..].starts_with('-') && !sign_allowed(text, start) {
            start += 1;
        }
        if !free_before(text, start) {
            continue;
        }

        let token = &text[start..end];
        let rest = &text[end..];
        // Only "zero" and friends stay temperatures once spelled out
        let temperature_allowed = free_after(text, end)
            && source
                .spelled_within(&(start..end))
                .map_or(true, |spelled| rules.is_temperature_word(&spelled.words));

        let classified = accumulation(token, rest, start, end, rules)
            .or_else(|| wind(token, rest, start, end, rules))
            .or_else(|| temperature_allowed.then(|| temperature(token, rest, start, end, rules)).flatten());

        if let Some(measurement) = classified {
            consumed = measurement.span.end;
            matches.push(measurement);
        }
    }

    for found in rules.bare_mph.find_iter(text) {
        if !overlaps_any(&matches, &found.range()) && !follows_number(text, found.start()) {
            matches.push(MeasurementMatch {
                kind: MeasurementKind::SpeedUnit,
                span: found.range(),
                replacement: "km/h".to_string(),
            });
        }
    }

    for spelled in &source.spelled {
        if !overlaps_any(&matches, &spelled.span) {
            matches.push(MeasurementMatch {
                kind: MeasurementKind::SpelledNumber,
                span: spelled.span.clone(),
                replacement: spelled.words.clone(),
            });
        }
    }

    matches.sort_by_key(|m| m.span.start);
    matches
}

/// Apply non-overlapping matches back to front so earlier offsets stay valid.
pub fn substitute(text: &str, matches: &[MeasurementMatch]) -> String {
    let mut result = text.to_string();
    let mut ordered: Vec<&MeasurementMatch> = matches.iter().collect();
    ordered.sort_by_key(|m| std::cmp::Reverse(m.span.start));

    for measurement in ordered {
        result.replace_range(measurement.span.clone(), &measurement.replacement);
    }
    result
}

fn temperature(
    token: &str,
    rest: &str,
    start: usize,
    end: usize,
    rules: &ConversionRules,
) -> Option<MeasurementMatch> {
    if !is_short_integer(token.trim_start_matches('-')) {
        return None;
    }
    if rules
        .temperature_disqualifier
        .as_ref()
        .is_some_and(|d| d.is_match(rest))
    {
        return None;
    }

    let fahrenheit: i64 = token.parse().ok()?;
    Some(MeasurementMatch {
        kind: MeasurementKind::Temperature,
        span: start..end,
        replacement: fahrenheit_to_celsius(fahrenheit).to_string(),
    })
}

fn wind(
    token: &str,
    rest: &str,
    start: usize,
    end: usize,
    rules: &ConversionRules,
) -> Option<MeasurementMatch> {
    if !is_short_integer(token.split('.').next().unwrap_or_default()) {
        return None;
    }
    let low: f64 = token.parse().ok()?;

    if let Some(unit) = rules.wind_single.find(rest) {
        return Some(MeasurementMatch {
            kind: MeasurementKind::WindSpeed,
            span: start..end + unit.end(),
            replacement: format!("{} km/h", mph_to_kmh(low)),
        });
    }

    let range = rules.wind_range.captures(rest)?;
    let high: f64 = range[2].parse().ok()?;
    Some(MeasurementMatch {
        kind: MeasurementKind::WindSpeed,
        span: start..end + range.get(0)?.end(),
        replacement: format!("{}{}{} km/h", mph_to_kmh(low), &range[1], mph_to_kmh(high)),
    })
}

fn accumulation(
    token: &str,
    rest: &str,
    start: usize,
    end: usize,
    rules: &ConversionRules,
) -> Option<MeasurementMatch> {
    if token.starts_with('-') {
        return None;
    }
    let low: f64 = token.parse().ok()?;

    if let Some(unit) = rules.accumulation_single.find(rest) {
        let cm = inches_to_cm(low);
        let word = if cm == 1 { "centimeter" } else { "centimeters" };
        return Some(MeasurementMatch {
            kind: MeasurementKind::Accumulation,
            span: start..end + unit.end(),
            replacement: format!("{cm} {word}"),
        });
    }

    let range = rules.accumulation_range.captures(rest)?;
    let high: f64 = range[2].parse().ok()?;
    Some(MeasurementMatch {
        kind: MeasurementKind::Accumulation,
        span: start..end + range.get(0)?.end(),
        replacement: format!(
            "{}{}{} centimeters",
            inches_to_cm(low),
            &range[1],
            inches_to_cm(high)
        ),
    })
}

fn is_short_integer(digits: &str) -> bool {
    (1..=3).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// A leading '-' is a sign only at the start of a word.
fn sign_allowed(text: &str, start: usize) -> bool {
    match text[..start].chars().next_back() {
        None => true,
        Some(c) => c.is_whitespace() || c == '(',
    }
}

/// Reject numbers glued to a preceding word or number: "I-95", the "30"
/// of "10:30", the "000" of "5,000".
fn free_before(text: &str, start: usize) -> bool {
    let mut before = text[..start].chars().rev();
    match before.next() {
        Some(c) if c.is_alphanumeric() || c == '_' => false,
        Some('.' | ',' | ':' | '/' | '-') => !before.next().is_some_and(|c| c.is_alphanumeric()),
        _ => true,
    }
}

/// Reject numbers glued to what follows: "3rd", "1/2", "10-20".
fn free_after(text: &str, end: usize) -> bool {
    let mut after = text[end..].chars();
    match after.next() {
        Some(c) if c.is_alphanumeric() || c == '_' => false,
        Some('.' | ',' | ':' | '/' | '-') => !after.next().is_some_and(|c| c.is_ascii_digit()),
        _ => true,
    }
}

fn follows_number(text: &str, start: usize) -> bool {
    text[..start]
        .trim_end()
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit())
}

fn overlaps_any(matches: &[MeasurementMatch], span: &Range<usize>) -> bool {
    matches
        .iter()
        .any(|m| m.span.start < span.end && span.start < m.span.end)
}
