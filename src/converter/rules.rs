use regex::Regex;

/// Phrases that, directly after a number, mean it is not a temperature.
pub const TEMPERATURE_DISQUALIFIERS: &[&str] = &[
    "%", " percent", " a.m.", " p.m.", " to", " mph", " and", " of an", " inch", " inches",
];

/// Spelled-out quantities rewritten to numerals before measurements are located.
/// Longer phrases come first so they win over their own prefixes.
pub const NUMBER_WORDS: &[(&str, &str)] = &[
    ("a tenth of an", "0.1"),
    ("a quarter of an", "0.25"),
    ("half of an", "0.5"),
    ("a half", "0.5"),
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
];

/// Number words that still read as a Fahrenheit temperature ("low around zero").
pub const TEMPERATURE_WORDS: &[&str] = &["zero"];

/// Numerals rewritten back to words once conversion is done.
pub const NUMERAL_WORDS: &[(&str, &str)] = &[("0", "zero"), ("0.1", "a tenth of a"), ("0.5", "a half")];

/// Word lists a [`ConversionRules`] set is compiled from.
#[derive(Debug, Clone)]
pub struct RuleVocabulary {
    pub temperature_disqualifiers: Vec<String>,
    pub number_words: Vec<(String, String)>,
    pub temperature_words: Vec<String>,
    pub numeral_words: Vec<(String, String)>,
}

impl Default for RuleVocabulary {
    fn default() -> Self {
        let pairs = |list: &[(&str, &str)]| {
            list.iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect()
        };

        Self {
            temperature_disqualifiers: TEMPERATURE_DISQUALIFIERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            number_words: pairs(NUMBER_WORDS),
            temperature_words: TEMPERATURE_WORDS.iter().map(|s| s.to_string()).collect(),
            numeral_words: pairs(NUMERAL_WORDS),
        }
    }
}

/// Every pattern the converter uses, compiled once.
#[derive(Debug, Clone)]
pub struct ConversionRules {
    pub(crate) whitespace_run: Regex,
    pub(crate) am_pm_boundary: Regex,
    pub(crate) am_pm_format: Regex,
    pub(crate) number: Regex,
    pub(crate) temperature_disqualifier: Option<Regex>,
    pub(crate) wind_single: Regex,
    pub(crate) wind_range: Regex,
    pub(crate) accumulation_single: Regex,
    pub(crate) accumulation_range: Regex,
    pub(crate) bare_mph: Regex,
    pub(crate) number_word: Option<Regex>,
    pub(crate) numeral_word: Option<Regex>,
    number_words: Vec<(String, String)>,
    temperature_words: Vec<String>,
    numeral_words: Vec<(String, String)>,
}

impl Default for ConversionRules {
    fn default() -> Self {
        Self::new(&RuleVocabulary::default()).expect("built-in conversion rules compile")
    }
}

impl ConversionRules {
    pub fn new(vocabulary: &RuleVocabulary) -> Result<Self, regex::Error> {
        let disqualifiers: Vec<String> = vocabulary
            .temperature_disqualifiers
            .iter()
            .map(|phrase| word_bounded(phrase))
            .collect();

        let words: Vec<&str> = vocabulary.number_words.iter().map(|(w, _)| w.as_str()).collect();

        // Longest numeral first so "0.5" is not read as "0" followed by ".5".
        let mut numerals: Vec<&str> = vocabulary.numeral_words.iter().map(|(n, _)| n.as_str()).collect();
        numerals.sort_by_key(|n| std::cmp::Reverse(n.len()));

        Ok(Self {
            whitespace_run: Regex::new(r"(\s)\s+")?,
            am_pm_boundary: Regex::new(r"(\d)([ap]m)\b")?,
            am_pm_format: Regex::new(r"(\d\s[ap])m\b\.?")?,
            number: Regex::new(r"-?\d+(?:\.\d+)?")?,
            temperature_disqualifier: anchored_alternation("^(?:", &disqualifiers, ")")?,
            wind_single: Regex::new(r"^ mph\b")?,
            wind_range: Regex::new(r"^( to |-)(\d{1,3}(?:\.\d+)?) mph\b")?,
            accumulation_single: Regex::new(r"^ inch(?:es)?\b")?,
            accumulation_range: Regex::new(r"^( to |-)(\d+(?:\.\d+)?) inch(?:es)?\b")?,
            bare_mph: Regex::new(r"\bmph\b")?,
            number_word: anchored_alternation(r"\b(?:", &escaped(&words), r")\b")?,
            numeral_word: anchored_alternation(r"\b(?:", &escaped(&numerals), r")\b")?,
            number_words: vocabulary.number_words.clone(),
            temperature_words: vocabulary.temperature_words.clone(),
            numeral_words: vocabulary.numeral_words.clone(),
        })
    }

    pub(crate) fn numeral_for(&self, word: &str) -> Option<&str> {
        lookup(&self.number_words, word)
    }

    pub(crate) fn is_temperature_word(&self, words: &str) -> bool {
        self.temperature_words.iter().any(|w| w == words)
    }

    pub(crate) fn word_for(&self, numeral: &str) -> Option<&str> {
        lookup(&self.numeral_words, numeral)
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn escaped(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| regex::escape(s)).collect()
}

/// Escape a phrase, requiring a word boundary after it when it ends in a
/// word character (" to" must not match " tonight").
fn word_bounded(phrase: &str) -> String {
    let escaped = regex::escape(phrase);
    match phrase.chars().last() {
        Some(c) if c.is_alphanumeric() => format!(r"{escaped}\b"),
        _ => escaped,
    }
}

fn anchored_alternation(
    prefix: &str,
    alternatives: &[String],
    suffix: &str,
) -> Result<Option<Regex>, regex::Error> {
    if alternatives.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!("{prefix}{}{suffix}", alternatives.join("|"))).map(Some)
}
