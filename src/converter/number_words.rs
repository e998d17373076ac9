use std::ops::Range;

use regex::Captures;

use super::rules::ConversionRules;

/// A spelled-out quantity that was rewritten as a numeral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpelledNumber {
    /// Byte range of the numeral in the rewritten text
    pub span: Range<usize>,
    /// Words the numeral replaced
    pub words: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumeralText {
    pub text: String,
    pub spelled: Vec<SpelledNumber>,
}

impl NumeralText {
    pub(crate) fn spelled_within(&self, span: &Range<usize>) -> Option<&SpelledNumber> {
        self.spelled
            .iter()
            .find(|s| s.span.start < span.end && span.start < s.span.end)
    }
}

/// Rewrite number words ("a quarter of an", "two") as numerals, remembering
/// where each one came from.
pub fn to_numerals(text: &str, rules: &ConversionRules) -> NumeralText {
    let Some(pattern) = &rules.number_word else {
        return NumeralText {
            text: text.to_string(),
            spelled: Vec::new(),
        };
    };

    let mut rewritten = String::with_capacity(text.len());
    let mut spelled = Vec::new();
    let mut last = 0;

    for found in pattern.find_iter(text) {
        let Some(numeral) = rules.numeral_for(found.as_str()) else {
            continue;
        };
        rewritten.push_str(&text[last..found.start()]);
        let start = rewritten.len();
        rewritten.push_str(numeral);
        spelled.push(SpelledNumber {
            span: start..rewritten.len(),
            words: found.as_str().to_string(),
        });
        last = found.end();
    }
    rewritten.push_str(&text[last..]);

    NumeralText {
        text: rewritten,
        spelled,
    }
}

/// Rewrite "0", "0.1" and "0.5" as words wherever they stand alone.
pub fn to_words(text: &str, rules: &ConversionRules) -> String {
    let Some(pattern) = &rules.numeral_word else {
        return text.to_string();
    };

    pattern
        .replace_all(text, |caps: &Captures| {
            let found = &caps[0];
            let Some(whole) = caps.get(0) else {
                return found.to_string();
            };
            let before = text[..whole.start()].chars().next_back();
            let mut after = text[whole.end()..].chars();
            let decimal_continues = after.next() == Some('.')
                && after.next().is_some_and(|c| c.is_ascii_digit());
            let decimal_precedes = matches!(before, Some('.') | Some(','));

            match rules.word_for(found) {
                Some(words) if !decimal_continues && !decimal_precedes => words.to_string(),
                _ => found.to_string(),
            }
        })
        .into_owned()
}
