// Text-to-number service used for number slots the lexicon left as words
// ("ten", "3.5"). Hosts plug in a full English resolver; the default only
// reads numerals.
pub trait NumberWords: Send + Sync {
    fn resolve(&self, word: &str) -> Option<f64>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NumeralWords;

impl NumberWords for NumeralWords {
    fn resolve(&self, word: &str) -> Option<f64> {
        parse_numeral(word)
    }
}

pub fn parse_numeral(word: &str) -> Option<f64> {
    word.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numerals_resolve() {
        assert_eq!(NumeralWords.resolve("10"), Some(10.0));
        assert_eq!(NumeralWords.resolve("-2.5"), Some(-2.5));
    }

    #[test]
    fn words_and_non_finite_values_do_not() {
        assert_eq!(NumeralWords.resolve("ten"), None);
        assert_eq!(NumeralWords.resolve("inf"), None);
        assert_eq!(NumeralWords.resolve("NaN"), None);
    }
}
