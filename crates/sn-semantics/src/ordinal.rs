use sn_core::{TranslateError, TranslateErrorKind};

const ORDINALS: &[(&str, u8)] = &[
    ("first", 1),
    ("firstly", 1),
    ("second", 2),
    ("secondly", 2),
    ("third", 3),
    ("thirdly", 3),
    ("fourth", 4),
    ("fourthly", 4),
    ("fifth", 5),
    ("fifthly", 5),
    ("sixth", 6),
    ("sixthly", 6),
    ("seventh", 7),
];

pub fn ordinal_index(word: &str) -> Result<u8, TranslateError> {
    ORDINALS
        .iter()
        .find(|(ordinal, _)| *ordinal == word)
        .map(|(_, index)| *index)
        .ok_or_else(|| {
            TranslateErrorKind::UnsupportedOrdinal {
                word: word.to_string(),
            }
            .into()
        })
}

pub fn ordinal_words() -> impl Iterator<Item = &'static str> {
    ORDINALS.iter().map(|(word, _)| *word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_map_covers_first_to_seventh() {
        assert_eq!(ordinal_index("first").expect("first"), 1);
        assert_eq!(ordinal_index("thirdly").expect("thirdly"), 3);
        assert_eq!(ordinal_index("seventh").expect("seventh"), 7);
    }

    #[test]
    fn words_outside_the_map_are_unsupported() {
        for word in ["eighth", "seventhly", "last", "3rd"] {
            let error = ordinal_index(word).expect_err("ordinal should be rejected");
            assert_eq!(
                error.kind,
                TranslateErrorKind::UnsupportedOrdinal {
                    word: word.to_string()
                }
            );
        }
    }
}
