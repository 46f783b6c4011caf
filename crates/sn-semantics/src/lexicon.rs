use std::collections::{BTreeMap, BTreeSet, HashMap};

use sn_core::{opcodes, Modifier, SemanticValue, TranslateError, TranslateErrorKind};

use crate::numbers::parse_numeral;
use crate::ordinal::{ordinal_index, ordinal_words};
use crate::rules::FOREVER;

pub type LexiconFn = fn(&str) -> Result<SemanticValue, TranslateError>;

pub const DEFAULT_SOUND_NAMES: &[&str] = &["meow", "pop"];

// Keyword categories. Their words only steer the grammar and carry no value.
const KEYWORDS: &[(&str, &[&str])] = &[
    ("Add", &["add"]),
    ("Added", &["added"]),
    ("All", &["all"]),
    ("And", &["and"]),
    ("At", &["at"]),
    ("Backdrop", &["backdrop"]),
    ("Be", &["be"]),
    ("Between", &["between"]),
    ("Broadcast", &["broadcast"]),
    ("By", &["by"]),
    ("Called", &["called", "named"]),
    ("Change", &["change"]),
    ("Clicked", &["clicked", "pressed"]),
    ("Clone", &["clone"]),
    ("Contains", &["contains", "has"]),
    ("Decrement", &["decrement"]),
    ("Delete", &["delete"]),
    ("Det", &["the", "this", "a", "an"]),
    ("Divide", &["divide"]),
    ("Divided", &["divided"]),
    ("Effect", &["effect"]),
    ("Ele", &["element", "item"]),
    ("Else", &["else", "otherwise"]),
    ("Equal", &["equal"]),
    ("Faster", &["faster"]),
    ("Flag", &["flag"]),
    ("Following", &["following"]),
    ("For", &["for"]),
    ("Forever", &["forever"]),
    ("From", &["from"]),
    ("Greater", &["greater"]),
    ("Green", &["green"]),
    ("I", &["i"]),
    ("If", &["if"]),
    ("In", &["in"]),
    ("Increment", &["increment"]),
    ("Is", &["is"]),
    ("It", &["it"]),
    ("Item", &["item"]),
    ("Key", &["key", "button"]),
    ("Less", &["less"]),
    ("List", &["list"]),
    ("Louder", &["louder"]),
    ("Make", &["make", "create"]),
    ("Message", &["message"]),
    ("Minus", &["minus"]),
    ("Multiplied", &["multiplied"]),
    ("Multiply", &["multiply"]),
    ("Myself", &["myself"]),
    ("Negative", &["negative"]),
    ("New", &["new"]),
    ("Number", &["number"]),
    ("Of", &["of"]),
    ("Or", &["or"]),
    ("Percent", &["percent"]),
    ("Pitch", &["pitch"]),
    ("Play", &["play"]),
    ("Plus", &["plus"]),
    ("Product", &["product"]),
    ("Program", &["program"]),
    ("Random", &["random"]),
    ("Receive", &["receive"]),
    ("Repeat", &["repeat", "do"]),
    ("Repeated", &["repeated", "done"]),
    ("Replace", &["replace"]),
    ("Reset", &["reset"]),
    ("Same", &["same"]),
    ("Seconds", &["seconds", "second"]),
    ("SequenceAdverb", &["then", "after", "finally"]),
    ("Set", &["set"]),
    ("Should", &["should"]),
    ("Single", &["single"]),
    ("Slower", &["slower"]),
    ("Softer", &["softer", "quieter"]),
    ("Sound", &["sound"]),
    ("Sounds", &["sounds"]),
    ("Sprite", &["sprite"]),
    ("Sprites", &["sprites"]),
    ("Starts", &["starts"]),
    ("Steps", &["steps"]),
    ("Stop", &["stop", "terminate"]),
    ("Subtract", &["subtract"]),
    ("Subtracted", &["subtracted"]),
    ("Sum", &["sum"]),
    ("Switches", &["switches"]),
    ("Than", &["than"]),
    ("That", &["that"]),
    ("Thats", &["thats", "that's"]),
    ("The", &["the"]),
    ("Then", &["then"]),
    ("Time", &["time"]),
    ("Times", &["times"]),
    ("To", &["to"]),
    ("Too", &["too", "simultaneously"]),
    ("Until", &["until", "till"]),
    ("Variable", &["variable"]),
    ("Volume", &["volume"]),
    ("Wait", &["wait"]),
    ("When", &["when"]),
    ("With", &["with"]),
];

pub struct Lexicon {
    closed: HashMap<(String, String), LexiconFn>,
    open: HashMap<String, LexiconFn>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            closed: HashMap::new(),
            open: HashMap::new(),
        }
    }

    pub fn standard<S: AsRef<str>>(sound_names: &[S]) -> Self {
        let mut lexicon = Self::new();
        for (category, words) in KEYWORDS {
            lexicon.add_words(category, words, |_| Ok(SemanticValue::Null));
        }

        lexicon
            .add_words("BooleanLiteral", &["true"], |_| Ok(SemanticValue::number(1)))
            .add_words("BooleanLiteral", &["false"], |_| Ok(SemanticValue::number(0)))
            .add_words("POS", &["is"], |_| Ok(SemanticValue::Modifier(Modifier::affirm())))
            .add_words("NEG", &["not", "isn't"], |_| {
                Ok(SemanticValue::Modifier(Modifier::negate()))
            })
            .add_words("Timer", &["timer"], |_| {
                Ok(SemanticValue::expression(opcodes::TIMER, Vec::new()))
            })
            .add_words("Duration", &[FOREVER], |_| Ok(SemanticValue::text(FOREVER)));

        for name in sound_names {
            lexicon.add_words("NAME_OF_SOUND", &[name.as_ref()], echo_name);
        }
        for word in ordinal_words() {
            lexicon.add_words("OrderAdverb", &[word], ordinal_value);
        }

        lexicon
            .add_open("Unk", |word| {
                Ok(match parse_numeral(word) {
                    Some(value) => SemanticValue::Number(value),
                    None => SemanticValue::text(word),
                })
            })
            .add_open("VARIABLE_NAME", |word| {
                Ok(SemanticValue::VariableRef(word.to_string()))
            })
            .add_open("LIST_NAME", |word| Ok(SemanticValue::ListRef(word.to_string())))
            .add_open("MESSAGE_NAME", echo_name)
            .add_open("KEY_NAME", echo_name)
            .add_open("BACKDROP_NAME", echo_name)
            // Other ordinals still reach the ordinal map and fail there.
            .add_open("OrderAdverb", ordinal_value);
        lexicon
    }

    pub fn add_words(&mut self, category: &str, words: &[&str], produce: LexiconFn) -> &mut Self {
        for word in words {
            self.closed
                .insert((category.to_string(), word.to_lowercase()), produce);
        }
        self
    }

    pub fn add_open(&mut self, category: &str, produce: LexiconFn) -> &mut Self {
        self.open.insert(category.to_string(), produce);
        self
    }

    pub fn lookup(&self, category: &str, word: &str) -> Result<SemanticValue, TranslateError> {
        let normalized = word.to_lowercase();
        let produce = self
            .closed
            .get(&(category.to_string(), normalized.clone()))
            .or_else(|| self.open.get(category));
        match produce {
            Some(produce) => produce(&normalized),
            None => {
                tracing::debug!(category, word, "lexicon miss");
                Err(TranslateErrorKind::UnknownWord {
                    category: category.to_string(),
                    word: word.to_string(),
                }
                .into())
            }
        }
    }

    pub fn vocabulary(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut out: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (category, word) in self.closed.keys() {
            out.entry(category.clone()).or_default().insert(word.clone());
        }
        for category in self.open.keys() {
            out.entry(category.clone()).or_default();
        }
        out
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::standard(DEFAULT_SOUND_NAMES)
    }
}

fn ordinal_value(word: &str) -> Result<SemanticValue, TranslateError> {
    Ok(SemanticValue::number(ordinal_index(word)?))
}

fn echo_name(word: &str) -> Result<SemanticValue, TranslateError> {
    Ok(SemanticValue::text(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sn_core::Polarity;

    fn lexicon() -> Lexicon {
        Lexicon::default()
    }

    #[test]
    fn keywords_carry_no_value() {
        assert_eq!(lexicon().lookup("Det", "the").expect("det"), SemanticValue::Null);
        assert_eq!(
            lexicon().lookup("Repeat", "do").expect("repeat"),
            SemanticValue::Null
        );
    }

    #[test]
    fn lookup_is_case_normalized() {
        assert_eq!(
            lexicon().lookup("NAME_OF_SOUND", "Meow").expect("sound"),
            SemanticValue::text("meow")
        );
        assert_eq!(
            lexicon().lookup("Play", "PLAY").expect("play"),
            SemanticValue::Null
        );
    }

    #[test]
    fn boolean_literals_ignore_the_word() {
        assert_eq!(
            lexicon().lookup("BooleanLiteral", "true").expect("true"),
            SemanticValue::number(1)
        );
        assert_eq!(
            lexicon().lookup("BooleanLiteral", "false").expect("false"),
            SemanticValue::number(0)
        );
    }

    #[test]
    fn polarity_words_become_modifiers() {
        let negation = lexicon().lookup("NEG", "isn't").expect("neg");
        match negation {
            SemanticValue::Modifier(modifier) => {
                assert_eq!(modifier.layers(), &[Polarity::Negate])
            }
            other => panic!("expected modifier, got {:?}", other),
        }
    }

    #[test]
    fn open_categories_echo_the_word() {
        let lexicon = lexicon();
        assert_eq!(
            lexicon.lookup("VARIABLE_NAME", "score").expect("variable"),
            SemanticValue::VariableRef("score".to_string())
        );
        assert_eq!(
            lexicon.lookup("LIST_NAME", "names").expect("list"),
            SemanticValue::ListRef("names".to_string())
        );
        assert_eq!(
            lexicon.lookup("MESSAGE_NAME", "hello").expect("message"),
            SemanticValue::text("hello")
        );
        assert_eq!(
            lexicon.lookup("Unk", "10").expect("unk"),
            SemanticValue::number(10)
        );
        assert_eq!(
            lexicon.lookup("Unk", "ten").expect("unk"),
            SemanticValue::text("ten")
        );
    }

    #[test]
    fn ordinal_adverbs_resolve_through_the_ordinal_map() {
        assert_eq!(
            lexicon().lookup("OrderAdverb", "third").expect("third"),
            SemanticValue::number(3)
        );
        let error = lexicon()
            .lookup("OrderAdverb", "eighth")
            .expect_err("eighth is outside the map");
        assert_eq!(error.code(), "UNSUPPORTED_ORDINAL");
    }

    #[test]
    fn misses_report_category_and_word() {
        let error = lexicon()
            .lookup("NAME_OF_SOUND", "bark")
            .expect_err("bark is not a known sound");
        assert_eq!(
            error.kind,
            TranslateErrorKind::UnknownWord {
                category: "NAME_OF_SOUND".to_string(),
                word: "bark".to_string(),
            }
        );
        assert!(lexicon().lookup("Nonsense", "the").is_err());
    }

    #[test]
    fn configured_sound_names_replace_defaults() {
        let lexicon = Lexicon::standard(&["bark"]);
        assert!(lexicon.lookup("NAME_OF_SOUND", "bark").is_ok());
        assert!(lexicon.lookup("NAME_OF_SOUND", "meow").is_err());
    }

    #[test]
    fn vocabulary_lists_open_categories_without_words() {
        let vocabulary = lexicon().vocabulary();
        assert!(vocabulary["Det"].contains("the"));
        assert!(vocabulary["Unk"].is_empty());
        assert!(vocabulary["OrderAdverb"].contains("seventh"));
    }
}
