use std::collections::BTreeMap;

use serde::Serialize;
use sn_core::{
    parse_bracketed, DerivationNode, Script, Session, TokenSpan, TranslateError,
    TranslateErrorKind,
};
use sn_semantics::{Translation, Translator, TranslatorOptions};

#[derive(Clone, Default)]
pub struct TranslateSourcesOptions {
    pub sources: BTreeMap<String, String>,
    pub session: Option<Session>,
    pub translator: TranslatorOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchTranslation {
    pub scripts: BTreeMap<String, Script>,
    pub session: Session,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub source: String,
    pub error: TranslateError,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vocabulary {
    pub categories: BTreeMap<String, Vec<String>>,
    pub rules: Vec<String>,
}

pub fn read_tree(text: &str) -> Result<DerivationNode, TranslateError> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with('{') {
        return parse_bracketed(trimmed);
    }

    let node: DerivationNode = serde_json::from_str(trimmed).map_err(|error| {
        TranslateError::new(TranslateErrorKind::TreeSyntax {
            message: error.to_string(),
        })
    })?;
    // Parsers that omit spans get leaf-order spans.
    if node.span() == TokenSpan::default() {
        return Ok(node.reindexed());
    }
    Ok(node)
}

pub fn translate_text(
    translator: &Translator,
    text: &str,
    session: &Session,
) -> Result<Translation, TranslateError> {
    let tree = read_tree(text)?;
    translator.translate(&tree, session)
}

pub fn translate_sources(
    options: TranslateSourcesOptions,
) -> Result<BatchTranslation, BatchFailure> {
    let translator = Translator::new(options.translator);
    let mut session = options.session.unwrap_or_default();
    let mut scripts = BTreeMap::new();

    for (source, text) in options.sources {
        match translate_text(&translator, &text, &session) {
            Ok(translation) => {
                session = translation.session;
                scripts.insert(source, translation.script);
            }
            Err(error) => {
                tracing::warn!(source = source.as_str(), code = error.code(), "batch stopped");
                return Err(BatchFailure { source, error });
            }
        }
    }

    Ok(BatchTranslation { scripts, session })
}

pub fn vocabulary(translator: &Translator) -> Vocabulary {
    let categories = translator
        .lexicon()
        .vocabulary()
        .into_iter()
        .map(|(category, words)| (category, words.into_iter().collect()))
        .collect();
    let rules = translator
        .rules()
        .keys()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    Vocabulary { categories, rules }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const MAKE_SCORE: &str = "(Start (S (AL (AP (CreateCommand (Make make) (VARIABLE_LIST (VARIABLE_NAME score)))))))";
    const SET_SCORE: &str = "(Start (S (AL (AP (DataCommand (Set set) (VARIABLE_NAME score) (To to) (NP (Unk 3)))))))";

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn read_tree_accepts_json_without_spans() {
        let text = json!({
            "kind": "rule",
            "lhs": "SoundCommand",
            "rhs": ["Stop"],
            "children": [{"kind": "leaf", "category": "Stop", "word": "stop"}]
        })
        .to_string();
        let tree = read_tree(&text).expect("json tree should read");
        assert_eq!(tree.span(), TokenSpan::new(0, 1));
        assert_eq!(tree.sentence(), "stop");
    }

    #[test]
    fn read_tree_reports_bad_json_as_tree_syntax() {
        let error = read_tree("{\"kind\": \"branch\"}").expect_err("unknown node kind");
        assert_eq!(error.code(), "TREE_SYNTAX");
    }

    #[test]
    fn translate_text_continues_the_given_session() {
        let translator = Translator::default();
        let made = translate_text(&translator, MAKE_SCORE, &Session::new())
            .expect("translate should pass");
        let set = translate_text(&translator, SET_SCORE, &made.session)
            .expect("translate should pass");
        assert_eq!(set.script.variables["score"], json!(3));
    }

    #[test]
    fn translate_sources_threads_one_session_in_name_order() {
        let result = translate_sources(TranslateSourcesOptions {
            sources: map(&[("01-make.tree", MAKE_SCORE), ("02-set.tree", SET_SCORE)]),
            ..TranslateSourcesOptions::default()
        })
        .expect("batch should pass");
        assert_eq!(result.scripts.len(), 2);
        assert_eq!(result.session.environment.variables["score"], json!(3));
        assert_eq!(
            serde_json::to_value(&result.scripts["02-set.tree"].commands).expect("json"),
            json!([["setVar:to:", "score", 3]])
        );
    }

    #[test]
    fn translate_sources_names_the_failing_source() {
        let failure = translate_sources(TranslateSourcesOptions {
            sources: map(&[("01-set.tree", SET_SCORE), ("02-make.tree", MAKE_SCORE)]),
            ..TranslateSourcesOptions::default()
        })
        .expect_err("score is set before it is declared");
        assert_eq!(failure.source, "01-set.tree");
        assert_eq!(failure.error.code(), "UNKNOWN_VARIABLE");
    }

    #[test]
    fn vocabulary_lists_words_and_rules() {
        let vocabulary = vocabulary(&Translator::default());
        assert_eq!(vocabulary.categories["NAME_OF_SOUND"], vec!["meow", "pop"]);
        assert!(vocabulary
            .rules
            .contains(&"AL -> AP And AL".to_string()));
    }
}
