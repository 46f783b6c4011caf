use std::sync::Arc;

use sn_core::{DerivationNode, Script, Session, TranslateError};

use crate::assembler::assemble;
use crate::evaluator::Evaluator;
use crate::lexicon::{Lexicon, DEFAULT_SOUND_NAMES};
use crate::numbers::{NumberWords, NumeralWords};
use crate::rules::RuleTable;

#[derive(Clone)]
pub struct TranslatorOptions {
    pub sound_names: Vec<String>,
    pub number_words: Option<Arc<dyn NumberWords>>,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            sound_names: DEFAULT_SOUND_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            number_words: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub script: Script,
    pub session: Session,
}

pub struct Translator {
    lexicon: Lexicon,
    rules: RuleTable,
    numbers: Arc<dyn NumberWords>,
}

impl Translator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self {
            lexicon: Lexicon::standard(&options.sound_names),
            rules: RuleTable::standard(),
            numbers: options
                .number_words
                .unwrap_or_else(|| Arc::new(NumeralWords)),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn translate_fresh(&self, tree: &DerivationNode) -> Result<Translation, TranslateError> {
        self.translate(tree, &Session::new())
    }

    // Translates one sentence continuing `session`. The caller's session is
    // never touched; the updated copy comes back only on success.
    pub fn translate(
        &self,
        tree: &DerivationNode,
        session: &Session,
    ) -> Result<Translation, TranslateError> {
        let sentence = tree.sentence();
        tracing::debug!(sentence = sentence.as_str(), "translating");

        let evaluator = Evaluator::new(&self.lexicon, &self.rules, self.numbers.as_ref());
        let outcome = evaluator
            .evaluate(tree, session.clone())
            .and_then(|(root, session)| {
                let script = assemble(root, &session.environment)?;
                Ok(Translation { script, session })
            });

        match outcome {
            Ok(translation) => {
                tracing::debug!(
                    commands = translation.script.commands.len(),
                    variables = translation.script.variables.len(),
                    lists = translation.script.lists.len(),
                    "translated"
                );
                Ok(translation)
            }
            Err(error) => {
                tracing::debug!(code = error.code(), sentence = sentence.as_str(), "translation failed");
                Err(error.in_sentence(sentence))
            }
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(TranslatorOptions::default())
    }
}
